use num_traits::{Float, Zero};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::marker::PhantomData;

use crate::data_structures::{BinaryHeapWrapper, BlockList};
use crate::graph::Graph;
use crate::{Error, Result};

/// Absolute tolerance used when re-verifying a relaxed edge during forest
/// reconstruction in [`BMSSP::find_pivots`]. Floating point sums taken in a
/// different order than the original relaxation can differ in the last bit,
/// so equality is tested within this margin rather than exactly.
fn tolerance<W: Float>() -> W {
    W::from(1e-9).unwrap_or_else(W::epsilon)
}

/// Implementation of the Bounded Multi-Source Shortest Path (BMSSP) algorithm
/// as described in the paper "Breaking the Sorting Barrier for Directed
/// Single-Source Shortest Paths" (Duan et al., 2025).
#[derive(Debug)]
pub struct BMSSP<W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    /// Parameter k ~= log^(1/3)(n), clamped to >= 3.
    k: usize,

    /// Parameter t ~= log^(2/3)(n), clamped to >= 3.
    t: usize,

    /// Top-level recursion depth: max(1, ceil(log2(n) / t)).
    ell_max: usize,

    _graph_marker: PhantomData<G>,
    _weight_marker: PhantomData<W>,
}

/// Result from a BMSSP execution: a new distance bound and the set of
/// vertices it settled.
#[derive(Debug)]
pub struct BMSSPResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// New boundary value B'. B' <= the bound the call was invoked with.
    pub new_bound: W,

    /// Vertices settled by this call; each has its final shortest-path
    /// distance in `db` and satisfies `db[v] < new_bound`.
    pub vertices: Vec<usize>,
}

impl<W, G> BMSSP<W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    /// Creates a BMSSP instance with k, t derived from the vertex count per
    /// the paper: k ~ log(n)^(1/3), t ~ log(n)^(2/3), both floored at 3.
    pub fn new(vertex_count: usize) -> Self {
        let log_n = (vertex_count.max(2) as f64).ln();

        let k = (log_n.powf(1.0 / 3.0)).ceil() as usize;
        let t = (log_n.powf(2.0 / 3.0)).ceil() as usize;

        Self::new_with_params(vertex_count, k, t)
    }

    /// Creates a BMSSP instance with explicit k, t (still floored at 3).
    pub fn new_with_params(vertex_count: usize, k: usize, t: usize) -> Self {
        let k = k.max(3);
        let t = t.max(3);
        let ell_max = Self::level_max_for(vertex_count, t);

        log::debug!(
            "BMSSP parameters: k={}, t={}, ell_max={}",
            k,
            t,
            ell_max
        );

        BMSSP {
            k,
            t,
            ell_max,
            _graph_marker: PhantomData,
            _weight_marker: PhantomData,
        }
    }

    fn level_max_for(vertex_count: usize, t: usize) -> usize {
        let log2_n = (vertex_count.max(2) as f64).log2();
        ((log2_n / t as f64).ceil() as usize).max(1)
    }

    /// Top-level recursion depth computed from the vertex count and `t`.
    pub fn level_max(&self) -> usize {
        self.ell_max
    }

    /// Runs the BMSSP recursion at level `level` with bound `bound` from the
    /// multi-source frontier `sources`, mutating the shared `distances` /
    /// `predecessors` state. Returns the new bound and the settled set.
    pub fn execute(
        &self,
        graph: &G,
        level: usize,
        bound: W,
        sources: &[usize],
        distances: &mut Vec<W>,
        predecessors: &mut Vec<Option<usize>>,
    ) -> Result<BMSSPResult<W>> {
        if sources.is_empty() {
            return Err(Error::AlgorithmError("Empty sources set".to_string()));
        }

        if level == 0 {
            return self.base_case(graph, bound, sources, distances, predecessors);
        }

        let (pivots, witness_set) =
            self.find_pivots(graph, bound, sources, distances, predecessors)?;

        if pivots.is_empty() {
            // No productive pivots: the frontier is exhausted at this level.
            return Ok(BMSSPResult {
                new_bound: bound,
                vertices: Vec::new(),
            });
        }

        let block_size = 2usize.pow((level - 1) as u32 * self.t as u32);
        let mut frontier = BlockList::new(block_size, bound);

        for &pivot in &pivots {
            frontier.insert(pivot, distances[pivot]);
        }

        let mut result_vertices: HashSet<usize> = HashSet::new();
        for &source in sources {
            result_vertices.insert(source);
        }

        // Default for the "loop never ran / D emptied" case is the call's own
        // bound; a completed iteration always overwrites this with that
        // sub-call's returned B'_i (see spec step 5).
        let mut final_bound = bound;
        let term = self.k * 2usize.pow(level as u32 * self.t as u32);

        while result_vertices.len() < term && !frontier.is_empty() {
            let (pulled_sources, pull_bound) = frontier.pull(block_size);

            let sub_result =
                self.execute(graph, level - 1, pull_bound, &pulled_sources, distances, predecessors)?;
            let settled = sub_result.vertices;
            let sub_bound = sub_result.new_bound;

            for &vertex in &settled {
                result_vertices.insert(vertex);
            }

            let mut carry_over = Vec::new();
            for &u in &settled {
                for (v, weight) in graph.outgoing_edges(u) {
                    let candidate = distances[u] + weight;

                    if candidate <= distances[v] {
                        distances[v] = candidate;
                        predecessors[v] = Some(u);

                        if candidate >= sub_bound && candidate < pull_bound {
                            carry_over.push((v, candidate));
                        } else if candidate >= pull_bound && candidate < bound {
                            frontier.insert(v, candidate);
                        }
                    }
                }
            }

            frontier.batch_prepend(carry_over);

            let unsettled_sources = pulled_sources
                .iter()
                .filter(|&&v| distances[v] >= sub_bound && distances[v] < pull_bound)
                .map(|&v| (v, distances[v]))
                .collect::<Vec<_>>();

            if !unsettled_sources.is_empty() {
                frontier.batch_prepend(unsettled_sources);
            }

            final_bound = sub_bound;

            if result_vertices.len() >= term {
                break;
            }
        }

        if frontier.is_empty() && result_vertices.len() < term {
            final_bound = bound;
        }

        for &w in &witness_set {
            if distances[w] < final_bound {
                result_vertices.insert(w);
            }
        }

        Ok(BMSSPResult {
            new_bound: final_bound,
            vertices: result_vertices.into_iter().collect(),
        })
    }

    /// Bounded Dijkstra from a (usually singleton) frontier: pops vertices in
    /// increasing distance order, adding each to U while its distance
    /// remains strictly below `bound`, and never shrinks the bound itself.
    fn base_case(
        &self,
        graph: &G,
        bound: W,
        sources: &[usize],
        distances: &mut Vec<W>,
        predecessors: &mut Vec<Option<usize>>,
    ) -> Result<BMSSPResult<W>> {
        log::trace!("base_case: {} source(s), bound={:?}", sources.len(), bound);

        if sources.is_empty() {
            return Ok(BMSSPResult {
                new_bound: bound,
                vertices: Vec::new(),
            });
        }

        let mut heap = BinaryHeapWrapper::new();
        for &s in sources {
            heap.push(s, distances[s]);
        }

        let mut settled = Vec::new();
        let mut settled_flags = vec![false; graph.vertex_count()];

        while let Some((u, popped_key)) = heap.pop() {
            // Stale heap entry: a cheaper path to u was found after this was
            // pushed.
            if popped_key > distances[u] {
                continue;
            }

            if distances[u] >= bound {
                continue;
            }

            // Already settled: an equal-distance relaxation re-pushed it
            // (e.g. a zero-weight cycle through u). Pop it and move on
            // rather than process it twice.
            if settled_flags[u] {
                continue;
            }
            settled_flags[u] = true;
            settled.push(u);

            for (v, weight) in graph.outgoing_edges(u) {
                // A self-loop can never improve on u's own distance and
                // would otherwise overwrite pred[u] with itself.
                if v == u {
                    continue;
                }

                let candidate = distances[u] + weight;

                if candidate < bound && candidate <= distances[v] {
                    distances[v] = candidate;
                    predecessors[v] = Some(u);
                    if !settled_flags[v] {
                        heap.push(v, candidate);
                    }
                }
            }
        }

        Ok(BMSSPResult {
            new_bound: bound,
            vertices: settled,
        })
    }

    /// k-step Bellman-style relaxation from `sources`, producing a witness
    /// set W and a pivot set P of W-internal subtree roots of size >= k.
    fn find_pivots(
        &self,
        graph: &G,
        bound: W,
        sources: &[usize],
        distances: &mut Vec<W>,
        predecessors: &mut Vec<Option<usize>>,
    ) -> Result<(Vec<usize>, Vec<usize>)> {
        log::trace!("find_pivots: {} source(s), bound={:?}", sources.len(), bound);

        let source_set: HashSet<usize> = sources.iter().copied().collect();
        let mut work_set = sources.to_vec();
        let mut visited: HashSet<usize> = source_set.clone();
        let mut frontier: VecDeque<usize> = sources.iter().copied().collect();

        for _ in 0..self.k {
            if frontier.is_empty() {
                break;
            }

            let level_size = frontier.len();
            for _ in 0..level_size {
                let u = frontier.pop_front().unwrap();

                for (v, weight) in graph.outgoing_edges(u) {
                    // Skip self-loops: they cannot improve u's own distance
                    // and would otherwise overwrite pred[u] with itself.
                    if v == u {
                        continue;
                    }

                    let candidate = distances[u] + weight;

                    if candidate < bound && candidate <= distances[v] {
                        distances[v] = candidate;
                        predecessors[v] = Some(u);

                        if visited.insert(v) {
                            work_set.push(v);
                            frontier.push_back(v);
                        }
                    }
                }
            }

            if work_set.len() > self.k * sources.len() {
                log::trace!("find_pivots: witness set grew too fast, treating all sources as pivots");
                return Ok((sources.to_vec(), work_set));
            }
        }

        // Build the shortest-path forest F over verified relaxed edges
        // (db[v] == db[pred[v]] + w within tolerance) and find, for every
        // source root, the size of its F-subtree.
        let tol = tolerance::<W>();
        let work_members: HashSet<usize> = work_set.iter().copied().collect();
        let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut has_verified_parent: HashSet<usize> = HashSet::new();

        for &v in &work_set {
            let p = match predecessors[v] {
                Some(p) => p,
                None => continue,
            };
            if p == v || !work_members.contains(&p) {
                continue;
            }

            let edge_confirmed = graph
                .outgoing_edges(p)
                .any(|(to, w)| to == v && (distances[v] - (distances[p] + w)).abs() <= tol);

            if edge_confirmed {
                children.entry(p).or_default().push(v);
                has_verified_parent.insert(v);
            }
        }

        let subtree_size = |root: usize, children: &HashMap<usize, Vec<usize>>| -> usize {
            let mut size = 1;
            let mut stack = vec![root];
            let mut seen = HashSet::new();
            seen.insert(root);
            while let Some(u) = stack.pop() {
                if let Some(kids) = children.get(&u) {
                    for &c in kids {
                        if seen.insert(c) {
                            size += 1;
                            stack.push(c);
                        }
                    }
                }
            }
            size
        };

        let mut pivots: Vec<usize> = sources
            .iter()
            .copied()
            .filter(|s| !has_verified_parent.contains(s) && subtree_size(*s, &children) >= self.k)
            .collect();

        if pivots.is_empty() {
            // Fallback for the case spec.md leaves open: no root reaches a
            // tree of size k. Returning P empty here would abandon a
            // still-reachable frontier, so promote the source with the
            // largest tree instead of classifying none as pivots.
            if let Some(&best) = sources.iter().max_by_key(|&&s| subtree_size(s, &children)) {
                pivots.push(best);
            }
        }

        log::trace!(
            "find_pivots: {} pivot(s) from {} source(s), witness set size {}",
            pivots.len(),
            sources.len(),
            work_set.len()
        );

        Ok((pivots, work_set))
    }
}
