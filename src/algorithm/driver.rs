use num_traits::{Float, Zero};
use std::fmt::Debug;

use crate::algorithm::bmssp::BMSSP;
use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::graph::Graph;
use crate::{Error, Result};

/// Top-level BMSSP driver: computes k, t, ell_max from the graph size,
/// seeds `db[source] = 0`, and invokes `bmssp(ell_max, +inf, {source})`.
///
/// This is the O(m log^(2/3) n) algorithm from "Breaking the Sorting Barrier
/// for Directed Single-Source Shortest Paths" (Duan et al., 2025).
#[derive(Debug, Default)]
pub struct BoundedMultiSourceDriver;

impl BoundedMultiSourceDriver {
    /// Creates a new driver instance.
    pub fn new() -> Self {
        BoundedMultiSourceDriver
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for BoundedMultiSourceDriver
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "BMSSP"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        if !graph.has_vertex(source) {
            return Err(Error::SourceNotFound);
        }

        for v in 0..graph.vertex_count() {
            for (_, weight) in graph.outgoing_edges(v) {
                if weight < W::zero() {
                    return Err(Error::NegativeWeight(weight.to_f64().unwrap_or(0.0)));
                }
            }
        }

        let n = graph.vertex_count();
        log::debug!("BMSSP driver: n={}, source={}", n, source);

        let mut distances = vec![W::max_value(); n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        distances[source] = W::zero();

        let bmssp = BMSSP::<W, G>::new(n);
        let level = bmssp.level_max();

        bmssp.execute(
            graph,
            level,
            W::max_value(),
            &[source],
            &mut distances,
            &mut predecessors,
        )?;

        let distances = distances
            .into_iter()
            .map(|d| if d == W::max_value() { None } else { Some(d) })
            .collect();

        Ok(ShortestPathResult {
            distances,
            predecessors,
            source,
        })
    }
}
