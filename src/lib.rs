//! BMSSP - O(m log^(2/3) n) Single-Source Shortest Path Algorithm
//!
//! This library implements the algorithm described in "Breaking the Sorting Barrier
//! for Directed Single-Source Shortest Paths" by Duan et al. (2025).
//!
//! The algorithm provides a deterministic O(m log^(2/3) n) solution for single-source
//! shortest paths (SSSP) on directed graphs with real non-negative edge weights.

pub mod algorithm;
pub mod data_structures;
pub mod graph;

use num_traits::{Float, Zero};
use std::fmt::Debug;

pub use algorithm::{dijkstra::Dijkstra, driver::BoundedMultiSourceDriver, ShortestPathAlgorithm, ShortestPathResult};
/// Re-export main types for convenient use
pub use graph::directed::DirectedGraph;
pub use graph::{Graph, MutableGraph};

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(usize),

    #[error("Invalid edge: from {0} to {1}")]
    InvalidEdge(usize, usize),

    #[error("Negative edge weight: {0}")]
    NegativeWeight(f64),

    #[error("Source vertex not found in graph")]
    SourceNotFound,

    #[error("Algorithm execution error: {0}")]
    AlgorithmError(String),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Runs the BMSSP engine from `source` over `graph` and returns the
/// per-vertex shortest distance (`W::infinity()` for unreachable vertices)
/// and predecessor table, in vertex-index order.
///
/// This is the crate's top-level entry point: construct a graph, pick a
/// source, call `sssp`.
pub fn sssp<W, G>(graph: &G, source: usize) -> Result<(Vec<W>, Vec<Option<usize>>)>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    if !graph.has_vertex(source) {
        return Err(Error::SourceNotFound);
    }

    let driver = BoundedMultiSourceDriver::new();
    let result = driver.compute_shortest_paths(graph, source)?;

    let distances = result
        .distances
        .into_iter()
        .map(|d| d.unwrap_or_else(W::infinity))
        .collect();

    Ok((distances, result.predecessors))
}
