pub mod bmssp;
pub mod dijkstra;
pub mod driver;
pub mod traits;

pub use driver::BoundedMultiSourceDriver;
pub use traits::{ShortestPathAlgorithm, ShortestPathResult};
