pub mod difference;
pub mod graph;

pub use difference::Difference;
pub use graph::Graph;
