pub mod extent;
pub mod spatial_index;

pub use extent::Extent;
pub use spatial_index::{entity_extent, SpatialIndex};
