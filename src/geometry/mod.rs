pub mod ssr;
pub mod vector;
pub mod viewport;

pub use ssr::{smallest_surrounding_rectangle, Ssr};
pub use vector::Point2;
pub use viewport::{FlatViewport, Viewport};
