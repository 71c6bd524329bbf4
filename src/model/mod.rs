pub mod entity;
pub mod node;
pub mod relation;
pub mod tags;
pub mod way;

pub use entity::{Entity, GeometryType};
pub use node::{Loc, Node};
pub use relation::{Member, Relation};
pub use tags::Tags;
pub use way::{Affix, Way};
