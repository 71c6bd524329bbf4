//! Editing core for an OpenStreetMap map editor: a persistent entity graph,
//! geometry-preserving editing actions, a spatial index over entity extents,
//! and a small validator suite. See `mapedit` (`src/main.rs`) for the CLI.

pub mod action;
pub mod cli_error;
pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod id;
pub mod model;
pub mod spatial;
pub mod validate;

pub use error::{ActionError, DisabledReason, GraphError};
pub use graph::{Difference, Graph};
pub use id::{EntityId, EntityType, IdSequence};
pub use model::Entity;
