//! Editor actions: pure, composable edits over a [`Graph`], each either
//! a one-shot [`Action`] or a continuously-interpolatable [`TransitionableAction`].

use crate::error::{ActionError, DisabledReason};
use crate::graph::Graph;

pub mod atomic;
pub mod copy;
pub mod merge;
pub mod merge_polygon;
pub mod move_node;
pub mod reflect;
pub mod reverse;
pub mod rotate;
pub mod scale;
pub mod split;
pub mod straighten;
pub mod sync_crossing_tags;
pub mod translate;
pub mod turn_restriction;

pub use atomic::{AddMember, AddVertex, ChangeMember, ChangeTags, DeleteMember, InsertPair, MoveMember};
pub use copy::CopyEntities;
pub use merge::Merge;
pub use merge_polygon::MergePolygon;
pub use move_node::MoveNode;
pub use reflect::Reflect;
pub use reverse::{Reverse, ReverseOptions};
pub use rotate::Rotate;
pub use scale::Scale;
pub use split::{KeepHistoryOn, Split};
pub use straighten::{StraightenNodes, StraightenWay};
pub use sync_crossing_tags::SyncCrossingTags;
pub use translate::Move;
pub use turn_restriction::{RestrictTurn, RestrictionKind, UnrestrictTurn};

/// A non-transitionable edit: applied once, atomically, with no intermediate
/// states. `disabled` returns `Some` when the action would be a no-op or
/// violate a precondition; callers should check it before offering the
/// action in a UI, but `apply` is the source of truth.
pub trait Action {
    fn disabled(&self, _graph: &Graph) -> Option<DisabledReason> {
        None
    }

    fn apply(&self, graph: Graph) -> Result<Graph, ActionError>;
}

/// A geometric edit that can be previewed at any `t` in `[0, 1]` (`None`
/// means "fully applied", i.e. `t = 1`). Implementations project node
/// locations through a [`crate::geometry::Viewport`], compute in projected
/// space, and unproject back.
pub trait TransitionableAction {
    fn disabled(&self, _graph: &Graph) -> Option<DisabledReason> {
        None
    }

    fn step(&self, graph: Graph, t: Option<f64>) -> Result<Graph, ActionError>;
}

impl Action for Box<dyn Action + '_> {
    fn disabled(&self, graph: &Graph) -> Option<DisabledReason> {
        (**self).disabled(graph)
    }

    fn apply(&self, graph: Graph) -> Result<Graph, ActionError> {
        (**self).apply(graph)
    }
}
