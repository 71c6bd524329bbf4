use crate::id::EntityId;
use thiserror::Error;

/// errors raised by the [`crate::graph::Graph`] overlay itself. these are
/// programming errors: a caller that has validated its inputs against the
/// graph invariants should never observe one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("entity '{0}' not found in graph")]
    MissingEntity(EntityId),
    #[error("mutation attempted on a committed (frozen) graph")]
    Frozen,
    #[error("expected entity '{0}' to be a {1}")]
    WrongEntityType(EntityId, &'static str),
    #[error("index {index} out of bounds for {len} members of relation '{relation}'")]
    MemberIndexOutOfBounds {
        relation: EntityId,
        index: usize,
        len: usize,
    },
    #[error("index {index} out of bounds for {len} nodes of way '{way}'")]
    NodeIndexOutOfBounds {
        way: EntityId,
        index: usize,
        len: usize,
    },
}

/// the reason an action refuses to run, returned from `disabled(graph)`.
/// modeled as a tagged variant rather than the original
/// symbolic strings, but `Display` reproduces those tokens so logs and any
/// UI mapping keyed off of them keep working unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisabledReason {
    NotEligible,
    TooBendy,
    StraightEnough,
    NondirectionalNode,
}

impl std::fmt::Display for DisabledReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DisabledReason::NotEligible => "not_eligible",
            DisabledReason::TooBendy => "too_bendy",
            DisabledReason::StraightEnough => "straight_enough",
            DisabledReason::NondirectionalNode => "nondirectional_node",
        };
        write!(f, "{s}")
    }
}

/// errors raised while applying an action. these are distinct from
/// [`DisabledReason`]: `disabled()` is consulted before an action runs and
/// never throws, while an `ActionError` means the action was invoked despite
/// being inapplicable, or the graph changed out from under the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("action is disabled: {0}")]
    Disabled(DisabledReason),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("{0}")]
    InvalidArguments(String),
}
