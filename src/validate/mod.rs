//! Validators: pure functions `(entity, graph) -> issue[]`, run off a
//! shared [`crate::config::EditorConfiguration`].

pub mod duplicate_way_segments;
pub mod help_request;
pub mod incompatible_source;
pub mod issue;
pub mod missing_role;
pub mod missing_tag;
pub mod outdated_tags;

pub use duplicate_way_segments::DuplicateWaySegmentsValidator;
pub use help_request::HelpRequestValidator;
pub use incompatible_source::IncompatibleSourceValidator;
pub use issue::{Issue, Severity};
pub use missing_role::MissingRoleValidator;
pub use missing_tag::MissingTagValidator;
pub use outdated_tags::OutdatedTagsValidator;

use crate::config::EditorConfiguration;
use crate::graph::Graph;
use crate::model::Entity;

/// runs every built-in validator over one entity, per the configured tables.
pub fn validate_entity(entity: &Entity, graph: &Graph, config: &EditorConfiguration) -> Vec<Issue> {
    let mut issues = Vec::new();
    issues.extend(MissingTagValidator { ignored_tags: &config.ignored_tags }.validate(entity, graph));
    issues.extend(IncompatibleSourceValidator {
        denylist: &config.incompatible_sources,
        exceptions: &config.incompatible_source_exceptions,
    }
    .validate(entity));
    issues.extend(OutdatedTagsValidator { table: &config.deprecated_tags, area_keys: &config.area_keys }.validate(entity, graph));
    issues.extend(MissingRoleValidator.validate(entity, graph));
    issues.extend(DuplicateWaySegmentsValidator.validate(entity, graph));
    issues.extend(HelpRequestValidator.validate(entity, graph));
    issues
}
