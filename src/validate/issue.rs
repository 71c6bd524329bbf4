//! the shape every validator returns: `{type, subtype?, severity,
//! entityIds[], hash, ...data}`, with a deterministic hash for dedup.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::id::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub issue_type: String,
    pub subtype: Option<String>,
    pub severity: Severity,
    pub entity_ids: Vec<EntityId>,
    pub data: Vec<(String, String)>,
    pub hash: u64,
}

impl Issue {
    /// builds an issue and computes its dedup hash over `(type, subtype,
    /// sorted entityIds, key data)`. `entity_ids` and `data` need not arrive
    /// pre-sorted; they're sorted here so callers never have to think about
    /// hash stability.
    pub fn new(
        issue_type: impl Into<String>,
        subtype: Option<&str>,
        severity: Severity,
        mut entity_ids: Vec<EntityId>,
        mut data: Vec<(String, String)>,
    ) -> Self {
        let issue_type = issue_type.into();
        let subtype = subtype.map(str::to_string);
        entity_ids.sort();
        data.sort();

        let mut hasher = DefaultHasher::new();
        issue_type.hash(&mut hasher);
        subtype.hash(&mut hasher);
        for id in &entity_ids {
            id.to_string().hash(&mut hasher);
        }
        for (k, v) in &data {
            k.hash(&mut hasher);
            v.hash(&mut hasher);
        }
        let hash = hasher.finish();

        Issue { issue_type, subtype, severity, entity_ids, data, hash }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_issues_hash_identically_regardless_of_id_order() {
        let a = Issue::new("missing_tag", Some("any_tags"), Severity::Warning, vec![EntityId::way(2), EntityId::way(1)], vec![]);
        let b = Issue::new("missing_tag", Some("any_tags"), Severity::Warning, vec![EntityId::way(1), EntityId::way(2)], vec![]);
        assert_eq!(a.hash, b.hash);
    }

    #[test]
    fn different_subtype_changes_hash() {
        let a = Issue::new("missing_tag", Some("any_tags"), Severity::Warning, vec![EntityId::way(1)], vec![]);
        let b = Issue::new("missing_tag", Some("descriptive_tags"), Severity::Warning, vec![EntityId::way(1)], vec![]);
        assert_ne!(a.hash, b.hash);
    }
}
