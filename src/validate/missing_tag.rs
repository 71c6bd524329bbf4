//! `missingTag`: flags entities with no tags at all, no descriptive
//! tags, a relation missing `type`, or a way's `highway` left generic.

use crate::config::IgnoredTagConfig;
use crate::graph::Graph;
use crate::model::Entity;

use super::issue::{Issue, Severity};

pub struct MissingTagValidator<'c> {
    pub ignored_tags: &'c IgnoredTagConfig,
}

impl MissingTagValidator<'_> {
    pub fn validate(&self, entity: &Entity, _graph: &Graph) -> Vec<Issue> {
        let id = entity.id();
        if entity.tags().is_empty() {
            return vec![Issue::new("missing_tag", Some("any_tags"), Severity::Warning, vec![id], vec![])];
        }

        let mut issues = Vec::new();
        let has_descriptive = self
            .ignored_tags
            .has_interesting_tag(entity.tags().iter().map(|(k, v)| (k.to_string(), v.to_string())));
        if !has_descriptive {
            issues.push(Issue::new("missing_tag", Some("descriptive_tags"), Severity::Warning, vec![id], vec![]));
        }

        if let Entity::Relation(r) = entity {
            if !r.tags.contains_key("type") {
                issues.push(Issue::new("missing_tag", Some("relation_type"), Severity::Warning, vec![id], vec![]));
            }
        }

        if let Entity::Way(w) = entity {
            if matches!(w.tags.get("highway"), Some("yes") | Some("road")) {
                issues.push(Issue::new(
                    "missing_tag",
                    Some("highway_classification"),
                    Severity::Warning,
                    vec![id],
                    vec![("highway".to_string(), w.tags.get("highway").unwrap().to_string())],
                ));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::EntityId;
    use crate::model::node::{Loc, Node};
    use crate::model::way::Way;

    #[test]
    fn untagged_node_flags_any_tags() {
        let cfg = IgnoredTagConfig::default();
        let validator = MissingTagValidator { ignored_tags: &cfg };
        let node = Entity::Node(Node::new(EntityId::node(1), Loc::new(0.0, 0.0)));
        let g = Graph::new();
        let issues = validator.validate(&node, &g);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].subtype.as_deref(), Some("any_tags"));
    }

    #[test]
    fn generic_highway_value_flags_classification() {
        let cfg = IgnoredTagConfig::default();
        let validator = MissingTagValidator { ignored_tags: &cfg };
        let mut way = Way::new(EntityId::way(1), vec![]);
        way.tags.set("highway", "yes");
        let g = Graph::new();
        let issues = validator.validate(&Entity::Way(way), &g);
        assert!(issues.iter().any(|i| i.subtype.as_deref() == Some("highway_classification")));
    }
}
