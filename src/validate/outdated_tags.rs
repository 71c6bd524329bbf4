//! `outdatedTags`: runs the deprecated-tag rule table, plus a
//! dedicated check for old-style (degenerate-relation) multipolygon tagging.

use crate::config::{AreaKeyConfig, DeprecatedTagTable};
use crate::graph::Graph;
use crate::model::Entity;

use super::issue::{Issue, Severity};

pub struct OutdatedTagsValidator<'c> {
    pub table: &'c DeprecatedTagTable,
    pub area_keys: &'c AreaKeyConfig,
}

impl OutdatedTagsValidator<'_> {
    pub fn validate(&self, entity: &Entity, graph: &Graph) -> Vec<Issue> {
        let mut issues = Vec::new();
        for fix in self.table.check_all(entity.tags()) {
            let mut data = fix.set.clone();
            for removed in &fix.remove {
                data.push((removed.clone(), String::new()));
            }
            issues.push(Issue::new("outdated_tags", None, Severity::Warning, vec![entity.id()], data));
        }

        if entity.is_old_multipolygon_outer_member(graph, self.area_keys) {
            issues.push(Issue::new(
                "outdated_tags",
                Some("old_multipolygon_tagging"),
                Severity::Warning,
                vec![entity.id()],
                vec![],
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::EntityId;
    use crate::model::way::Way;

    #[test]
    fn deprecated_tag_rule_produces_issue() {
        let table = DeprecatedTagTable::with_defaults();
        let area_keys = AreaKeyConfig::default();
        let validator = OutdatedTagsValidator { table: &table, area_keys: &area_keys };
        let mut way = Way::new(EntityId::way(1), vec![]);
        way.tags.set("highway", "no");
        let g = Graph::new();
        let issues = validator.validate(&Entity::Way(way), &g);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].data.contains(&("highway".to_string(), "road".to_string())));
    }
}
