//! `missingRole`: flags a whitespace or empty role on a member of a
//! `type=multipolygon` relation.

use crate::graph::Graph;
use crate::model::Entity;

use super::issue::{Issue, Severity};

pub struct MissingRoleValidator;

impl MissingRoleValidator {
    pub fn validate(&self, entity: &Entity, _graph: &Graph) -> Vec<Issue> {
        let Entity::Relation(relation) = entity else {
            return vec![];
        };
        if !relation.is_multipolygon() {
            return vec![];
        }

        relation
            .members
            .iter()
            .filter(|m| m.role.trim().is_empty())
            .map(|m| Issue::new("missing_role", None, Severity::Warning, vec![relation.id, m.id], vec![]))
            .collect()
    }
}
