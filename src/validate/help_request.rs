//! `helpRequest`: reserved for a future rule surfacing `fixme`/`note`
//! style help requests left on an entity. Not yet implemented upstream.

use crate::graph::Graph;
use crate::model::Entity;

use super::issue::Issue;

pub struct HelpRequestValidator;

impl HelpRequestValidator {
    pub fn validate(&self, _entity: &Entity, _graph: &Graph) -> Vec<Issue> {
        vec![]
    }
}
