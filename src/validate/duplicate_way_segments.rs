//! `duplicateWaySegments`: reserved for a future rule flagging ways
//! that retrace another way's node sequence. Not yet implemented upstream.

use crate::graph::Graph;
use crate::model::Entity;

use super::issue::Issue;

pub struct DuplicateWaySegmentsValidator;

impl DuplicateWaySegmentsValidator {
    pub fn validate(&self, _entity: &Entity, _graph: &Graph) -> Vec<Issue> {
        vec![]
    }
}
