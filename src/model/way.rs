use super::tags::Tags;
use crate::id::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Way {
    pub id: EntityId,
    pub version: u32,
    pub tags: Tags,
    pub visible: bool,
    pub nodes: Vec<EntityId>,
}

impl Way {
    pub fn new(id: EntityId, nodes: Vec<EntityId>) -> Self {
        Way {
            id,
            version: 0,
            tags: Tags::new(),
            visible: true,
            nodes,
        }
    }

    /// first node-id equals last, and there is more than one node.
    pub fn is_closed(&self) -> bool {
        self.nodes.len() > 1 && self.nodes.first() == self.nodes.last()
    }

    /// `'prefix'` | `'suffix'` | `None` for endpoint membership of `node_id`
    /// in an unclosed way.
    pub fn affix(&self, node_id: EntityId) -> Option<Affix> {
        if self.is_closed() {
            return None;
        }
        if self.nodes.first() == Some(&node_id) {
            Some(Affix::Prefix)
        } else if self.nodes.last() == Some(&node_id) {
            Some(Affix::Suffix)
        } else {
            None
        }
    }

    pub fn first_node(&self) -> Option<EntityId> {
        self.nodes.first().copied()
    }

    pub fn last_node(&self) -> Option<EntityId> {
        self.nodes.last().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affix {
    Prefix,
    Suffix,
}
