use super::tags::Tags;
use crate::id::{EntityId, EntityType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: EntityId,
    pub role: String,
}

impl Member {
    pub fn new(id: EntityId, role: impl Into<String>) -> Self {
        Member { id, role: role.into() }
    }

    pub fn member_type(&self) -> EntityType {
        self.id.entity_type
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub id: EntityId,
    pub version: u32,
    pub tags: Tags,
    pub visible: bool,
    pub members: Vec<Member>,
}

impl Relation {
    pub fn new(id: EntityId, members: Vec<Member>) -> Self {
        Relation {
            id,
            version: 0,
            tags: Tags::new(),
            visible: true,
            members,
        }
    }

    pub fn is_multipolygon(&self) -> bool {
        self.tags.is_value("type", "multipolygon")
    }

    pub fn is_restriction(&self) -> bool {
        self.tags.is_value("type", "restriction")
    }

    pub fn member_indices(&self, id: EntityId) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, m)| m.id == id)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn members_with_role(&self, role: &str) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(move |m| m.role == role)
    }
}
