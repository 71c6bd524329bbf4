use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

/// which of the three OSM element kinds an [`EntityId`] refers to.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    #[default]
    Node,
    Way,
    Relation,
}

impl EntityType {
    const fn prefix(&self) -> char {
        match self {
            EntityType::Node => 'n',
            EntityType::Way => 'w',
            EntityType::Relation => 'r',
        }
    }
}

impl Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EntityType::Node => "node",
            EntityType::Way => "way",
            EntityType::Relation => "relation",
        };
        write!(f, "{s}")
    }
}

/// a tagged `(type, signed number)` identifier, avoiding the
/// string-parse cost the original pays on every lookup. the sign of the
/// number carries the same meaning OSM itself uses: negative ids are local
/// (unsaved), positive ids were assigned by the server.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId {
    pub entity_type: EntityType,
    pub value: i64,
}

impl EntityId {
    pub fn new(entity_type: EntityType, value: i64) -> Self {
        EntityId { entity_type, value }
    }

    pub fn node(value: i64) -> Self {
        EntityId::new(EntityType::Node, value)
    }

    pub fn way(value: i64) -> Self {
        EntityId::new(EntityType::Way, value)
    }

    pub fn relation(value: i64) -> Self {
        EntityId::new(EntityType::Relation, value)
    }

    /// true for negative ids: entities created locally in this editing
    /// session that have never been assigned a server id.
    pub fn is_local(&self) -> bool {
        self.value < 0
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.entity_type.prefix(), self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid entity id '{0}'")]
pub struct ParseEntityIdError(String);

impl FromStr for EntityId {
    type Err = ParseEntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let entity_type = match chars.next() {
            Some('n') => EntityType::Node,
            Some('w') => EntityType::Way,
            Some('r') => EntityType::Relation,
            _ => return Err(ParseEntityIdError(s.to_string())),
        };
        let value = chars
            .as_str()
            .parse::<i64>()
            .map_err(|_| ParseEntityIdError(s.to_string()))?;
        Ok(EntityId::new(entity_type, value))
    }
}

/// per-type monotonic counter minting negative (local) ids for entities
/// created during an editing session, mirroring how new nodes/ways/relations
/// are assigned ids before the first upload.
#[derive(Debug, Default)]
pub struct IdSequence {
    node: AtomicI64,
    way: AtomicI64,
    relation: AtomicI64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(counter: &AtomicI64, entity_type: EntityType) -> EntityId {
        let n = counter.fetch_sub(1, Ordering::Relaxed) - 1;
        EntityId::new(entity_type, n)
    }

    pub fn next_node(&self) -> EntityId {
        Self::next(&self.node, EntityType::Node)
    }

    pub fn next_way(&self) -> EntityId {
        Self::next(&self.way, EntityType::Way)
    }

    pub fn next_relation(&self) -> EntityId {
        Self::next(&self.relation, EntityType::Relation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_display_and_fromstr() {
        let id = EntityId::way(42);
        let s = id.to_string();
        assert_eq!(s, "w42");
        assert_eq!(s.parse::<EntityId>().unwrap(), id);
    }

    #[test]
    fn local_ids_are_negative() {
        let seq = IdSequence::new();
        let a = seq.next_node();
        let b = seq.next_node();
        assert!(a.is_local());
        assert_ne!(a, b);
        assert!(a.value > b.value, "ids count down: {a} then {b}");
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!("x5".parse::<EntityId>().is_err());
        assert!("n".parse::<EntityId>().is_err());
    }
}
