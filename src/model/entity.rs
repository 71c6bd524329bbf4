use super::node::Node;
use super::relation::Relation;
use super::tags::Tags;
use super::way::{Affix, Way};
use crate::config::{AreaKeyConfig, IgnoredTagConfig};
use crate::graph::Graph;
use crate::id::{EntityId, EntityType};
use serde::{Deserialize, Serialize};

/// one of the three variants sharing the common header `{id, version, tags,
/// visible}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entity {
    Node(Node),
    Way(Way),
    Relation(Relation),
}

/// `geometry(entity, graph)`: one of `point | vertex | line | area |
/// relation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryType {
    Point,
    Vertex,
    Line,
    Area,
    Relation,
}

impl Entity {
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Node(n) => n.id,
            Entity::Way(w) => w.id,
            Entity::Relation(r) => r.id,
        }
    }

    pub fn entity_type(&self) -> EntityType {
        self.id().entity_type
    }

    pub fn tags(&self) -> &Tags {
        match self {
            Entity::Node(n) => &n.tags,
            Entity::Way(w) => &w.tags,
            Entity::Relation(r) => &r.tags,
        }
    }

    pub fn tags_mut(&mut self) -> &mut Tags {
        match self {
            Entity::Node(n) => &mut n.tags,
            Entity::Way(w) => &mut w.tags,
            Entity::Relation(r) => &mut r.tags,
        }
    }

    pub fn version(&self) -> u32 {
        match self {
            Entity::Node(n) => n.version,
            Entity::Way(w) => w.version,
            Entity::Relation(r) => r.version,
        }
    }

    pub fn visible(&self) -> bool {
        match self {
            Entity::Node(n) => n.visible,
            Entity::Way(w) => w.visible,
            Entity::Relation(r) => r.visible,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Entity::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_way(&self) -> Option<&Way> {
        match self {
            Entity::Way(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_relation(&self) -> Option<&Relation> {
        match self {
            Entity::Relation(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_way_mut(&mut self) -> Option<&mut Way> {
        match self {
            Entity::Way(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_relation_mut(&mut self) -> Option<&mut Relation> {
        match self {
            Entity::Relation(r) => Some(r),
            _ => None,
        }
    }

    /// `isClosed(way)`: always false for nodes and relations.
    pub fn is_closed(&self) -> bool {
        matches!(self, Entity::Way(w) if w.is_closed())
    }

    /// `isArea(way)`: closed AND tags match the configured area-keys table.
    pub fn is_area(&self, area_keys: &AreaKeyConfig) -> bool {
        match self {
            Entity::Way(w) => {
                w.is_closed()
                    && area_keys.matches(w.tags.iter().map(|(k, v)| (k.to_string(), v.to_string())))
            }
            _ => false,
        }
    }

    pub fn affix(&self, node_id: EntityId) -> Option<Affix> {
        match self {
            Entity::Way(w) => w.affix(node_id),
            _ => None,
        }
    }

    /// `hasInterestingTags(entity)`: any tag outside the configured ignore set.
    pub fn has_interesting_tags(&self, ignored: &IgnoredTagConfig) -> bool {
        ignored.has_interesting_tag(self.tags().iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }

    /// `geometry(entity, graph)`.
    pub fn geometry(&self, graph: &Graph, area_keys: &AreaKeyConfig) -> GeometryType {
        match self {
            Entity::Node(_) => {
                if graph.parent_ways(self.id()).is_empty() {
                    GeometryType::Point
                } else {
                    GeometryType::Vertex
                }
            }
            Entity::Way(_) => {
                if self.is_area(area_keys) {
                    GeometryType::Area
                } else {
                    GeometryType::Line
                }
            }
            Entity::Relation(_) => GeometryType::Relation,
        }
    }

    /// `isOldMultipolygonOuterMember(way, graph)`: the way carries area-like
    /// tags and is the sole `outer` member of a `type=multipolygon` relation
    /// whose own tags are degenerate (carry nothing but `type`).
    pub fn is_old_multipolygon_outer_member(&self, graph: &Graph, area_keys: &AreaKeyConfig) -> bool {
        let way = match self.as_way() {
            Some(w) => w,
            None => return false,
        };
        if !self.is_area(area_keys) {
            return false;
        }
        graph.parent_relations(self.id()).into_iter().any(|rel_id| {
            let Some(Entity::Relation(rel)) = graph.has_entity(rel_id) else {
                return false;
            };
            if !rel.is_multipolygon() {
                return false;
            }
            let outers: Vec<_> = rel.members_with_role("outer").collect();
            let is_sole_outer = outers.len() == 1 && outers[0].id == way.id;
            let degenerate_relation_tags = rel.tags.iter().all(|(k, _)| k == "type");
            is_sole_outer && degenerate_relation_tags
        })
    }
}

impl From<Node> for Entity {
    fn from(n: Node) -> Self {
        Entity::Node(n)
    }
}

impl From<Way> for Entity {
    fn from(w: Way) -> Self {
        Entity::Way(w)
    }
}

impl From<Relation> for Entity {
    fn from(r: Relation) -> Self {
        Entity::Relation(r)
    }
}
