//! atomic actions: single-field edits to a way's node list or a
//! relation's member list. these never touch coordinates and are never
//! transitionable.

use crate::error::{ActionError, GraphError};
use crate::graph::Graph;
use crate::id::EntityId;
use crate::model::{Entity, Member, Tags};

use super::Action;

/// `addVertex(wayID, nodeID, index)`.
pub struct AddVertex {
    pub way_id: EntityId,
    pub node_id: EntityId,
    pub index: usize,
}

impl Action for AddVertex {
    fn apply(&self, graph: Graph) -> Result<Graph, ActionError> {
        let mut way = graph.entity(self.way_id)?.as_way().cloned().ok_or(GraphError::WrongEntityType(self.way_id, "way"))?;
        if self.index > way.nodes.len() {
            return Err(GraphError::NodeIndexOutOfBounds {
                way: self.way_id,
                index: self.index,
                len: way.nodes.len(),
            }
            .into());
        }
        way.nodes.insert(self.index, self.node_id);
        Ok(graph.replace(Entity::Way(way))?)
    }
}

/// `changeTags(entityID, tags)`.
pub struct ChangeTags {
    pub entity_id: EntityId,
    pub tags: Tags,
}

impl Action for ChangeTags {
    fn apply(&self, graph: Graph) -> Result<Graph, ActionError> {
        let mut entity = graph.entity(self.entity_id)?.clone();
        *entity.tags_mut() = self.tags.clone();
        Ok(graph.replace(entity)?)
    }
}

/// `changeMember(relationID, member, index)`.
pub struct ChangeMember {
    pub relation_id: EntityId,
    pub member: Member,
    pub index: usize,
}

impl Action for ChangeMember {
    fn apply(&self, graph: Graph) -> Result<Graph, ActionError> {
        let mut relation = graph
            .entity(self.relation_id)?
            .as_relation()
            .cloned()
            .ok_or(GraphError::WrongEntityType(self.relation_id, "relation"))?;
        if self.index >= relation.members.len() {
            return Err(GraphError::MemberIndexOutOfBounds {
                relation: self.relation_id,
                index: self.index,
                len: relation.members.len(),
            }
            .into());
        }
        relation.members[self.index] = self.member.clone();
        Ok(graph.replace(Entity::Relation(relation))?)
    }
}

/// produced by `split` to describe a way that was cut into two: the
/// new way must be inserted beside every occurrence of the original in every
/// relation that references it, so route member order stays contiguous.
#[derive(Debug, Clone)]
pub struct InsertPair {
    pub original_id: EntityId,
    pub inserted_id: EntityId,
}

/// `addMember(relationID, member, index?, insertPair?)`.
pub struct AddMember {
    pub relation_id: EntityId,
    pub member: Member,
    pub index: Option<usize>,
    pub insert_pair: Option<InsertPair>,
}

/// PTv2 route relations keep stop/platform members ahead of way/node/relation
/// members; this orders a role for that comparison.
fn ptv2_rank(role: &str) -> u8 {
    if role == "stop" || role == "platform" || role.starts_with("stop_") || role.starts_with("platform_") {
        0
    } else {
        1
    }
}

impl Action for AddMember {
    fn apply(&self, graph: Graph) -> Result<Graph, ActionError> {
        let mut relation = graph
            .entity(self.relation_id)?
            .as_relation()
            .cloned()
            .ok_or(GraphError::WrongEntityType(self.relation_id, "relation"))?;

        if let Some(pair) = &self.insert_pair {
            // insert the new way beside every occurrence of the original,
            // preserving PTv2 stop/platform-before-way ordering locally.
            let mut i = 0;
            while i < relation.members.len() {
                if relation.members[i].id == pair.original_id {
                    let sibling = Member::new(pair.inserted_id, relation.members[i].role.clone());
                    let insert_at = if ptv2_rank(&sibling.role) == 0 { i } else { i + 1 };
                    relation.members.insert(insert_at, sibling);
                    i += 2;
                } else {
                    i += 1;
                }
            }
            return Ok(graph.replace(Entity::Relation(relation))?);
        }

        match self.index {
            Some(idx) if idx <= relation.members.len() => relation.members.insert(idx, self.member.clone()),
            Some(idx) => {
                return Err(GraphError::MemberIndexOutOfBounds {
                    relation: self.relation_id,
                    index: idx,
                    len: relation.members.len(),
                }
                .into())
            }
            None => relation.members.push(self.member.clone()),
        }
        Ok(graph.replace(Entity::Relation(relation))?)
    }
}

/// `moveMember(relationID, from, to)`.
pub struct MoveMember {
    pub relation_id: EntityId,
    pub from: usize,
    pub to: usize,
}

impl Action for MoveMember {
    fn apply(&self, graph: Graph) -> Result<Graph, ActionError> {
        let mut relation = graph
            .entity(self.relation_id)?
            .as_relation()
            .cloned()
            .ok_or(GraphError::WrongEntityType(self.relation_id, "relation"))?;
        let len = relation.members.len();
        if self.from >= len {
            return Err(GraphError::MemberIndexOutOfBounds {
                relation: self.relation_id,
                index: self.from,
                len,
            }
            .into());
        }
        let member = relation.members.remove(self.from);
        let to = self.to.min(relation.members.len());
        relation.members.insert(to, member);
        Ok(graph.replace(Entity::Relation(relation))?)
    }
}

/// `deleteMember(relationID, index)`; deletes the relation entirely if it
/// would become empty.
pub struct DeleteMember {
    pub relation_id: EntityId,
    pub index: usize,
}

impl Action for DeleteMember {
    fn apply(&self, graph: Graph) -> Result<Graph, ActionError> {
        let mut relation = graph
            .entity(self.relation_id)?
            .as_relation()
            .cloned()
            .ok_or(GraphError::WrongEntityType(self.relation_id, "relation"))?;
        if self.index >= relation.members.len() {
            return Err(GraphError::MemberIndexOutOfBounds {
                relation: self.relation_id,
                index: self.index,
                len: relation.members.len(),
            }
            .into());
        }
        relation.members.remove(self.index);
        if relation.members.is_empty() {
            Ok(graph.remove(self.relation_id)?)
        } else {
            Ok(graph.replace(Entity::Relation(relation))?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::{Loc, Node};
    use crate::model::way::Way;

    fn base_graph() -> Graph {
        Graph::new()
            .replace(Entity::Node(Node::new(EntityId::node(1), Loc::new(0.0, 0.0))))
            .unwrap()
            .replace(Entity::Node(Node::new(EntityId::node(2), Loc::new(1.0, 1.0))))
            .unwrap()
            .replace(Entity::Way(Way::new(EntityId::way(1), vec![EntityId::node(1), EntityId::node(2)])))
            .unwrap()
    }

    #[test]
    fn add_vertex_inserts_at_index() {
        let g = base_graph();
        let action = AddVertex {
            way_id: EntityId::way(1),
            node_id: EntityId::node(3),
            index: 1,
        };
        let g = action.apply(g).unwrap();
        let way = g.entity(EntityId::way(1)).unwrap().as_way().unwrap();
        assert_eq!(way.nodes, vec![EntityId::node(1), EntityId::node(3), EntityId::node(2)]);
    }

    #[test]
    fn delete_member_removes_relation_when_empty() {
        let g = base_graph();
        let relation = Entity::Relation(crate::model::Relation::new(
            EntityId::relation(1),
            vec![Member::new(EntityId::way(1), "outer")],
        ));
        let g = g.replace(relation).unwrap();
        let action = DeleteMember {
            relation_id: EntityId::relation(1),
            index: 0,
        };
        let g = action.apply(g).unwrap();
        assert!(g.has_entity(EntityId::relation(1)).is_none());
    }

    #[test]
    fn insert_pair_places_new_way_beside_original() {
        let g = base_graph();
        let relation = Entity::Relation(crate::model::Relation::new(
            EntityId::relation(1),
            vec![Member::new(EntityId::way(1), ""), Member::new(EntityId::way(2), "")],
        ));
        let g = g.replace(relation).unwrap();
        let action = AddMember {
            relation_id: EntityId::relation(1),
            member: Member::new(EntityId::way(3), ""),
            index: None,
            insert_pair: Some(InsertPair {
                original_id: EntityId::way(1),
                inserted_id: EntityId::way(3),
            }),
        };
        let g = action.apply(g).unwrap();
        let relation = g.entity(EntityId::relation(1)).unwrap().as_relation().unwrap();
        assert_eq!(
            relation.members.iter().map(|m| m.id).collect::<Vec<_>>(),
            vec![EntityId::way(1), EntityId::way(3), EntityId::way(2)]
        );
    }
}
