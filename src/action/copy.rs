//! `copyEntities(ids, sourceGraph)`: deep-copies entities under
//! fresh ids, preserving shared child identity across multiple copied parents.

use std::collections::HashMap;

use crate::error::ActionError;
use crate::graph::Graph;
use crate::id::{EntityId, EntityType, IdSequence};
use crate::model::{Entity, Member};

use super::Action;

pub struct CopyEntities {
    copies: HashMap<EntityId, Entity>,
}

impl CopyEntities {
    pub fn new(ids: &[EntityId], source: &Graph, id_sequence: &IdSequence) -> Self {
        let mut old_to_new: HashMap<EntityId, EntityId> = HashMap::new();
        let mut copies: HashMap<EntityId, Entity> = HashMap::new();
        for id in ids {
            Self::copy_entity(*id, source, id_sequence, &mut old_to_new, &mut copies);
        }
        CopyEntities { copies }
    }

    fn copy_entity(
        id: EntityId,
        source: &Graph,
        id_sequence: &IdSequence,
        old_to_new: &mut HashMap<EntityId, EntityId>,
        copies: &mut HashMap<EntityId, Entity>,
    ) -> EntityId {
        if let Some(existing) = old_to_new.get(&id) {
            return *existing;
        }
        let Some(entity) = source.has_entity(id) else {
            return id;
        };
        let new_id = match id.entity_type {
            EntityType::Node => id_sequence.next_node(),
            EntityType::Way => id_sequence.next_way(),
            EntityType::Relation => id_sequence.next_relation(),
        };
        old_to_new.insert(id, new_id);

        let new_entity = match entity {
            Entity::Node(n) => {
                let mut copy = n.clone();
                copy.id = new_id;
                copy.version = 0;
                Entity::Node(copy)
            }
            Entity::Way(w) => {
                let mut copy = w.clone();
                copy.id = new_id;
                copy.version = 0;
                copy.nodes = w
                    .nodes
                    .iter()
                    .map(|child| Self::copy_entity(*child, source, id_sequence, old_to_new, copies))
                    .collect();
                Entity::Way(copy)
            }
            Entity::Relation(r) => {
                let mut copy = r.clone();
                copy.id = new_id;
                copy.version = 0;
                copy.members = r
                    .members
                    .iter()
                    .map(|m| Member::new(Self::copy_entity(m.id, source, id_sequence, old_to_new, copies), m.role.clone()))
                    .collect();
                Entity::Relation(copy)
            }
        };
        copies.insert(new_id, new_entity);
        new_id
    }

    /// old id -> new entity, for every entity touched by the copy (including
    /// transitively-copied children).
    pub fn copies(&self) -> &HashMap<EntityId, Entity> {
        &self.copies
    }
}

impl Action for CopyEntities {
    fn apply(&self, mut graph: Graph) -> Result<Graph, ActionError> {
        for entity in self.copies.values() {
            graph = graph.replace(entity.clone())?;
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::{Loc, Node};
    use crate::model::way::Way;

    #[test]
    fn shared_node_keeps_shared_identity_across_copied_ways() {
        let mut g = Graph::new();
        for (i, (x, y)) in [(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)].into_iter().enumerate() {
            g = g.replace(Entity::Node(Node::new(EntityId::node(i as i64 + 1), Loc::new(x, y)))).unwrap();
        }
        g = g.replace(Entity::Way(Way::new(EntityId::way(1), vec![EntityId::node(1), EntityId::node(2)]))).unwrap();
        g = g.replace(Entity::Way(Way::new(EntityId::way(2), vec![EntityId::node(2), EntityId::node(3)]))).unwrap();

        let seq = IdSequence::new();
        let copy = CopyEntities::new(&[EntityId::way(1), EntityId::way(2)], &g, &seq);
        let g2 = copy.apply(g).unwrap();

        let copies = copy.copies();
        let shared_node_new_id = copies
            .values()
            .filter_map(Entity::as_node)
            .find(|n| n.loc == Loc::new(1.0, 1.0))
            .map(|n| n.id)
            .unwrap();

        let ways: Vec<_> = copies.values().filter_map(Entity::as_way).collect();
        assert_eq!(ways.len(), 2);
        assert!(ways.iter().all(|w| w.nodes.contains(&shared_node_new_id)));
        assert!(g2.has_entity(shared_node_new_id).is_some());
    }
}
