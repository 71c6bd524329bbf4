//! `merge(ids)`: merges a set of point nodes into a single way,
//! moving their tags onto the way and preserving one node's coordinates.

use crate::error::{ActionError, DisabledReason, GraphError};
use crate::graph::Graph;
use crate::id::EntityId;
use crate::model::{Entity, Tags};

use super::Action;

pub struct Merge {
    pub ids: Vec<EntityId>,
}

impl Merge {
    fn target_way(&self, graph: &Graph) -> Option<EntityId> {
        self.ids.iter().copied().find(|id| matches!(graph.has_entity(*id), Some(Entity::Way(_))))
    }

    fn has_relation(&self, graph: &Graph) -> bool {
        self.ids.iter().any(|id| matches!(graph.has_entity(*id), Some(Entity::Relation(_))))
    }

    fn way_count(&self, graph: &Graph) -> usize {
        self.ids.iter().filter(|id| matches!(graph.has_entity(**id), Some(Entity::Way(_)))).count()
    }
}

impl Action for Merge {
    fn disabled(&self, graph: &Graph) -> Option<DisabledReason> {
        let way_count = self.way_count(graph);
        if self.has_relation(graph) || way_count != 1 {
            return Some(DisabledReason::NotEligible);
        }
        None
    }

    fn apply(&self, mut graph: Graph) -> Result<Graph, ActionError> {
        let way_id = self.target_way(&graph).ok_or(ActionError::Disabled(DisabledReason::NotEligible))?;

        let mut merged_tags = Tags::new();
        for id in &self.ids {
            if let Some(entity) = graph.has_entity(*id) {
                merged_tags = merged_tags.merged_with(entity.tags());
            }
        }

        let mut way = graph.entity(way_id)?.as_way().cloned().ok_or(GraphError::WrongEntityType(way_id, "way"))?;
        way.tags = way.tags.merged_with(&merged_tags);
        graph = graph.replace(Entity::Way(way))?;
        for id in &self.ids {
            if *id != way_id {
                graph = graph.remove(*id)?;
            }
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
    fn merges_point_tags_onto_existing_way() {
        let mut g = Graph::new();
        let mut n1 = Node::new(EntityId::node(1), Loc::new(0.0, 0.0));
        n1.tags.set("amenity", "cafe");
        g = g.replace(Entity::Node(n1)).unwrap();
        g = g.replace(Entity::Node(Node::new(EntityId::node(2), Loc::new(1.0, 1.0)))).unwrap();
        g = g.replace(Entity::Way(Way::new(EntityId::way(1), vec![EntityId::node(1), EntityId::node(2)]))).unwrap();

        let action = Merge { ids: vec![EntityId::node(1), EntityId::way(1)] };
        let g = action.apply(g).unwrap();
        let way = g.entity(EntityId::way(1)).unwrap().as_way().unwrap();
        assert_eq!(way.tags.get("amenity"), Some("cafe"));
    }
}
