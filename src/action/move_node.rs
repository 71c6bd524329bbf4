//! `moveNode(nodeID, toLoc)`: the simplest transitionable action,
//! interpolating a single node's location toward a target.

use crate::error::ActionError;
use crate::geometry::vector::{clamp_t, lerp};
use crate::geometry::Viewport;
use crate::graph::Graph;
use crate::id::EntityId;
use crate::model::{Entity, Loc};

use super::TransitionableAction;

pub struct MoveNode<'v> {
    pub node_id: EntityId,
    pub to_loc: Loc,
    pub viewport: &'v dyn Viewport,
}

impl TransitionableAction for MoveNode<'_> {
    fn step(&self, graph: Graph, t: Option<f64>) -> Result<Graph, ActionError> {
        let t = clamp_t(t);
        let mut node = graph.entity(self.node_id)?.as_node().cloned().ok_or(crate::error::GraphError::WrongEntityType(self.node_id, "node"))?;
        let from = self.viewport.project(node.loc);
        let to = self.viewport.project(self.to_loc);
        node.loc = self.viewport.unproject(lerp(from, to, t));
        Ok(graph.replace(Entity::Node(node))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FlatViewport;
    use crate::model::node::Node;

    #[test]
    fn halfway_interpolates_location() {
        let viewport = FlatViewport::default();
        let g = Graph::new()
            .replace(Entity::Node(Node::new(EntityId::node(1), Loc::new(0.0, 0.0))))
            .unwrap();
        let action = MoveNode {
            node_id: EntityId::node(1),
            to_loc: Loc::new(10.0, 0.0),
            viewport: &viewport,
        };
        let g = action.step(g, Some(0.5)).unwrap();
        let node = g.entity(EntityId::node(1)).unwrap().as_node().unwrap();
        assert!((node.loc.lon - 5.0).abs() < 1e-9);
    }
}
