//! `rotate(entityIDs, pivot, angle, viewport)`.

use std::collections::HashSet;

use crate::error::ActionError;
use crate::geometry::vector::{clamp_t, rotate_about};
use crate::geometry::{Point2, Viewport};
use crate::graph::Graph;
use crate::id::EntityId;
use crate::model::Entity;

use super::translate::implied_moving_nodes;
use super::TransitionableAction;

pub struct Rotate<'v> {
    pub entity_ids: Vec<EntityId>,
    pub pivot: Point2,
    pub angle: f64,
    pub viewport: &'v dyn Viewport,
}

impl TransitionableAction for Rotate<'_> {
    fn step(&self, mut graph: Graph, t: Option<f64>) -> Result<Graph, ActionError> {
        let t = clamp_t(t);
        let angle = self.angle * t;
        let nodes: Vec<EntityId> = implied_moving_nodes(&self.entity_ids, &graph).into_iter().collect::<HashSet<_>>().into_iter().collect();
        for node_id in nodes {
            let mut node = graph.entity(node_id)?.as_node().cloned().ok_or(crate::error::GraphError::WrongEntityType(node_id, "node"))?;
            let projected = self.viewport.project(node.loc);
            let rotated = rotate_about(projected, self.pivot, angle);
            node.loc = self.viewport.unproject(rotated);
            graph = graph.replace(Entity::Node(node))?;
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FlatViewport;
    use crate::model::node::{Loc, Node};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn rotate_quarter_turn_about_origin() {
        let viewport = FlatViewport::default();
        let g = Graph::new()
            .replace(Entity::Node(Node::new(EntityId::node(1), Loc::new(1.0, 0.0))))
            .unwrap();
        let action = Rotate {
            entity_ids: vec![EntityId::node(1)],
            pivot: (0.0, 0.0),
            angle: FRAC_PI_2,
            viewport: &viewport,
        };
        let g = action.step(g, None).unwrap();
        let node = g.entity(EntityId::node(1)).unwrap().as_node().unwrap();
        assert!((node.loc.lon - 0.0).abs() < 1e-9);
        assert!((node.loc.lat - 1.0).abs() < 1e-9);
    }
}
