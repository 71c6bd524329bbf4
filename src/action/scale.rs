//! `scale(entityIDs, pivotLoc, factor, viewport)`.

use std::collections::HashSet;

use crate::error::ActionError;
use crate::geometry::vector::{clamp_t, scale_about};
use crate::geometry::{Point2, Viewport};
use crate::graph::Graph;
use crate::id::EntityId;
use crate::model::Entity;

use super::translate::implied_moving_nodes;
use super::TransitionableAction;

pub struct Scale<'v> {
    pub entity_ids: Vec<EntityId>,
    pub pivot: Point2,
    pub factor: f64,
    pub viewport: &'v dyn Viewport,
}

impl TransitionableAction for Scale<'_> {
    fn step(&self, mut graph: Graph, t: Option<f64>) -> Result<Graph, ActionError> {
        let t = clamp_t(t);
        // interpolate the scale factor itself from 1 (no-op) to `factor`.
        let factor = 1.0 + (self.factor - 1.0) * t;
        let nodes: Vec<EntityId> = implied_moving_nodes(&self.entity_ids, &graph).into_iter().collect::<HashSet<_>>().into_iter().collect();
        for node_id in nodes {
            let mut node = graph.entity(node_id)?.as_node().cloned().ok_or(crate::error::GraphError::WrongEntityType(node_id, "node"))?;
            let projected = self.viewport.project(node.loc);
            let scaled = scale_about(projected, self.pivot, factor);
            node.loc = self.viewport.unproject(scaled);
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

    #[test]
    fn doubles_distance_from_pivot() {
        let viewport = FlatViewport::default();
        let g = Graph::new()
            .replace(Entity::Node(Node::new(EntityId::node(1), Loc::new(2.0, 0.0))))
            .unwrap();
        let action = Scale {
            entity_ids: vec![EntityId::node(1)],
            pivot: (0.0, 0.0),
            factor: 2.0,
            viewport: &viewport,
        };
        let g = action.step(g, None).unwrap();
        let node = g.entity(EntityId::node(1)).unwrap().as_node().unwrap();
        assert!((node.loc.lon - 4.0).abs() < 1e-9);
    }
}
