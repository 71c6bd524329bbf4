//! `reflect(reflectIDs, viewport)`: reflects across the long or
//! short axis of the Smallest Surrounding Rectangle of all child nodes.

use std::collections::HashSet;

use crate::error::{ActionError, DisabledReason};
use crate::geometry::vector::reflect_across;
use crate::geometry::{smallest_surrounding_rectangle, Viewport};
use crate::graph::Graph;
use crate::id::EntityId;
use crate::model::Entity;

use super::translate::implied_moving_nodes;
use super::TransitionableAction;

pub struct Reflect<'v> {
    pub reflect_ids: Vec<EntityId>,
    pub use_long_axis: bool,
    pub viewport: &'v dyn Viewport,
}

impl Reflect<'_> {
    fn nodes(&self, graph: &Graph) -> Vec<EntityId> {
        implied_moving_nodes(&self.reflect_ids, graph).into_iter().collect::<HashSet<_>>().into_iter().collect()
    }
}

impl TransitionableAction for Reflect<'_> {
    fn disabled(&self, graph: &Graph) -> Option<DisabledReason> {
        let nodes = self.nodes(graph);
        if nodes.len() < 2 {
            Some(DisabledReason::NotEligible)
        } else {
            None
        }
    }

    fn step(&self, mut graph: Graph, _t: Option<f64>) -> Result<Graph, ActionError> {
        let nodes = self.nodes(&graph);
        let projected: Vec<_> = nodes
            .iter()
            .filter_map(|id| graph.has_entity(*id).and_then(Entity::as_node))
            .map(|n| self.viewport.project(n.loc))
            .collect();
        let ssr = smallest_surrounding_rectangle(&projected).ok_or(ActionError::Disabled(DisabledReason::NotEligible))?;
        let axis = ssr.axis(self.use_long_axis);

        for node_id in &nodes {
            let mut node = graph.entity(*node_id)?.as_node().cloned().ok_or(crate::error::GraphError::WrongEntityType(*node_id, "node"))?;
            let projected = self.viewport.project(node.loc);
            let reflected = reflect_across(projected, ssr.center, axis);
            node.loc = self.viewport.unproject(reflected);
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
    use crate::model::way::Way;

    #[test]
    fn reflecting_once_matches_expected_corners_and_twice_restores_original() {
        let viewport = FlatViewport::default();
        let pts = [(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (1.0, 2.0)];
        let mut g = Graph::new();
        let mut ids = vec![];
        for (i, (x, y)) in pts.iter().enumerate() {
            let id = EntityId::node(i as i64 + 1);
            g = g.replace(Entity::Node(Node::new(id, Loc::new(*x, *y)))).unwrap();
            ids.push(id);
        }
        g = g.replace(Entity::Way(Way::new(EntityId::way(1), ids.clone()))).unwrap();

        let action = Reflect {
            reflect_ids: vec![EntityId::way(1)],
            use_long_axis: true,
            viewport: &viewport,
        };
        let once = action.step(g.clone(), None).unwrap();

        let expected = [(0.0, 2.0), (4.0, 2.0), (4.0, 0.0), (1.0, 0.0)];
        for (id, (x, y)) in ids.iter().zip(expected.iter()) {
            let loc = once.entity(*id).unwrap().as_node().unwrap().loc;
            assert!((loc.lon - x).abs() < 1e-6, "lon: expected {x}, got {}", loc.lon);
            assert!((loc.lat - y).abs() < 1e-6, "lat: expected {y}, got {}", loc.lat);
        }

        let twice = action.step(once, None).unwrap();

        for id in ids {
            let before = g.entity(id).unwrap().as_node().unwrap().loc;
            let after = twice.entity(id).unwrap().as_node().unwrap().loc;
            assert!((before.lon - after.lon).abs() < 1e-6);
            assert!((before.lat - after.lat).abs() < 1e-6);
        }
    }
}
