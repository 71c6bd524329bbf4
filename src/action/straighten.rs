//! `straightenNodes(nodeIDs, viewport)` and `straightenWay(wayIDs, viewport)`
//!: snap nodes onto the long axis of their Smallest Surrounding
//! Rectangle.

use crate::error::{ActionError, DisabledReason};
use crate::geometry::vector::{clamp_t, lerp, project_onto_axis};
use crate::geometry::{smallest_surrounding_rectangle, Viewport};
use crate::graph::Graph;
use crate::id::EntityId;
use crate::model::Entity;

use super::TransitionableAction;

const STRAIGHT_ENOUGH_THRESHOLD: f64 = 1e-4;

/// `straightenNodes(nodeIDs, viewport)`.
pub struct StraightenNodes<'v> {
    pub node_ids: Vec<EntityId>,
    pub viewport: &'v dyn Viewport,
}

impl StraightenNodes<'_> {
    fn projected(&self, graph: &Graph) -> Vec<(EntityId, (f64, f64))> {
        self.node_ids
            .iter()
            .filter_map(|id| graph.has_entity(*id).and_then(Entity::as_node).map(|n| (*id, self.viewport.project(n.loc))))
            .collect()
    }
}

impl TransitionableAction for StraightenNodes<'_> {
    fn disabled(&self, graph: &Graph) -> Option<DisabledReason> {
        let points = self.projected(graph);
        let coords: Vec<_> = points.iter().map(|(_, p)| *p).collect();
        let ssr = smallest_surrounding_rectangle(&coords)?;
        if ssr.max_off_axis_distance(&coords) < STRAIGHT_ENOUGH_THRESHOLD {
            Some(DisabledReason::StraightEnough)
        } else {
            None
        }
    }

    fn step(&self, mut graph: Graph, t: Option<f64>) -> Result<Graph, ActionError> {
        let t = clamp_t(t);
        let points = self.projected(&graph);
        let coords: Vec<_> = points.iter().map(|(_, p)| *p).collect();
        let ssr = smallest_surrounding_rectangle(&coords).ok_or(ActionError::Disabled(DisabledReason::NotEligible))?;
        let axis = ssr.long_axis();

        for (id, projected) in points {
            let snapped = project_onto_axis(projected, ssr.center, axis);
            let target = lerp(projected, snapped, t);
            let mut node = graph.entity(id)?.as_node().cloned().ok_or(crate::error::GraphError::WrongEntityType(id, "node"))?;
            node.loc = self.viewport.unproject(target);
            graph = graph.replace(Entity::Node(node))?;
        }
        Ok(graph)
    }
}

/// `straightenWay(wayIDs, viewport)`: straightens untagged interior nodes
/// (deleting them if redundant after snapping) and keeps tagged ones in
/// place along the axis.
pub struct StraightenWay<'v> {
    pub way_ids: Vec<EntityId>,
    pub viewport: &'v dyn Viewport,
}

impl StraightenWay<'_> {
    fn all_nodes(&self, graph: &Graph) -> Vec<EntityId> {
        let mut nodes = vec![];
        for way_id in &self.way_ids {
            if let Some(Entity::Way(w)) = graph.has_entity(*way_id) {
                nodes.extend(w.nodes.iter().copied());
            }
        }
        nodes
    }

    fn max_off_axis(&self, graph: &Graph) -> Option<f64> {
        let nodes = self.all_nodes(graph);
        let coords: Vec<_> = nodes
            .iter()
            .filter_map(|id| graph.has_entity(*id).and_then(Entity::as_node))
            .map(|n| self.viewport.project(n.loc))
            .collect();
        smallest_surrounding_rectangle(&coords).map(|ssr| ssr.max_off_axis_distance(&coords))
    }
}

impl TransitionableAction for StraightenWay<'_> {
    fn disabled(&self, graph: &Graph) -> Option<DisabledReason> {
        match self.max_off_axis(graph) {
            Some(d) if d > 0.5 => Some(DisabledReason::TooBendy),
            None => Some(DisabledReason::NotEligible),
            _ => None,
        }
    }

    fn step(&self, mut graph: Graph, t: Option<f64>) -> Result<Graph, ActionError> {
        let t = clamp_t(t);
        for way_id in self.way_ids.clone() {
            let way = match graph.has_entity(way_id).and_then(Entity::as_way) {
                Some(w) => w.clone(),
                None => continue,
            };
            let coords: Vec<_> = way
                .nodes
                .iter()
                .filter_map(|id| graph.has_entity(*id).and_then(Entity::as_node))
                .map(|n| self.viewport.project(n.loc))
                .collect();
            let Some(ssr) = smallest_surrounding_rectangle(&coords) else {
                continue;
            };
            let axis = ssr.long_axis();

            let mut kept_nodes = Vec::new();
            for (i, &node_id) in way.nodes.iter().enumerate() {
                let is_endpoint = i == 0 || i == way.nodes.len() - 1;
                let mut node = graph.entity(node_id)?.as_node().cloned().ok_or(crate::error::GraphError::WrongEntityType(node_id, "node"))?;
                let has_tags = !node.tags.is_empty();
                let is_shared = graph.parent_ways(node_id).len() > 1;

                if !is_endpoint && !has_tags && !is_shared {
                    // redundant interior node: drop once fully straightened.
                    if (t - 1.0).abs() < f64::EPSILON {
                        continue;
                    }
                }

                let projected = self.viewport.project(node.loc);
                let snapped = project_onto_axis(projected, ssr.center, axis);
                let target = lerp(projected, snapped, t);
                node.loc = self.viewport.unproject(target);
                graph = graph.replace(Entity::Node(node))?;
                kept_nodes.push(node_id);
            }

            if kept_nodes != way.nodes {
                let mut updated = way;
                updated.nodes = kept_nodes;
                graph = graph.replace(Entity::Way(updated))?;
            }
        }
        Ok(graph)
    }
}
