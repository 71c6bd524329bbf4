//! `move(moveIDs, delta, viewport, cache)`: translate a set of
//! entities by a pixel delta, excluding nodes that sit at an intersection
//! with a way outside the moving set.

use std::collections::HashSet;

use crate::error::ActionError;
use crate::geometry::vector::{add, clamp_t, distance, scale};
use crate::geometry::{Point2, Viewport};
use crate::graph::Graph;
use crate::id::EntityId;
use crate::model::{Entity, Way};

use super::TransitionableAction;

/// caches the set of moving ids across a drag so intersection analysis isn't
/// recomputed on every pointer-move frame. invalidated whenever `moveIDs`
/// changes.
#[derive(Debug, Default, Clone)]
pub struct IntersectionCache {
    move_ids: Vec<EntityId>,
    moving_nodes: Vec<EntityId>,
    pub ok: bool,
}

impl IntersectionCache {
    pub fn new() -> Self {
        IntersectionCache::default()
    }

    fn ensure(&mut self, move_ids: &[EntityId], graph: &Graph) {
        if self.ok && self.move_ids == move_ids {
            return;
        }
        self.move_ids = move_ids.to_vec();
        self.moving_nodes = implied_moving_nodes(move_ids, graph);
        self.ok = true;
    }
}

/// every node implied by `move_ids` (a node moves itself; a way/relation
/// moves its child nodes), excluding nodes at an intersection of more than
/// two ways unless every one of those ways is also in `move_ids`.
pub(crate) fn implied_moving_nodes(move_ids: &[EntityId], graph: &Graph) -> Vec<EntityId> {
    let move_set: HashSet<EntityId> = move_ids.iter().copied().collect();
    let mut candidates: HashSet<EntityId> = HashSet::new();
    for id in move_ids {
        match graph.has_entity(*id) {
            Some(Entity::Node(_)) => {
                candidates.insert(*id);
            }
            Some(Entity::Way(w)) => candidates.extend(w.nodes.iter().copied()),
            Some(Entity::Relation(r)) => {
                for member in &r.members {
                    match graph.has_entity(member.id) {
                        Some(Entity::Node(_)) => {
                            candidates.insert(member.id);
                        }
                        Some(Entity::Way(w)) => candidates.extend(w.nodes.iter().copied()),
                        _ => {}
                    }
                }
            }
            None => {}
        }
    }

    candidates
        .into_iter()
        .filter(|node_id| {
            let parents = graph.parent_ways(*node_id);
            parents.len() <= 2 || parents.iter().all(|w| move_set.contains(w))
        })
        .collect()
}

/// translates `move_ids` by `delta` (world-coordinate pixels), via
/// `project -> translate -> unproject`.
pub struct Move<'v> {
    pub move_ids: Vec<EntityId>,
    pub delta: Point2,
    pub viewport: &'v dyn Viewport,
}

impl<'v> Move<'v> {
    pub fn new(move_ids: Vec<EntityId>, delta: Point2, viewport: &'v dyn Viewport) -> Self {
        Move { move_ids, delta, viewport }
    }

    pub fn delta(&self) -> Point2 {
        self.delta
    }
}

impl TransitionableAction for Move<'_> {
    fn step(&self, mut graph: Graph, t: Option<f64>) -> Result<Graph, ActionError> {
        let t = clamp_t(t);
        let mut cache = IntersectionCache::new();
        cache.ensure(&self.move_ids, &graph);
        let offset = scale(self.delta, t);

        for node_id in cache.moving_nodes.clone() {
            let mut node = graph.entity(node_id)?.as_node().cloned().ok_or(crate::error::GraphError::WrongEntityType(node_id, "node"))?;
            let projected = self.viewport.project(node.loc);
            node.loc = self.viewport.unproject(add(projected, offset));
            graph = graph.replace(Entity::Node(node))?;
        }

        // drop nodes that ended up coincident with an adjacent node in the
        // same way, which can happen when a short segment collapses under
        // the translation.
        let touched_ways: HashSet<EntityId> = cache
            .moving_nodes
            .iter()
            .flat_map(|n| graph.parent_ways(*n))
            .collect();
        for way_id in touched_ways {
            if let Some(Entity::Way(way)) = graph.has_entity(way_id).cloned().as_ref() {
                let deduped = dedupe_coincident(way, &graph, self.viewport);
                if deduped.nodes != way.nodes {
                    graph = graph.replace(Entity::Way(deduped))?;
                }
            }
        }

        Ok(graph)
    }
}

fn dedupe_coincident(way: &Way, graph: &Graph, viewport: &dyn Viewport) -> Way {
    let mut nodes = Vec::with_capacity(way.nodes.len());
    for &id in &way.nodes {
        if let Some(&last) = nodes.last() {
            if last == id {
                continue;
            }
            if let (Some(Entity::Node(a)), Some(Entity::Node(b))) = (graph.has_entity(last), graph.has_entity(id)) {
                let pa = viewport.project(a.loc);
                let pb = viewport.project(b.loc);
                if distance(pa, pb) < 1e-9 {
                    continue;
                }
            }
        }
        nodes.push(id);
    }
    let mut out = way.clone();
    out.nodes = nodes;
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FlatViewport;
    use crate::model::node::{Loc, Node};

    fn graph_with_way() -> Graph {
        Graph::new()
            .replace(Entity::Node(Node::new(EntityId::node(1), Loc::new(0.0, 0.0))))
            .unwrap()
            .replace(Entity::Node(Node::new(EntityId::node(2), Loc::new(1.0, 1.0))))
            .unwrap()
            .replace(Entity::Way(Way::new(EntityId::way(1), vec![EntityId::node(1), EntityId::node(2)])))
            .unwrap()
    }

    #[test]
    fn zero_delta_leaves_graph_unchanged() {
        let g = graph_with_way();
        let viewport = FlatViewport::default();
        let action = Move::new(vec![EntityId::way(1)], (0.0, 0.0), &viewport);
        let after = action.step(g.clone(), None).unwrap();
        assert_eq!(
            after.entity(EntityId::node(1)).unwrap().as_node().unwrap().loc,
            g.entity(EntityId::node(1)).unwrap().as_node().unwrap().loc
        );
    }

    #[test]
    fn intersection_node_stays_put_unless_all_parent_ways_move() {
        let g = graph_with_way().replace(Entity::Way(Way::new(EntityId::way(2), vec![EntityId::node(1), EntityId::node(2)]))).unwrap();
        // node 1 now has two parent ways already (<=2, still movable); add a third.
        let g = g
            .replace(Entity::Node(Node::new(EntityId::node(3), Loc::new(2.0, 2.0))))
            .unwrap()
            .replace(Entity::Way(Way::new(EntityId::way(3), vec![EntityId::node(1), EntityId::node(3)])))
            .unwrap();
        let viewport = FlatViewport::default();
        let action = Move::new(vec![EntityId::way(1)], (5.0, 5.0), &viewport);
        let after = action.step(g, None).unwrap();
        // node 1 has 3 parent ways; way(1) alone doesn't qualify to move it.
        let node1 = after.entity(EntityId::node(1)).unwrap().as_node().unwrap();
        assert_eq!(node1.loc, Loc::new(0.0, 0.0));
    }
}
