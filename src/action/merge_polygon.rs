//! `mergePolygon(ids, newRelationID)`: unifies closed ways and
//! `type=multipolygon` relations into a single multipolygon, deciding
//! outer/inner membership by ring containment.

use geo::{Contains, Coord, LineString, Polygon};

use crate::error::{ActionError, DisabledReason};
use crate::graph::Graph;
use crate::id::EntityId;
use crate::model::{Entity, Member, Relation, Way};

use super::Action;

pub struct MergePolygon {
    pub ids: Vec<EntityId>,
    pub new_relation_id: EntityId,
}

struct Ring {
    way_id: EntityId,
    polygon: Polygon<f64>,
}

fn ring_of(way: &Way, graph: &Graph) -> Option<Polygon<f64>> {
    if !way.is_closed() {
        return None;
    }
    let coords: Vec<Coord<f64>> = way
        .nodes
        .iter()
        .filter_map(|id| graph.has_entity(*id).and_then(Entity::as_node))
        .map(|n| Coord { x: n.loc.lon, y: n.loc.lat })
        .collect();
    if coords.len() < 4 {
        return None;
    }
    Some(Polygon::new(LineString(coords), vec![]))
}

impl MergePolygon {
    /// closed ways directly, plus any member way of an absorbed multipolygon
    /// relation that is itself closed.
    fn rings(&self, graph: &Graph) -> Vec<Ring> {
        let mut rings = Vec::new();
        for id in &self.ids {
            match graph.has_entity(*id) {
                Some(Entity::Way(w)) => {
                    if let Some(polygon) = ring_of(w, graph) {
                        rings.push(Ring { way_id: w.id, polygon });
                    }
                }
                Some(Entity::Relation(r)) if r.is_multipolygon() => {
                    for member in &r.members {
                        if let Some(Entity::Way(w)) = graph.has_entity(member.id) {
                            if let Some(polygon) = ring_of(w, graph) {
                                rings.push(Ring { way_id: w.id, polygon });
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        rings
    }

    /// ways passed directly in `ids` that never formed a ring because
    /// they're not closed: they still join the merged relation as `outer`
    /// members, with their own tags left untouched.
    fn unclosed_outer_ways(&self, graph: &Graph) -> Vec<EntityId> {
        self.ids
            .iter()
            .filter_map(|id| match graph.has_entity(*id) {
                Some(Entity::Way(w)) if !w.is_closed() => Some(w.id),
                _ => None,
            })
            .collect()
    }

    fn eligible_count(&self, graph: &Graph) -> usize {
        self.ids
            .iter()
            .filter(|id| match graph.has_entity(**id) {
                Some(Entity::Way(w)) => w.is_closed(),
                Some(Entity::Relation(r)) => r.is_multipolygon(),
                _ => false,
            })
            .count()
    }

    /// the `(way_id, role)` membership the merge would produce, before any
    /// relation is actually built. Shared by `disabled` (to reject
    /// redundant membership) and `apply` (to avoid recomputing it).
    fn planned_members(&self, graph: &Graph) -> Vec<Member> {
        let rings = self.rings(graph);
        let mut members = Vec::new();
        for ring in &rings {
            let is_inner = rings.iter().any(|other| other.way_id != ring.way_id && other.polygon.contains(&ring.polygon));
            let role = if is_inner { "inner" } else { "outer" };
            members.push(Member::new(ring.way_id, role));
        }
        for way_id in self.unclosed_outer_ways(graph) {
            members.push(Member::new(way_id, "outer"));
        }
        members
    }

    /// true if any planned `(way_id, role)` pair already exists verbatim as
    /// a member of some other `type=multipolygon` relation — whether that
    /// relation is itself being absorbed by this merge or not. Merging
    /// would otherwise produce (or leave behind) a duplicate membership.
    fn would_duplicate_membership(&self, graph: &Graph, planned: &[Member]) -> bool {
        planned.iter().any(|planned_member| {
            graph.parent_relations(planned_member.id).iter().any(|relation_id| {
                graph
                    .has_entity(*relation_id)
                    .and_then(Entity::as_relation)
                    .is_some_and(|r| r.is_multipolygon() && r.members.contains(planned_member))
            })
        })
    }
}

impl Action for MergePolygon {
    fn disabled(&self, graph: &Graph) -> Option<DisabledReason> {
        if self.eligible_count(graph) < 2 {
            return Some(DisabledReason::NotEligible);
        }
        let planned = self.planned_members(graph);
        if self.would_duplicate_membership(graph, &planned) {
            return Some(DisabledReason::NotEligible);
        }
        None
    }

    fn apply(&self, mut graph: Graph) -> Result<Graph, ActionError> {
        let rings = self.rings(&graph);
        if rings.len() < 2 {
            return Err(ActionError::Disabled(DisabledReason::NotEligible));
        }
        let planned = self.planned_members(&graph);
        if self.would_duplicate_membership(&graph, &planned) {
            return Err(ActionError::Disabled(DisabledReason::NotEligible));
        }

        let mut members = Vec::new();
        let mut relation_tags = crate::model::Tags::new();
        let mut outer_way_ids = Vec::new();

        for ring in &rings {
            let is_inner = rings.iter().any(|other| other.way_id != ring.way_id && other.polygon.contains(&ring.polygon));
            let role = if is_inner { "inner" } else { "outer" };
            members.push(Member::new(ring.way_id, role));

            if role == "outer" {
                outer_way_ids.push(ring.way_id);
                if let Some(Entity::Way(way)) = graph.has_entity(ring.way_id) {
                    relation_tags = relation_tags.merged_with(&way.tags);
                }
            }
        }
        relation_tags.remove("area");

        // unclosed outer ways keep their own tags untouched, but still join
        // the relation as `outer` members.
        for way_id in self.unclosed_outer_ways(&graph) {
            members.push(Member::new(way_id, "outer"));
        }

        let mut relation = Relation::new(self.new_relation_id, members);
        relation.tags = relation_tags;
        relation.tags.set("type", "multipolygon");
        graph = graph.replace(Entity::Relation(relation))?;

        // tags already migrated onto the relation; clear them from the outer
        // ways that contributed them, and drop absorbed old-style relations.
        for way_id in outer_way_ids {
            if let Some(Entity::Way(w)) = graph.has_entity(way_id) {
                let mut cleared = w.clone();
                cleared.tags = crate::model::Tags::new();
                graph = graph.replace(Entity::Way(cleared))?;
            }
        }
        for id in &self.ids {
            if let Some(Entity::Relation(r)) = graph.has_entity(*id) {
                if r.is_multipolygon() {
                    graph = graph.remove(*id)?;
                }
            }
        }

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::{Loc, Node};

    fn square(id: EntityId, corners: [(f64, f64); 4], graph: Graph) -> (Graph, Vec<EntityId>) {
        let mut g = graph;
        let mut node_ids = vec![];
        for (i, (x, y)) in corners.iter().enumerate() {
            let nid = EntityId::node(id.value * 10 + i as i64 + 1);
            g = g.replace(Entity::Node(Node::new(nid, Loc::new(*x, *y)))).unwrap();
            node_ids.push(nid);
        }
        node_ids.push(node_ids[0]);
        (g, node_ids)
    }

    #[test]
    fn inner_ring_contained_in_outer_gets_inner_role() {
        let mut g = Graph::new();
        let (g2, outer_nodes) = square(EntityId::way(1), [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)], g);
        g = g2;
        let (g2, inner_nodes) = square(EntityId::way(2), [(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0)], g);
        g = g2;

        let mut outer = Way::new(EntityId::way(1), outer_nodes);
        outer.tags.set("landuse", "residential");
        g = g.replace(Entity::Way(outer)).unwrap();
        let inner = Way::new(EntityId::way(2), inner_nodes);
        g = g.replace(Entity::Way(inner)).unwrap();

        let action = MergePolygon {
            ids: vec![EntityId::way(1), EntityId::way(2)],
            new_relation_id: EntityId::relation(1),
        };
        let g = action.apply(g).unwrap();
        let relation = g.entity(EntityId::relation(1)).unwrap().as_relation().unwrap();
        assert!(relation.members_with_role("outer").any(|m| m.id == EntityId::way(1)));
        assert!(relation.members_with_role("inner").any(|m| m.id == EntityId::way(2)));
        assert_eq!(relation.tags.get("landuse"), Some("residential"));
    }

    #[test]
    fn unclosed_outer_way_joins_as_member_with_tags_untouched() {
        let mut g = Graph::new();
        let (g2, outer_nodes) = square(EntityId::way(1), [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)], g);
        g = g2;
        let (g2, inner_nodes) = square(EntityId::way(2), [(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0)], g);
        g = g2;

        let mut outer = Way::new(EntityId::way(1), outer_nodes);
        outer.tags.set("landuse", "residential");
        g = g.replace(Entity::Way(outer)).unwrap();
        let inner = Way::new(EntityId::way(2), inner_nodes);
        g = g.replace(Entity::Way(inner)).unwrap();

        g = g
            .replace(Entity::Node(Node::new(EntityId::node(30), Loc::new(20.0, 0.0))))
            .unwrap()
            .replace(Entity::Node(Node::new(EntityId::node(31), Loc::new(21.0, 1.0))))
            .unwrap();
        let mut unclosed = Way::new(EntityId::way(3), vec![EntityId::node(30), EntityId::node(31)]);
        unclosed.tags.set("barrier", "fence");
        g = g.replace(Entity::Way(unclosed)).unwrap();

        let action = MergePolygon {
            ids: vec![EntityId::way(1), EntityId::way(2), EntityId::way(3)],
            new_relation_id: EntityId::relation(1),
        };
        let g = action.apply(g).unwrap();
        let relation = g.entity(EntityId::relation(1)).unwrap().as_relation().unwrap();
        assert!(relation.members_with_role("outer").any(|m| m.id == EntityId::way(3)));
        let unclosed_way = g.entity(EntityId::way(3)).unwrap().as_way().unwrap();
        assert_eq!(unclosed_way.tags.get("barrier"), Some("fence"));
    }

    #[test]
    fn merge_is_disabled_when_it_would_duplicate_existing_membership() {
        let mut g = Graph::new();
        let (g2, outer_nodes) = square(EntityId::way(1), [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)], g);
        g = g2;
        let (g2, inner_nodes) = square(EntityId::way(2), [(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0)], g);
        g = g2;
        g = g.replace(Entity::Way(Way::new(EntityId::way(1), outer_nodes))).unwrap();
        g = g.replace(Entity::Way(Way::new(EntityId::way(2), inner_nodes))).unwrap();

        let mut existing = Relation::new(EntityId::relation(9), vec![Member::new(EntityId::way(1), "outer")]);
        existing.tags.set("type", "multipolygon");
        g = g.replace(Entity::Relation(existing)).unwrap();

        let action = MergePolygon {
            ids: vec![EntityId::way(1), EntityId::way(2)],
            new_relation_id: EntityId::relation(1),
        };
        assert!(action.disabled(&g).is_some());
        assert!(action.apply(g).is_err());
    }
}
