//! `split(nodeIDs, newWayIDs?)`: splits a way at one or more nodes,
//! repairing parent-relation membership (turn restrictions, route order,
//! old-style multipolygons) so the split is topologically transparent.

use crate::config::AreaKeyConfig;
use crate::error::{ActionError, DisabledReason, GraphError};
use crate::geometry::vector::distance;
use crate::graph::Graph;
use crate::id::EntityId;
use crate::model::{Entity, Member, Relation, Way};

use super::atomic::{AddMember, InsertPair};
use super::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepHistoryOn {
    Longest,
    First,
}

pub struct Split {
    pub way_id: EntityId,
    pub split_node_ids: Vec<EntityId>,
    pub new_way_ids: Vec<EntityId>,
    pub keep_history_on: KeepHistoryOn,
    pub area_keys: AreaKeyConfig,
    /// consumed only when the split way was an area not already part of a
    /// multipolygon; required in that case, unused otherwise.
    pub new_relation_id: Option<EntityId>,
}

/// `splitArea`: for a closed way with a single chosen split node, picks the
/// partner node maximizing `along-way distance / straight-line distance`,
/// which tends to pick the node "opposite" the first one around the ring.
fn split_area_partner(way: &Way, graph: &Graph, node_id: EntityId) -> Option<EntityId> {
    let ring = &way.nodes[..way.nodes.len() - 1]; // drop the duplicated closing node
    let start = ring.iter().position(|n| *n == node_id)?;
    let n = ring.len();
    let loc = |id: EntityId| -> Option<(f64, f64)> {
        graph.has_entity(id).and_then(Entity::as_node).map(|node| (node.loc.lon, node.loc.lat))
    };
    let start_pt = loc(ring[start])?;

    let mut best: Option<(EntityId, f64)> = None;
    let mut along = 0.0;
    for step in 1..n {
        let i = (start + step) % n;
        let prev = (start + step - 1) % n;
        along += distance(loc(ring[prev])?, loc(ring[i])?);
        if i == start {
            continue;
        }
        let straight = distance(start_pt, loc(ring[i])?).max(1e-9);
        let ratio = along / straight;
        if best.map(|(_, best_ratio)| ratio > best_ratio).unwrap_or(true) {
            best = Some((ring[i], ratio));
        }
    }
    best.map(|(id, _)| id)
}

fn divide_step_count(tags: &mut crate::model::Tags, ratio: f64) {
    if let Some(value) = tags.get("step_count") {
        if let Ok(count) = value.parse::<f64>() {
            let divided = (count * ratio).round() as i64;
            tags.set("step_count", divided.to_string());
        }
    }
}

impl Split {
    fn interior_split_points(&self, way: &Way) -> Vec<usize> {
        self.split_node_ids
            .iter()
            .filter_map(|id| way.nodes.iter().position(|n| n == id))
            .filter(|&i| i != 0 && i != way.nodes.len() - 1)
            .collect()
    }
}

impl Action for Split {
    fn disabled(&self, graph: &Graph) -> Option<DisabledReason> {
        let way = graph.has_entity(self.way_id).and_then(Entity::as_way)?;
        if way.is_closed() {
            if self.split_node_ids.is_empty() {
                return Some(DisabledReason::NotEligible);
            }
            None
        } else if self.interior_split_points(way).is_empty() {
            Some(DisabledReason::NotEligible)
        } else {
            None
        }
    }

    fn apply(&self, mut graph: Graph) -> Result<Graph, ActionError> {
        let way = graph
            .entity(self.way_id)?
            .as_way()
            .cloned()
            .ok_or(GraphError::WrongEntityType(self.way_id, "way"))?;

        let (segment_a, segment_b): (Vec<EntityId>, Vec<EntityId>) = if way.is_closed() {
            let first = *self.split_node_ids.first().ok_or_else(|| ActionError::InvalidArguments("split requires at least one node".into()))?;
            let second = match self.split_node_ids.get(1).copied() {
                Some(id) => id,
                None => split_area_partner(&way, &graph, first).ok_or(ActionError::Disabled(DisabledReason::NotEligible))?,
            };
            let ring = &way.nodes[..way.nodes.len() - 1];
            let i = ring.iter().position(|n| *n == first).ok_or(ActionError::Disabled(DisabledReason::NotEligible))?;
            let j = ring.iter().position(|n| *n == second).ok_or(ActionError::Disabled(DisabledReason::NotEligible))?;
            let (lo, hi) = if i < j { (i, j) } else { (j, i) };
            let arc_a: Vec<EntityId> = ring[lo..=hi].to_vec();
            let mut arc_b: Vec<EntityId> = ring[hi..].to_vec();
            arc_b.extend(ring[..=lo].iter().copied());
            (arc_a, arc_b)
        } else {
            let idx = self
                .interior_split_points(&way)
                .into_iter()
                .next()
                .ok_or(ActionError::Disabled(DisabledReason::NotEligible))?;
            (way.nodes[..=idx].to_vec(), way.nodes[idx..].to_vec())
        };

        let total_len: f64 = way_length(&way.nodes, &graph);
        let len_a = way_length(&segment_a, &graph);
        let ratio_a = if total_len > 0.0 { len_a / total_len } else { 0.5 };

        let a_is_longer = segment_a.len() >= segment_b.len();
        let keep_a = match self.keep_history_on {
            KeepHistoryOn::Longest => a_is_longer,
            KeepHistoryOn::First => true,
        };

        let new_way_id = *self.new_way_ids.first().ok_or_else(|| ActionError::InvalidArguments("split requires a new way id".into()))?;
        let (kept_id, kept_nodes, new_id, new_nodes, new_ratio) = if keep_a {
            (way.id, segment_a, new_way_id, segment_b, 1.0 - ratio_a)
        } else {
            (way.id, segment_b, new_way_id, segment_a, ratio_a)
        };

        let mut kept_way = way.clone();
        kept_way.nodes = kept_nodes;
        let mut new_way = Way::new(new_id, new_nodes);
        new_way.tags = way.tags.clone();
        divide_step_count(&mut new_way.tags, new_ratio);

        graph = graph.replace(Entity::Way(kept_way))?;
        graph = graph.replace(Entity::Way(new_way))?;

        let mut was_in_multipolygon = false;
        for relation_id in graph.parent_relations(way.id) {
            let relation = graph
                .entity(relation_id)?
                .as_relation()
                .cloned()
                .ok_or(GraphError::WrongEntityType(relation_id, "relation"))?;

            if relation.is_multipolygon() {
                was_in_multipolygon = true;
            }

            if relation.is_restriction() {
                graph = repair_restriction_membership(graph, relation_id, way.id, new_id)?;
            } else {
                let action = AddMember {
                    relation_id,
                    member: Member::new(new_id, String::new()),
                    index: None,
                    insert_pair: Some(InsertPair { original_id: kept_id, inserted_id: new_id }),
                };
                graph = action.apply(graph)?;
            }
        }

        graph = migrate_old_multipolygon_tags_if_needed(graph, way.id, new_id)?;

        let was_area = Entity::Way(way.clone()).is_area(&self.area_keys);
        if was_area && !was_in_multipolygon {
            let relation_id = self
                .new_relation_id
                .ok_or_else(|| ActionError::InvalidArguments("splitting an area way requires a new_relation_id".into()))?;
            let mut relation = Relation::new(
                relation_id,
                vec![Member::new(kept_id, "outer"), Member::new(new_id, "outer")],
            );
            relation.tags.set("type", "multipolygon");
            graph = graph.replace(Entity::Relation(relation))?;
        }

        Ok(graph)
    }
}

fn way_length(nodes: &[EntityId], graph: &Graph) -> f64 {
    let mut total = 0.0;
    for pair in nodes.windows(2) {
        if let (Some(a), Some(b)) = (graph.has_entity(pair[0]).and_then(Entity::as_node), graph.has_entity(pair[1]).and_then(Entity::as_node)) {
            total += distance((a.loc.lon, a.loc.lat), (b.loc.lon, b.loc.lat));
        }
    }
    total
}

/// keep the via-way membership contiguous in a turn restriction: if the split
/// way is `via`, duplicate membership so both halves remain; if it's
/// `from`/`to`, keep only the half still touching the restriction's `via`.
fn repair_restriction_membership(mut graph: Graph, relation_id: EntityId, original_id: EntityId, new_id: EntityId) -> Result<Graph, ActionError> {
    let mut relation = graph
        .entity(relation_id)?
        .as_relation()
        .cloned()
        .ok_or(GraphError::WrongEntityType(relation_id, "relation"))?;

    let via_node_ids: Vec<EntityId> = relation
        .members_with_role("via")
        .filter(|m| m.id.entity_type == crate::id::EntityType::Node)
        .map(|m| m.id)
        .collect();

    for idx in relation.member_indices(original_id) {
        let role = relation.members[idx].role.clone();
        if role == "via" {
            relation.members.push(Member::new(new_id, role));
        } else {
            let original_way = graph.has_entity(original_id).and_then(Entity::as_way);
            let keeps_via = original_way
                .map(|w| via_node_ids.iter().any(|v| w.nodes.contains(v)))
                .unwrap_or(true);
            if !keeps_via {
                relation.members[idx] = Member::new(new_id, role);
            }
        }
    }
    graph = graph.replace(Entity::Relation(relation))?;
    Ok(graph)
}

/// if `original_id` was the sole `outer` of a degenerate `type=multipolygon`
/// relation, both resulting ways become outer members and the relation
/// inherits the tags.
fn migrate_old_multipolygon_tags_if_needed(mut graph: Graph, original_id: EntityId, new_id: EntityId) -> Result<Graph, ActionError> {
    for relation_id in graph.parent_relations(original_id) {
        let relation = graph
            .entity(relation_id)?
            .as_relation()
            .cloned()
            .ok_or(GraphError::WrongEntityType(relation_id, "relation"))?;
        if !relation.is_multipolygon() {
            continue;
        }
        let outers: Vec<_> = relation.members_with_role("outer").collect();
        let degenerate = relation.tags.iter().all(|(k, _)| k == "type");
        if outers.len() == 1 && outers[0].id == original_id && degenerate {
            let mut updated = relation.clone();
            let way_tags = graph.entity(original_id)?.tags().clone();
            updated.tags = updated.tags.merged_with(&way_tags);
            updated.members.push(Member::new(new_id, "outer"));
            graph = graph.replace(Entity::Relation(updated))?;

            for way_id in [original_id, new_id] {
                let mut way = graph.entity(way_id)?.as_way().cloned().ok_or(GraphError::WrongEntityType(way_id, "way"))?;
                way.tags = crate::model::Tags::new();
                graph = graph.replace(Entity::Way(way))?;
            }
        }
    }
    Ok(graph)
}
