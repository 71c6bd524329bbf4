//! `syncCrossingTags(id)`: propagates `crossing:*`/`footway=crossing`
//! tags between a crossing way and its `highway=crossing` nodes.

use crate::error::ActionError;
use crate::graph::Graph;
use crate::id::EntityId;
use crate::model::{Entity, Tags};

use super::Action;

pub struct SyncCrossingTags {
    pub way_id: EntityId,
}

fn is_crossing_way(tags: &Tags) -> bool {
    tags.is_value("footway", "crossing") || tags.is_value("highway", "crossing") || tags.iter().any(|(k, _)| k.starts_with("crossing:"))
}

/// legacy `crossing=marked|unmarked` inferred from the richer `crossing:markings`
/// key, falling through to an existing `crossing` value if already present.
fn legacy_crossing_value(tags: &Tags) -> Option<String> {
    if let Some(existing) = tags.get("crossing") {
        return Some(existing.to_string());
    }
    if let Some(markings) = tags.get("crossing:markings") {
        return Some(if markings == "no" { "unmarked".to_string() } else { "marked".to_string() });
    }
    None
}

fn merge_crossing_tags(a: &Tags, b: &Tags) -> Tags {
    let mut merged = a.clone();
    for (k, v) in b.iter() {
        if k == "crossing" || k == "footway" || k.starts_with("crossing:") {
            if !merged.contains_key(k) {
                merged.set(k, v);
            }
        }
    }
    merged
}

impl Action for SyncCrossingTags {
    fn apply(&self, mut graph: Graph) -> Result<Graph, ActionError> {
        let way = graph.entity(self.way_id)?.as_way().cloned();
        let Some(way) = way else {
            return Ok(graph);
        };
        if !is_crossing_way(&way.tags) {
            return Ok(graph);
        }

        let crossing_nodes: Vec<EntityId> = way
            .nodes
            .iter()
            .copied()
            .filter(|id| matches!(graph.has_entity(*id), Some(Entity::Node(n)) if n.tags.is_value("highway", "crossing")))
            .collect();
        if crossing_nodes.is_empty() {
            return Ok(graph);
        }

        let mut way_tags = way.tags.clone();
        for node_id in &crossing_nodes {
            if let Some(Entity::Node(n)) = graph.has_entity(*node_id) {
                way_tags = merge_crossing_tags(&way_tags, &n.tags);
            }
        }
        if let Some(legacy) = legacy_crossing_value(&way_tags) {
            way_tags.set("crossing", legacy);
        }

        let mut updated_way = way.clone();
        updated_way.tags = way_tags.clone();
        graph = graph.replace(Entity::Way(updated_way))?;

        for node_id in crossing_nodes {
            let mut node = graph.entity(node_id)?.as_node().cloned().ok_or(crate::error::GraphError::WrongEntityType(node_id, "node"))?;
            node.tags = merge_crossing_tags(&node.tags, &way_tags);
            if let Some(legacy) = legacy_crossing_value(&node.tags) {
                node.tags.set("crossing", legacy);
            }
            node.tags.set("highway", "crossing");
            graph = graph.replace(Entity::Node(node))?;
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
    fn sync_crossing_tags_scenario() {
        let mut g = Graph::new();
        g = g.replace(Entity::Node(Node::new(EntityId::node(1), Loc::new(0.0, 0.0)))).unwrap();
        let mut n2 = Node::new(EntityId::node(2), Loc::new(1.0, 1.0));
        n2.tags.set("highway", "crossing");
        g = g.replace(Entity::Node(n2)).unwrap();
        g = g.replace(Entity::Node(Node::new(EntityId::node(3), Loc::new(2.0, 2.0)))).unwrap();

        let mut w1 = Way::new(EntityId::way(1), vec![EntityId::node(1), EntityId::node(2), EntityId::node(3)]);
        w1.tags.set("highway", "footway");
        w1.tags.set("footway", "crossing");
        w1.tags.set("crossing:markings", "zebra");
        g = g.replace(Entity::Way(w1)).unwrap();

        let action = SyncCrossingTags { way_id: EntityId::way(1) };
        let g = action.apply(g).unwrap();

        let node = g.entity(EntityId::node(2)).unwrap().as_node().unwrap();
        assert_eq!(node.tags.get("highway"), Some("crossing"));
        assert_eq!(node.tags.get("crossing"), Some("marked"));
        assert_eq!(node.tags.get("crossing:markings"), Some("zebra"));

        let way = g.entity(EntityId::way(1)).unwrap().as_way().unwrap();
        assert_eq!(way.tags.get("crossing"), Some("marked"));
    }
}
