//! `reverse(entityID, options)`: reverses a way's node order and
//! rewrites direction-bearing tags, member roles, and absolute-direction
//! tags on the reversed node itself.

use crate::error::{ActionError, GraphError};
use crate::graph::Graph;
use crate::id::EntityId;
use crate::model::{Entity, Tags};

use super::Action;

#[derive(Debug, Clone, Copy)]
pub struct ReverseOptions {
    pub reverse_oneway: bool,
}

impl Default for ReverseOptions {
    fn default() -> Self {
        ReverseOptions { reverse_oneway: true }
    }
}

pub struct Reverse {
    pub entity_id: EntityId,
    pub options: ReverseOptions,
}

const COMPASS_PAIRS: &[(&str, &str)] = &[
    ("N", "S"),
    ("NNE", "SSW"),
    ("NE", "SW"),
    ("ENE", "WSW"),
    ("E", "W"),
    ("ESE", "WNW"),
    ("SE", "NW"),
    ("SSE", "NNW"),
];

fn compass_opposite(value: &str) -> Option<&'static str> {
    for (a, b) in COMPASS_PAIRS {
        if value.eq_ignore_ascii_case(a) {
            return Some(b);
        }
        if value.eq_ignore_ascii_case(b) {
            return Some(a);
        }
    }
    None
}

fn lexical_opposite(value: &str) -> Option<&'static str> {
    match value {
        "left" => Some("right"),
        "right" => Some("left"),
        "up" => Some("down"),
        "down" => Some("up"),
        "forward" => Some("backward"),
        "backward" => Some("forward"),
        "forwards" => Some("backwards"),
        "backwards" => Some("forwards"),
        _ => None,
    }
}

/// `turn:lanes*` keys are exempt from every rewrite: the check runs
/// before any other transform, so it's a full bypass rather than a partial
/// one that still flips the value.
fn is_turn_lanes_key(key: &str) -> bool {
    key.starts_with("turn:lanes")
}

fn reversed_key(key: &str) -> String {
    if is_turn_lanes_key(key) {
        return key.to_string();
    }
    let replacements: &[(&str, &str)] = &[
        (":left", ":right"),
        (":right", ":left"),
        (":forward", ":backward"),
        (":backward", ":forward"),
    ];
    for (from, to) in replacements {
        if let Some(rest) = key.strip_suffix(from) {
            return format!("{rest}{to}");
        }
        if key == &from[1..] {
            return to[1..].to_string();
        }
    }
    key.to_string()
}

fn reversed_value(key: &str, value: &str) -> String {
    if is_turn_lanes_key(key) {
        return value.to_string();
    }
    if key == "oneway" {
        return match value {
            "yes" | "1" => "-1".to_string(),
            "-1" => "yes".to_string(),
            other => other.to_string(),
        };
    }
    if key == "incline" {
        if let Some(stripped) = value.strip_prefix('-') {
            return stripped.to_string();
        }
        if value.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            return format!("-{value}");
        }
        return value.to_string();
    }
    if let Some(opposite) = lexical_opposite(value) {
        return opposite.to_string();
    }
    if let Some(opposite) = compass_opposite(value) {
        return opposite.to_string();
    }
    value.to_string()
}

/// absolute-direction tags (bearing in degrees) flip by +/-180 degrees, and
/// only apply to the tag set of the node actually being reversed.
fn reverse_absolute_direction(value: &str) -> String {
    match value.parse::<f64>() {
        Ok(degrees) => {
            let flipped = (degrees + 180.0).rem_euclid(360.0);
            if flipped.fract() == 0.0 {
                format!("{}", flipped as i64)
            } else {
                flipped.to_string()
            }
        }
        Err(_) => value.to_string(),
    }
}

const ABSOLUTE_DIRECTION_KEYS: &[&str] = &["direction"];

fn rewrite_way_tags(tags: &Tags, options: &ReverseOptions) -> Tags {
    let mut out = Tags::new();
    for (key, value) in tags.iter() {
        if is_turn_lanes_key(key) {
            out.set(key, value);
            continue;
        }
        let new_key = reversed_key(key);
        let new_value = if key == "oneway" && !options.reverse_oneway {
            value.to_string()
        } else if ABSOLUTE_DIRECTION_KEYS.contains(&key) && value.parse::<f64>().is_err() {
            reversed_value(key, value)
        } else if ABSOLUTE_DIRECTION_KEYS.contains(&key) {
            reverse_absolute_direction(value)
        } else {
            reversed_value(key, value)
        };
        out.set(new_key, new_value);
    }
    out
}

/// per-node counterpart of `rewrite_way_tags`, scoped to absolute-direction
/// keys only: a node's own tags carry no left/right or forward/backward
/// relative semantics, just an absolute bearing that flips when the way
/// owning it is reversed.
fn rewrite_node_tags(tags: &Tags) -> Tags {
    let mut out = tags.clone();
    for key in ABSOLUTE_DIRECTION_KEYS {
        if let Some(value) = tags.get(key) {
            out.set(*key, reverse_absolute_direction(value));
        }
    }
    out
}

fn reversed_role(role: &str) -> String {
    match role {
        "forward" => "backward".to_string(),
        "backward" => "forward".to_string(),
        "forwards" => "backwards".to_string(),
        "backwards" => "forwards".to_string(),
        other => other.to_string(),
    }
}

impl Action for Reverse {
    fn apply(&self, mut graph: Graph) -> Result<Graph, ActionError> {
        let mut way = graph
            .entity(self.entity_id)?
            .as_way()
            .cloned()
            .ok_or(GraphError::WrongEntityType(self.entity_id, "way"))?;

        way.nodes.reverse();
        way.tags = rewrite_way_tags(&way.tags, &self.options);
        let way_id = way.id;
        let node_ids = way.nodes.clone();
        graph = graph.replace(Entity::Way(way))?;

        for node_id in node_ids {
            let node = graph
                .entity(node_id)?
                .as_node()
                .cloned()
                .ok_or(GraphError::WrongEntityType(node_id, "node"))?;
            let rewritten = rewrite_node_tags(&node.tags);
            if rewritten != node.tags {
                let mut node = node;
                node.tags = rewritten;
                graph = graph.replace(Entity::Node(node))?;
            }
        }

        for relation_id in graph.parent_relations(way_id) {
            let mut relation = graph
                .entity(relation_id)?
                .as_relation()
                .cloned()
                .ok_or(GraphError::WrongEntityType(relation_id, "relation"))?;
            let mut changed = false;
            for member in relation.members.iter_mut() {
                if member.id == way_id {
                    let rewritten = reversed_role(&member.role);
                    if rewritten != member.role {
                        member.role = rewritten;
                        changed = true;
                    }
                }
            }
            if changed {
                graph = graph.replace(Entity::Relation(relation))?;
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

    fn graph_with_way(tags: &[(&str, &str)]) -> Graph {
        let mut g = Graph::new()
            .replace(Entity::Node(Node::new(EntityId::node(1), Loc::new(0.0, 0.0))))
            .unwrap()
            .replace(Entity::Node(Node::new(EntityId::node(2), Loc::new(1.0, 1.0))))
            .unwrap();
        let mut way = Way::new(EntityId::way(1), vec![EntityId::node(1), EntityId::node(2)]);
        for (k, v) in tags {
            way.tags.set(*k, *v);
        }
        g = g.replace(Entity::Way(way)).unwrap();
        g
    }

    #[test]
    fn reverse_tags_scenario() {
        let g = graph_with_way(&[
            ("highway", "residential"),
            ("oneway", "yes"),
            ("direction", "NE"),
            ("cycleway:left", "lane"),
        ]);
        let action = Reverse {
            entity_id: EntityId::way(1),
            options: ReverseOptions { reverse_oneway: true },
        };
        let g = action.apply(g).unwrap();
        let way = g.entity(EntityId::way(1)).unwrap().as_way().unwrap();
        assert_eq!(way.tags.get("highway"), Some("residential"));
        assert_eq!(way.tags.get("oneway"), Some("-1"));
        assert_eq!(way.tags.get("direction"), Some("SW"));
        assert_eq!(way.tags.get("cycleway:right"), Some("lane"));
        assert_eq!(way.tags.get("cycleway:left"), None);
        assert_eq!(way.nodes, vec![EntityId::node(2), EntityId::node(1)]);
    }

    #[test]
    fn turn_lanes_key_is_never_rewritten() {
        let g = graph_with_way(&[("turn:lanes:backward", "left|through")]);
        let action = Reverse {
            entity_id: EntityId::way(1),
            options: ReverseOptions::default(),
        };
        let g = action.apply(g).unwrap();
        let way = g.entity(EntityId::way(1)).unwrap().as_way().unwrap();
        assert_eq!(way.tags.get("turn:lanes:backward"), Some("left|through"));
        assert_eq!(way.tags.get("turn:lanes:forward"), None);
    }

    #[test]
    fn child_node_absolute_direction_tag_flips_180() {
        let mut g = Graph::new()
            .replace(Entity::Node(Node::new(EntityId::node(1), Loc::new(0.0, 0.0))))
            .unwrap()
            .replace(Entity::Node(Node::new(EntityId::node(2), Loc::new(1.0, 1.0))))
            .unwrap();
        {
            let mut node = g.entity(EntityId::node(1)).unwrap().as_node().cloned().unwrap();
            node.tags.set("direction", "45");
            g = g.replace(Entity::Node(node)).unwrap();
        }
        let mut way = Way::new(EntityId::way(1), vec![EntityId::node(1), EntityId::node(2)]);
        way.tags.set("highway", "residential");
        g = g.replace(Entity::Way(way)).unwrap();

        let action = Reverse {
            entity_id: EntityId::way(1),
            options: ReverseOptions::default(),
        };
        let g = action.apply(g).unwrap();
        let node = g.entity(EntityId::node(1)).unwrap().as_node().unwrap();
        assert_eq!(node.tags.get("direction"), Some("225"));
    }

    #[test]
    fn reversing_twice_restores_original() {
        let g = graph_with_way(&[("oneway", "yes"), ("incline", "10%")]);
        let before = g.entity(EntityId::way(1)).unwrap().clone();
        let action = Reverse {
            entity_id: EntityId::way(1),
            options: ReverseOptions::default(),
        };
        let once = action.apply(g).unwrap();
        let twice = action.apply(once).unwrap();
        assert_eq!(twice.entity(EntityId::way(1)).unwrap(), &before);
    }
}
