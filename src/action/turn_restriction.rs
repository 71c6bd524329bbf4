//! `restrictTurn(turn, kind, id)` / `unrestrictTurn({restrictionID})`:
//! build or tear down `type=restriction` relations.

use crate::error::{ActionError, DisabledReason, GraphError};
use crate::graph::Graph;
use crate::id::EntityId;
use crate::model::{Entity, Member, Relation};

use super::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictionKind {
    NoLeftTurn,
    NoRightTurn,
    NoStraightOn,
    NoUTurn,
    OnlyLeftTurn,
    OnlyRightTurn,
    OnlyStraightOn,
}

impl RestrictionKind {
    pub fn tag_value(&self) -> &'static str {
        match self {
            RestrictionKind::NoLeftTurn => "no_left_turn",
            RestrictionKind::NoRightTurn => "no_right_turn",
            RestrictionKind::NoStraightOn => "no_straight_on",
            RestrictionKind::NoUTurn => "no_u_turn",
            RestrictionKind::OnlyLeftTurn => "only_left_turn",
            RestrictionKind::OnlyRightTurn => "only_right_turn",
            RestrictionKind::OnlyStraightOn => "only_straight_on",
        }
    }
}

/// the `from`/`via`/`to` member set of a proposed turn restriction. `via` may
/// be a single node or a sequence of ways.
pub struct Turn {
    pub from: EntityId,
    pub via: Vec<EntityId>,
    pub to: EntityId,
}

pub struct RestrictTurn {
    pub turn: Turn,
    pub kind: RestrictionKind,
    pub relation_id: EntityId,
}

impl Action for RestrictTurn {
    fn disabled(&self, graph: &Graph) -> Option<DisabledReason> {
        let from_is_way = matches!(graph.has_entity(self.turn.from), Some(Entity::Way(_)));
        let to_is_way = matches!(graph.has_entity(self.turn.to), Some(Entity::Way(_)));
        if !from_is_way || !to_is_way || self.turn.via.is_empty() {
            return Some(DisabledReason::NotEligible);
        }
        None
    }

    fn apply(&self, mut graph: Graph) -> Result<Graph, ActionError> {
        let mut members = vec![Member::new(self.turn.from, "from")];
        for via_id in &self.turn.via {
            members.push(Member::new(*via_id, "via"));
        }
        members.push(Member::new(self.turn.to, "to"));

        let mut relation = Relation::new(self.relation_id, members);
        relation.tags.set("type", "restriction");
        relation.tags.set("restriction", self.kind.tag_value());
        graph = graph.replace(Entity::Relation(relation))?;
        Ok(graph)
    }
}

pub struct UnrestrictTurn {
    pub restriction_id: EntityId,
}

impl Action for UnrestrictTurn {
    fn disabled(&self, graph: &Graph) -> Option<DisabledReason> {
        match graph.has_entity(self.restriction_id) {
            Some(Entity::Relation(r)) if r.is_restriction() => None,
            _ => Some(DisabledReason::NotEligible),
        }
    }

    fn apply(&self, graph: Graph) -> Result<Graph, ActionError> {
        let relation = graph
            .entity(self.restriction_id)?
            .as_relation()
            .ok_or(GraphError::WrongEntityType(self.restriction_id, "relation"))?;
        if !relation.is_restriction() {
            return Err(ActionError::Disabled(DisabledReason::NotEligible));
        }
        Ok(graph.remove(self.restriction_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::{Loc, Node};
    use crate::model::way::Way;

    fn graph_with_turn() -> Graph {
        let mut g = Graph::new();
        for (i, (x, y)) in [(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)].into_iter().enumerate() {
            g = g.replace(Entity::Node(Node::new(EntityId::node(i as i64 + 1), Loc::new(x, y)))).unwrap();
        }
        g = g.replace(Entity::Way(Way::new(EntityId::way(1), vec![EntityId::node(1), EntityId::node(2)]))).unwrap();
        g.replace(Entity::Way(Way::new(EntityId::way(2), vec![EntityId::node(2), EntityId::node(3)]))).unwrap()
    }

    #[test]
    fn restrict_turn_builds_restriction_relation() {
        let g = graph_with_turn();
        let action = RestrictTurn {
            turn: Turn { from: EntityId::way(1), via: vec![EntityId::node(2)], to: EntityId::way(2) },
            kind: RestrictionKind::NoStraightOn,
            relation_id: EntityId::relation(1),
        };
        let g = action.apply(g).unwrap();
        let relation = g.entity(EntityId::relation(1)).unwrap().as_relation().unwrap();
        assert_eq!(relation.tags.get("restriction"), Some("no_straight_on"));
        assert_eq!(relation.members.len(), 3);
        assert_eq!(relation.members[0].role, "from");
        assert_eq!(relation.members[1].role, "via");
        assert_eq!(relation.members[2].role, "to");
    }

    #[test]
    fn unrestrict_turn_removes_relation() {
        let g = graph_with_turn();
        let restrict = RestrictTurn {
            turn: Turn { from: EntityId::way(1), via: vec![EntityId::node(2)], to: EntityId::way(2) },
            kind: RestrictionKind::NoUTurn,
            relation_id: EntityId::relation(1),
        };
        let g = restrict.apply(g).unwrap();
        let unrestrict = UnrestrictTurn { restriction_id: EntityId::relation(1) };
        let g = unrestrict.apply(g).unwrap();
        assert!(g.has_entity(EntityId::relation(1)).is_none());
    }
}
