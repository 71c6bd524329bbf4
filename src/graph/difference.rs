use super::graph::Graph;
use crate::id::EntityId;
use crate::model::entity::Entity;
use std::collections::{HashMap, HashSet};

/// created/modified/deleted entity-id sets between two graph snapshots
///. `before` is assumed to be an ancestor of `after` in the overlay
/// chain; layers are walked from `after` back toward `before`, collecting
/// each layer's own dirty entries until a layer at or behind `before`'s key
/// is reached.
#[derive(Debug, Default, Clone)]
pub struct Difference {
    pub created: HashSet<EntityId>,
    pub modified: HashSet<EntityId>,
    pub deleted: HashSet<EntityId>,
    geometry_changed: bool,
}

impl Difference {
    pub fn compute(before: &Graph, after: &Graph) -> Difference {
        // walk from `after` toward its base, merging each layer's local dirty
        // entries. a lower layer never overwrites a higher layer's verdict for
        // the same id, since the topmost write wins.
        let mut merged: HashMap<EntityId, Option<Entity>> = HashMap::new();
        let mut cursor = Some(after);
        while let Some(g) = cursor {
            if g.key() <= before.key() {
                break;
            }
            for (id, slot) in g.local_entries() {
                merged.entry(id).or_insert_with(|| slot.cloned());
            }
            cursor = g.base().map(|b| b.as_ref());
        }

        let mut diff = Difference::default();
        for (id, slot) in merged {
            let existed_before = before.has_entity(id);
            match (&slot, existed_before) {
                (None, Some(_)) => {
                    diff.deleted.insert(id);
                }
                (None, None) => {
                    // created then deleted within the same span: no net change.
                }
                (Some(new_entity), None) => {
                    diff.created.insert(id);
                    let _ = new_entity;
                }
                (Some(new_entity), Some(old_entity)) => {
                    if new_entity != old_entity {
                        diff.modified.insert(id);
                        if geometry_differs(old_entity, new_entity) {
                            diff.geometry_changed = true;
                        }
                    }
                }
            }
        }
        diff
    }

    pub fn changed_addition(&self) -> bool {
        !self.created.is_empty()
    }

    pub fn changed_deletion(&self) -> bool {
        !self.deleted.is_empty()
    }

    pub fn changed_geometry(&self) -> bool {
        self.geometry_changed
    }

    /// every id touched by this difference, for spatial-index reconciliation.
    pub fn touched(&self) -> impl Iterator<Item = &EntityId> {
        self.created.iter().chain(self.modified.iter()).chain(self.deleted.iter())
    }
}

fn geometry_differs(old: &Entity, new: &Entity) -> bool {
    match (old, new) {
        (Entity::Node(a), Entity::Node(b)) => a.loc != b.loc,
        (Entity::Way(a), Entity::Way(b)) => a.nodes != b.nodes,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::{Loc, Node};

    fn node(id: i64, lon: f64, lat: f64) -> Entity {
        Entity::Node(Node::new(EntityId::node(id), Loc::new(lon, lat)))
    }

    #[test]
    fn detects_created_modified_deleted() {
        let base = Graph::new()
            .replace(node(1, 0.0, 0.0))
            .unwrap()
            .replace(node(2, 0.0, 0.0))
            .unwrap()
            .commit();

        let head = Graph::overlay(&base)
            .replace(node(2, 5.0, 5.0))
            .unwrap() // modified
            .replace(node(3, 1.0, 1.0))
            .unwrap() // created
            .remove(EntityId::node(1))
            .unwrap() // deleted
            .commit();

        let diff = Difference::compute(&base, &head);
        assert_eq!(diff.created, [EntityId::node(3)].into_iter().collect());
        assert_eq!(diff.modified, [EntityId::node(2)].into_iter().collect());
        assert_eq!(diff.deleted, [EntityId::node(1)].into_iter().collect());
        assert!(diff.changed_geometry());
        assert!(diff.changed_addition());
        assert!(diff.changed_deletion());
    }

    #[test]
    fn no_change_yields_empty_difference() {
        let base = Graph::new().replace(node(1, 0.0, 0.0)).unwrap().commit();
        let head = Graph::overlay(&base).commit();
        let diff = Difference::compute(&base, &head);
        assert!(diff.created.is_empty() && diff.modified.is_empty() && diff.deleted.is_empty());
    }
}
