use crate::error::GraphError;
use crate::id::EntityId;
use crate::model::entity::Entity;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// a persistent, snapshot-based overlay on a `base` graph. each `Graph`
/// value owns only the entities and back-references that changed relative
/// to its base; unchanged lookups fall through the `base` chain. this is the
/// HashMap-chain equivalent of `bambam-osm`'s `OsmGraph`/`parentWays`
/// inverted-index pairing, generalized to support layered overlays.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    /// `None` is a tombstone: "deleted in this overlay".
    entities: HashMap<EntityId, Option<Entity>>,
    /// node-id -> full current set of way-ids that reference it, as of this
    /// layer. only nodes whose parent-way set changed relative to `base`
    /// have an entry here; absent nodes fall through to `base`.
    parent_ways: HashMap<EntityId, HashSet<EntityId>>,
    /// entity-id -> full current set of relation-ids that reference it.
    parent_relations: HashMap<EntityId, HashSet<EntityId>>,
    base: Option<Arc<Graph>>,
    frozen: bool,
    key: u64,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    /// opens a fresh, mutable overlay atop `base`. satisfies the "or open a
    /// new overlay" escape hatch in the editing core lifecycle: mutating a frozen graph
    /// directly is a programming error (`GraphError::Frozen`), but a caller
    /// that wants to keep editing calls `Graph::overlay(&committed)`.
    pub fn overlay(base: &Arc<Graph>) -> Self {
        Graph {
            entities: HashMap::new(),
            parent_ways: HashMap::new(),
            parent_relations: HashMap::new(),
            base: Some(Arc::clone(base)),
            frozen: false,
            key: base.key,
        }
    }

    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// `entity(id)`: fails with `NotFound` if absent.
    pub fn entity(&self, id: EntityId) -> Result<&Entity, GraphError> {
        let mut cur = self;
        loop {
            if let Some(slot) = cur.entities.get(&id) {
                return slot.as_ref().ok_or(GraphError::MissingEntity(id));
            }
            match &cur.base {
                Some(b) => cur = b.as_ref(),
                None => return Err(GraphError::MissingEntity(id)),
            }
        }
    }

    /// `hasEntity(id)`: entity or `None`, never errors.
    pub fn has_entity(&self, id: EntityId) -> Option<&Entity> {
        let mut cur = self;
        loop {
            if let Some(slot) = cur.entities.get(&id) {
                return slot.as_ref();
            }
            match &cur.base {
                Some(b) => cur = b.as_ref(),
                None => return None,
            }
        }
    }

    fn parent_set<'a>(
        map_at: impl Fn(&'a Graph) -> &'a HashMap<EntityId, HashSet<EntityId>>,
        start: &'a Graph,
        id: EntityId,
    ) -> HashSet<EntityId> {
        let mut cur = start;
        loop {
            if let Some(set) = map_at(cur).get(&id) {
                return set.clone();
            }
            match &cur.base {
                Some(b) => cur = b.as_ref(),
                None => return HashSet::new(),
            }
        }
    }

    /// `parentWays(entity)`.
    pub fn parent_ways(&self, node_id: EntityId) -> HashSet<EntityId> {
        Self::parent_set(|g| &g.parent_ways, self, node_id)
    }

    /// `parentRelations(entity)`.
    pub fn parent_relations(&self, id: EntityId) -> HashSet<EntityId> {
        Self::parent_set(|g| &g.parent_relations, self, id)
    }

    /// `childNodes(way)`: nodes in order, duplicates preserved.
    pub fn child_nodes(&self, way_id: EntityId) -> Result<Vec<EntityId>, GraphError> {
        let entity = self.entity(way_id)?;
        match entity {
            Entity::Way(w) => Ok(w.nodes.clone()),
            _ => Err(GraphError::WrongEntityType(way_id, "way")),
        }
    }

    /// unique child ids referenced by an entity: a way's distinct nodes, or
    /// a relation's distinct members. empty for nodes.
    fn unique_children(entity: &Entity) -> HashSet<EntityId> {
        match entity {
            Entity::Node(_) => HashSet::new(),
            Entity::Way(w) => w.nodes.iter().copied().collect(),
            Entity::Relation(r) => r.members.iter().map(|m| m.id).collect(),
        }
    }

    /// `replace(entity)`: installs `entity` at its id, updating back-references
    /// for its added/removed children. fails with `Frozen` on a committed graph.
    pub fn replace(mut self, entity: Entity) -> Result<Graph, GraphError> {
        if self.frozen {
            return Err(GraphError::Frozen);
        }
        let id = entity.id();
        let old_children = match self.has_entity(id) {
            Some(old) => Self::unique_children(old),
            None => HashSet::new(),
        };
        let new_children = Self::unique_children(&entity);

        let is_way = matches!(entity, Entity::Way(_));
        for removed in old_children.difference(&new_children) {
            self.detach_parent(*removed, id, is_way);
        }
        for added in new_children.difference(&old_children) {
            self.attach_parent(*added, id, is_way);
        }

        self.entities.insert(id, Some(entity));
        Ok(self)
    }

    /// `remove(entity)`: installs a tombstone, detaching back-references.
    pub fn remove(mut self, entity_id: EntityId) -> Result<Graph, GraphError> {
        if self.frozen {
            return Err(GraphError::Frozen);
        }
        let is_way;
        let old_children = match self.has_entity(entity_id) {
            Some(old) => {
                is_way = matches!(old, Entity::Way(_));
                Self::unique_children(old)
            }
            None => {
                is_way = false;
                HashSet::new()
            }
        };
        for child in old_children {
            self.detach_parent(child, entity_id, is_way);
        }
        self.entities.insert(entity_id, None);
        Ok(self)
    }

    fn attach_parent(&mut self, child: EntityId, parent: EntityId, is_way: bool) {
        if is_way {
            let mut set = self.parent_ways(child);
            set.insert(parent);
            self.parent_ways.insert(child, set);
        } else {
            let mut set = self.parent_relations(child);
            set.insert(parent);
            self.parent_relations.insert(child, set);
        }
    }

    fn detach_parent(&mut self, child: EntityId, parent: EntityId, is_way: bool) {
        if is_way {
            let mut set = self.parent_ways(child);
            set.remove(&parent);
            self.parent_ways.insert(child, set);
        } else {
            let mut set = self.parent_relations(child);
            set.remove(&parent);
            self.parent_relations.insert(child, set);
        }
    }

    /// `rebase(entities, force?)`: installs entities arriving from an
    /// external collaborator without disturbing `key`. entries that are
    /// already present (local edits) are skipped unless `force`.
    pub fn rebase(mut self, incoming: Vec<Entity>, force: bool) -> Result<Graph, GraphError> {
        if self.frozen {
            return Err(GraphError::Frozen);
        }
        for entity in incoming {
            let id = entity.id();
            let already_local = self.entities.contains_key(&id);
            if already_local && !force {
                continue;
            }
            self = self.replace(entity)?;
        }
        Ok(self)
    }

    /// `commit()`: freezes the overlay and assigns a fresh `key`.
    pub fn commit(mut self) -> Arc<Graph> {
        self.key += 1;
        self.frozen = true;
        Arc::new(self)
    }

    /// iterates only this layer's own dirty entries (not the base chain) —
    /// the `local` dirty set consulted by [`crate::graph::difference::Difference`].
    pub fn local_entries(&self) -> impl Iterator<Item = (EntityId, Option<&Entity>)> {
        self.entities.iter().map(|(id, slot)| (*id, slot.as_ref()))
    }

    pub fn base(&self) -> Option<&Arc<Graph>> {
        self.base.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::{Loc, Node};
    use crate::model::way::Way;

    fn node(id: i64, lon: f64, lat: f64) -> Entity {
        Entity::Node(Node::new(EntityId::node(id), Loc::new(lon, lat)))
    }

    #[test]
    fn entity_identity_not_deep_copy() {
        let n = node(1, 0.0, 0.0);
        let g = Graph::new().replace(n.clone()).unwrap();
        assert_eq!(g.entity(EntityId::node(1)).unwrap(), &n);
    }

    #[test]
    fn commit_increments_key_exactly_once() {
        let g = Graph::new();
        assert_eq!(g.key(), 0);
        let committed = g.replace(node(1, 0.0, 0.0)).unwrap().commit();
        assert_eq!(committed.key(), 1);
    }

    #[test]
    fn replace_on_frozen_graph_fails() {
        let committed = Graph::new().commit();
        let err = (*committed).clone().replace(node(1, 0.0, 0.0));
        assert_eq!(err.unwrap_err(), GraphError::Frozen);
    }

    #[test]
    fn frozen_graph_accepts_new_overlay() {
        let committed = Graph::new().commit();
        let overlay = Graph::overlay(&committed);
        let updated = overlay.replace(node(1, 0.0, 0.0)).unwrap();
        assert!(updated.has_entity(EntityId::node(1)).is_some());
    }

    #[test]
    fn way_replace_updates_parent_ways_back_reference() {
        let g = Graph::new()
            .replace(node(1, 0.0, 0.0))
            .unwrap()
            .replace(node(2, 1.0, 1.0))
            .unwrap();
        let way = Entity::Way(Way::new(EntityId::way(10), vec![EntityId::node(1), EntityId::node(2)]));
        let g = g.replace(way).unwrap();
        let parents = g.parent_ways(EntityId::node(1));
        assert!(parents.contains(&EntityId::way(10)));
    }

    #[test]
    fn replacing_way_with_fewer_nodes_detaches_removed_node() {
        let g = Graph::new()
            .replace(node(1, 0.0, 0.0))
            .unwrap()
            .replace(node(2, 1.0, 1.0))
            .unwrap();
        let way = Way::new(EntityId::way(10), vec![EntityId::node(1), EntityId::node(2)]);
        let g = g.replace(Entity::Way(way.clone())).unwrap();

        let mut shrunk = way;
        shrunk.nodes = vec![EntityId::node(1)];
        let g = g.replace(Entity::Way(shrunk)).unwrap();

        assert!(!g.parent_ways(EntityId::node(2)).contains(&EntityId::way(10)));
        assert!(g.parent_ways(EntityId::node(1)).contains(&EntityId::way(10)));
    }

    #[test]
    fn remove_detaches_back_references() {
        let g = Graph::new().replace(node(1, 0.0, 0.0)).unwrap();
        let way = Entity::Way(Way::new(EntityId::way(10), vec![EntityId::node(1), EntityId::node(1)]));
        let g = g.replace(way).unwrap();
        assert!(g.parent_ways(EntityId::node(1)).contains(&EntityId::way(10)));
        let g = g.remove(EntityId::way(10)).unwrap();
        assert!(!g.parent_ways(EntityId::node(1)).contains(&EntityId::way(10)));
        assert!(g.has_entity(EntityId::way(10)).is_none());
        assert!(matches!(g.entity(EntityId::way(10)), Err(GraphError::MissingEntity(_))));
    }

    #[test]
    fn overlay_falls_through_to_base_for_unchanged_lookups() {
        let base = Graph::new().replace(node(1, 0.0, 0.0)).unwrap().commit();
        let overlay = Graph::overlay(&base).replace(node(2, 1.0, 1.0)).unwrap();
        assert!(overlay.has_entity(EntityId::node(1)).is_some());
        assert!(overlay.has_entity(EntityId::node(2)).is_some());
    }

    #[test]
    fn rebase_skips_already_local_entries_unless_forced() {
        let base = Graph::new().replace(node(1, 5.0, 5.0)).unwrap().commit();
        let overlay = Graph::overlay(&base).replace(node(1, 1.0, 1.0)).unwrap();
        let rebased = overlay.clone().rebase(vec![node(1, 9.0, 9.0)], false).unwrap();
        assert_eq!(
            rebased.entity(EntityId::node(1)).unwrap().as_node().unwrap().loc,
            crate::model::node::Loc::new(1.0, 1.0)
        );
        let forced = overlay.rebase(vec![node(1, 9.0, 9.0)], true).unwrap();
        assert_eq!(
            forced.entity(EntityId::node(1)).unwrap().as_node().unwrap().loc,
            crate::model::node::Loc::new(9.0, 9.0)
        );
    }
}
