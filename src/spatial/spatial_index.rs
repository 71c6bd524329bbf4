//! rstar-backed spatial index over a [`Graph`](crate::graph::Graph), kept in
//! sync with the editing graph via [`Difference`]. entities are
//! addressed by `EntityId`; bounding boxes live in whatever coordinate space
//! the caller's [`Viewport`] projects into (world pixels, typically).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, RTreeObject};

use crate::geometry::Viewport;
use crate::graph::{Difference, Graph};
use crate::id::EntityId;
use crate::model::Entity;

use super::extent::Extent;

type IndexedRect = GeomWithData<Rectangle<(f64, f64)>, EntityId>;

fn to_rectangle(extent: &Extent) -> Rectangle<(f64, f64)> {
    Rectangle::from_corners(extent.min, extent.max)
}

/// computes the bounding box of `id` in `graph`, recursing into way nodes and
/// relation members. `seen` guards against cyclic relation membership.
fn entity_extent_rec(
    id: EntityId,
    graph: &Graph,
    viewport: &dyn Viewport,
    seen: &mut HashSet<EntityId>,
) -> Option<Extent> {
    if !seen.insert(id) {
        return None;
    }
    match graph.has_entity(id)? {
        Entity::Node(n) => Some(Extent::from_point(viewport.wgs84_to_world(n.loc))),
        Entity::Way(w) => Extent::union_all(
            w.nodes
                .iter()
                .filter_map(|nid| entity_extent_rec(*nid, graph, viewport, seen)),
        ),
        Entity::Relation(r) => Extent::union_all(
            r.members
                .iter()
                .filter_map(|m| entity_extent_rec(m.id, graph, viewport, seen)),
        ),
    }
}

/// computes the bounding box of `id` in `graph`, projected through `viewport`.
pub fn entity_extent(id: EntityId, graph: &Graph, viewport: &dyn Viewport) -> Option<Extent> {
    let mut seen = HashSet::new();
    entity_extent_rec(id, graph, viewport, &mut seen)
}

/// collects `id` and every way/relation that (transitively) references it, so
/// that a moved node also re-projects the parents whose bounding box depends
/// on it.
fn touched_with_parents(id: EntityId, graph: &Graph, out: &mut HashSet<EntityId>) {
    if !out.insert(id) {
        return;
    }
    for parent in graph.parent_ways(id) {
        touched_with_parents(parent, graph, out);
    }
    for parent in graph.parent_relations(id) {
        touched_with_parents(parent, graph, out);
    }
}

/// one named R-tree namespace. `tracked` is the graph snapshot this namespace
/// was last reconciled against; `None` means "not yet synced" (the namespace
/// was just bulk-replaced, or has never been searched).
struct Namespace {
    tree: RTree<IndexedRect>,
    boxes: HashMap<EntityId, Extent>,
    tracked: Option<Arc<Graph>>,
}

impl Namespace {
    fn empty() -> Self {
        Namespace {
            tree: RTree::new(),
            boxes: HashMap::new(),
            tracked: None,
        }
    }

    fn rebuild(&mut self) {
        let objects = self
            .boxes
            .iter()
            .map(|(id, extent)| GeomWithData::new(to_rectangle(extent), *id))
            .collect();
        self.tree = RTree::bulk_load(objects);
    }
}

/// a named collection of rstar R-trees over entities in a [`Graph`], each
/// reconciled independently against the graph's edit history.
#[derive(Default)]
pub struct SpatialIndex {
    namespaces: HashMap<String, Namespace>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        SpatialIndex {
            namespaces: HashMap::new(),
        }
    }

    /// wholesale replaces the membership and geometry of `index_id`. resets
    /// its sync baseline, since the caller is asserting this is the ground
    /// truth going forward.
    pub fn replace(&mut self, index_id: &str, entities: impl IntoIterator<Item = (EntityId, Extent)>) {
        let mut ns = Namespace::empty();
        ns.boxes = entities.into_iter().collect();
        ns.rebuild();
        self.namespaces.insert(index_id.to_string(), ns);
    }

    /// removes a single entity from `index_id`, if present.
    pub fn remove(&mut self, index_id: &str, entity_id: EntityId) {
        if let Some(ns) = self.namespaces.get_mut(index_id) {
            if ns.boxes.remove(&entity_id).is_some() {
                ns.rebuild();
            }
        }
    }

    /// bounding boxes currently held in `index_id`.
    pub fn get_index(&self, index_id: &str) -> Option<&HashMap<EntityId, Extent>> {
        self.namespaces.get(index_id).map(|ns| &ns.boxes)
    }

    /// reconciles `index_id` against `current`: if this is the first
    /// sync, the current graph just becomes the baseline. otherwise the
    /// difference since the tracked baseline is computed and applied —
    /// deletions are dropped, and creations/modifications (plus their
    /// transitive parents) are re-projected and upserted. the R-tree is then
    /// rebuilt from the namespace's box map.
    pub fn sync(&mut self, index_id: &str, current: &Arc<Graph>, viewport: &dyn Viewport) {
        let ns = self
            .namespaces
            .entry(index_id.to_string())
            .or_insert_with(Namespace::empty);

        let tracked = match &ns.tracked {
            Some(t) => t.clone(),
            None => {
                ns.tracked = Some(current.clone());
                return;
            }
        };
        if tracked.key() == current.key() {
            return;
        }

        let diff = Difference::compute(&tracked, current);

        for id in &diff.deleted {
            ns.boxes.remove(id);
        }

        let mut to_refresh = HashSet::new();
        for id in diff.created.iter().chain(diff.modified.iter()) {
            touched_with_parents(*id, current, &mut to_refresh);
        }
        for id in to_refresh {
            match entity_extent(id, current, viewport) {
                Some(extent) => {
                    ns.boxes.insert(id, extent);
                }
                None => {
                    ns.boxes.remove(&id);
                }
            }
        }

        ns.rebuild();
        ns.tracked = Some(current.clone());
    }

    /// entities in `index_id` whose bounding box intersects `bbox`. callers
    /// should `sync` first if the index may be stale.
    pub fn search(&self, index_id: &str, bbox: &Extent) -> Vec<EntityId> {
        let Some(ns) = self.namespaces.get(index_id) else {
            return Vec::new();
        };
        let query = to_rectangle(bbox);
        ns.tree
            .locate_in_envelope_intersecting(&query.envelope())
            .map(|obj| obj.data)
            .collect()
    }
}
