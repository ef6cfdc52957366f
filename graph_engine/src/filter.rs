//! Filtering - pure projection of the full graph to a visible subset.
//!
//! Filtering only marks visibility; it never deletes nodes, so layout
//! positions survive filter toggling.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use lore_catalog::{Category, Entity, EntityId};

use crate::connections::{Edge, EdgeId};

/// The complete set of recognized filter fields.
///
/// Unrecognized fields in serialized filter state are rejected at parse
/// time rather than silently ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct FilterState {
    /// Categories to show. Empty means "all".
    pub categories: HashSet<Category>,

    /// Case-insensitive substring match against entity names. Empty
    /// matches everything.
    pub search_query: String,

    /// Minimum edge strength to show.
    pub min_strength: f32,

    /// Hide nodes that pass the other tests but have no visible edges.
    pub connected_only: bool,
}

impl FilterState {
    /// Whether an entity passes the category and search tests.
    fn matches_entity(&self, entity: &Entity) -> bool {
        let category_ok = self.categories.is_empty()
            || entity
                .category
                .map(|c| self.categories.contains(&c))
                .unwrap_or(false);

        let search_ok = self.search_query.is_empty()
            || entity
                .name
                .to_lowercase()
                .contains(&self.search_query.to_lowercase());

        category_ok && search_ok
    }
}

/// The visible subset of the graph under a filter.
#[derive(Debug, Clone, Default)]
pub struct VisibleSet {
    pub node_ids: HashSet<EntityId>,
    pub edge_ids: HashSet<EdgeId>,
}

impl VisibleSet {
    pub fn contains_node(&self, id: &EntityId) -> bool {
        self.node_ids.contains(id)
    }

    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edge_ids.contains(id)
    }
}

/// Project the graph to its visible subset. Pure.
///
/// A node is visible iff it passes the category test (member of the set,
/// or the set is empty) and the search test (case-insensitive substring of
/// the name). An edge is visible iff both endpoints are visible and its
/// strength meets `min_strength`. With `connected_only`, passing nodes
/// with zero visible edges are excluded.
///
/// Monotonic in the category set: adding a category can only add visible
/// nodes, never remove any (other fields held fixed).
pub fn visible(entities: &[Entity], edges: &[Edge], filter: &FilterState) -> VisibleSet {
    let mut node_ids: HashSet<EntityId> = entities
        .iter()
        .filter(|e| filter.matches_entity(e))
        .map(|e| e.id.clone())
        .collect();

    let mut edge_ids = HashSet::new();
    let mut connected: HashSet<&EntityId> = HashSet::new();
    for edge in edges {
        if edge.strength >= filter.min_strength
            && node_ids.contains(&edge.from_id)
            && node_ids.contains(&edge.to_id)
        {
            edge_ids.insert(edge.id.clone());
            connected.insert(&edge.from_id);
            connected.insert(&edge.to_id);
        }
    }

    if filter.connected_only {
        node_ids.retain(|id| connected.contains(id));
    }

    VisibleSet { node_ids, edge_ids }
}
