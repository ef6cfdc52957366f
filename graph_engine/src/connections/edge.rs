//! Edge definitions - derived relationships between entities.

use lore_catalog::EntityId;
use serde::{Deserialize, Serialize};

/// Unique identifier for edges.
///
/// Deterministic: composed from the two entity ids in canonical order plus
/// a running index, so rebuilding from the same catalog yields identical
/// ids. Required for animation and test stability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub String);

impl EdgeId {
    /// Compose an edge id from an ordered pair and a disambiguating index.
    pub fn compose(a: &EntityId, b: &EntityId, index: usize) -> Self {
        Self(format!("{}--{}#{}", a, b, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kinds of derived connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    /// Entities share one or more references.
    Related,
}

/// A derived, undirected relationship between two entities.
///
/// Exactly one edge is emitted per unordered pair with a nonempty reference
/// overlap; `(a, b)` and `(b, a)` are the same edge. Strength is always in
/// `[0, 1]` and there are no self-loops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub from_id: EntityId,
    pub to_id: EntityId,
    pub connection_type: ConnectionType,
    /// Connection strength from 0.0 to 1.0.
    pub strength: f32,
}

impl Edge {
    /// Whether this edge touches the given entity.
    pub fn touches(&self, id: &EntityId) -> bool {
        &self.from_id == id || &self.to_id == id
    }

    /// The endpoint opposite to `id`, if `id` is an endpoint at all.
    pub fn other_endpoint(&self, id: &EntityId) -> Option<&EntityId> {
        if &self.from_id == id {
            Some(&self.to_id)
        } else if &self.to_id == id {
            Some(&self.from_id)
        } else {
            None
        }
    }
}
