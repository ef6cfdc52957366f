//! Entity definitions for the lore catalog.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unique identifier for all entities in the catalog.
///
/// Ids are stable content slugs (e.g. `"the-silent-choir"`), never generated
/// at runtime, so rebuilding a graph from the same catalog yields identical
/// edge ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub String);

impl EntityId {
    /// Create an entity ID from a stable slug.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw slug string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the id is usable (non-empty).
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Content categories for catalog entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Character,
    Episode,
    Mythos,
}

/// A narrative item in the catalog: a character, an episode, or a piece of
/// mythos lore.
///
/// Entities are immutable once loaded for the session; the graph engine
/// reads them but never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,

    /// Display name shown on the node.
    pub name: String,

    /// Content category, if the record carries one.
    #[serde(default)]
    pub category: Option<Category>,

    /// Ids of other entities this record references.
    #[serde(default)]
    pub referenced_ids: HashSet<EntityId>,
}

impl Entity {
    /// Create a new entity with the given id and name.
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            referenced_ids: HashSet::new(),
        }
    }

    /// Set the content category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Add a single cross-reference.
    pub fn with_reference(mut self, id: impl Into<EntityId>) -> Self {
        self.referenced_ids.insert(id.into());
        self
    }

    /// Add multiple cross-references.
    pub fn with_references<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<EntityId>,
    {
        self.referenced_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Check if this entity references another.
    pub fn references(&self, id: &EntityId) -> bool {
        self.referenced_ids.contains(id)
    }

    /// Number of shared references with another entity.
    pub fn shared_references(&self, other: &Entity) -> usize {
        self.referenced_ids
            .intersection(&other.referenced_ids)
            .count()
    }
}
