//! Entity store - the caller-owned cache of catalog records.

use std::collections::HashSet;

use crate::entity::{Entity, EntityId};
use crate::error::CatalogError;

/// An explicit, caller-constructed store of entities.
///
/// The store is loaded once and cached for the session; the cache is
/// replaced only by another explicit `load_*` call, never automatically.
/// There is deliberately no process-wide singleton: the caller owns the
/// store's lifecycle and passes it to whoever needs it.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
    loaded: bool,
}

impl EntityStore {
    /// Create a new empty, unloaded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load entities from a JSON array of records, replacing the cache.
    ///
    /// Returns the number of entities loaded. On any parse or validation
    /// failure the previous cache is left untouched.
    pub fn load_json(&mut self, json: &str) -> Result<usize, CatalogError> {
        let entities: Vec<Entity> = serde_json::from_str(json)?;
        self.load_entities(entities)
    }

    /// Load entities from an in-memory collection, replacing the cache.
    ///
    /// Validates that every entity has a non-empty, unique id. On failure
    /// the previous cache is left untouched.
    pub fn load_entities(&mut self, entities: Vec<Entity>) -> Result<usize, CatalogError> {
        validate_entities(&entities)?;
        let count = entities.len();
        self.entities = entities;
        self.loaded = true;
        Ok(count)
    }

    /// All entities in catalog order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Look up an entity by id.
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| &e.id == id)
    }

    /// Whether a load has ever succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Number of entities in the store.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the store holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Validate a batch of entities: every id non-empty and unique.
///
/// Fails fast on the first offender, naming it.
pub fn validate_entities(entities: &[Entity]) -> Result<(), CatalogError> {
    let mut seen: HashSet<&EntityId> = HashSet::new();

    for entity in entities {
        if !entity.id.is_valid() {
            return Err(CatalogError::MissingId {
                name: entity.name.clone(),
            });
        }
        if !seen.insert(&entity.id) {
            return Err(CatalogError::DuplicateId {
                id: entity.id.as_str().to_string(),
            });
        }
    }

    Ok(())
}
