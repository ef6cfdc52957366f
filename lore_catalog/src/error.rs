//! Catalog error types.

use thiserror::Error;

/// Errors produced while loading or validating catalog data.
///
/// Validation failures are fatal to that load cycle: the store keeps its
/// previous contents and the caller decides what to do. A graph must never
/// be built from a partially validated catalog, since edge ids derived from
/// it would not be stable.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The store was never loaded, or was loaded with zero entities.
    #[error("no catalog data loaded")]
    NoData,

    /// An entity record has an empty id.
    #[error("entity '{name}' has an empty id")]
    MissingId { name: String },

    /// Two entity records share the same id.
    #[error("duplicate entity id '{id}'")]
    DuplicateId { id: String },

    /// The raw JSON could not be parsed into entity records.
    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    /// Whether this error is a validation failure naming a specific entity.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CatalogError::MissingId { .. } | CatalogError::DuplicateId { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::DuplicateId {
            id: "hero".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate entity id 'hero'");

        let err = CatalogError::MissingId {
            name: "Nameless".to_string(),
        };
        assert!(err.to_string().contains("Nameless"));
    }

    #[test]
    fn test_is_validation() {
        assert!(CatalogError::MissingId {
            name: "x".to_string()
        }
        .is_validation());
        assert!(!CatalogError::NoData.is_validation());
    }
}
