//! Edge derivation from shared references.

use lore_catalog::{validate_entities, CatalogError, Entity};
use serde::{Deserialize, Serialize};

use super::{ConnectionType, Edge, EdgeId};

/// Tunables for connection derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionRules {
    /// Overlap count at which strength saturates to 1.0.
    ///
    /// Whether this should scale with corpus size is an open question; it
    /// is a plain tunable for now.
    pub overlap_cap: f32,
}

impl Default for ConnectionRules {
    fn default() -> Self {
        Self { overlap_cap: 3.0 }
    }
}

/// Derive the edge set from entities' shared references. Pure.
///
/// Each unordered pair of entities is visited exactly once, over entities
/// sorted by id so that emission order (and therefore every edge id) is
/// deterministic. A pair with a nonempty reference overlap produces one
/// edge with `strength = min(1, overlap / overlap_cap)`.
///
/// Entities with missing or duplicate ids abort the build entirely: a
/// partial graph would have unstable edge ids.
///
/// `O(n² · k)` for n entities and average reference-set size k, which is
/// fine for a catalog of a few hundred records.
pub fn derive_edges(entities: &[Entity], rules: &ConnectionRules) -> Result<Vec<Edge>, CatalogError> {
    validate_entities(entities)?;

    let mut sorted: Vec<&Entity> = entities.iter().collect();
    sorted.sort_by(|a, b| a.id.cmp(&b.id));

    let mut edges = Vec::new();

    for i in 0..sorted.len() {
        let e = sorted[i];
        if e.referenced_ids.is_empty() {
            continue;
        }
        for f in &sorted[i + 1..] {
            let overlap = e.shared_references(f);
            if overlap == 0 {
                continue;
            }

            let strength = (overlap as f32 / rules.overlap_cap).min(1.0);
            edges.push(Edge {
                id: EdgeId::compose(&e.id, &f.id, edges.len()),
                from_id: e.id.clone(),
                to_id: f.id.clone(),
                connection_type: ConnectionType::Related,
                strength,
            });
        }
    }

    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lore_catalog::EntityId;

    fn setup_catalog() -> Vec<Entity> {
        vec![
            Entity::new("a", "A").with_references(["c1", "c2", "c3"]),
            Entity::new("b", "B").with_references(["c1", "c2"]),
            Entity::new("c", "C").with_reference("c4"),
        ]
    }

    #[test]
    fn test_overlap_example() {
        let edges = derive_edges(&setup_catalog(), &ConnectionRules::default()).unwrap();

        // One edge A-B with strength min(1, 2/3); nothing touches C.
        assert_eq!(edges.len(), 1);
        let edge = &edges[0];
        assert_eq!(edge.from_id, EntityId::new("a"));
        assert_eq!(edge.to_id, EntityId::new("b"));
        assert!((edge.strength - 2.0 / 3.0).abs() < 0.001);
        assert_eq!(edge.connection_type, ConnectionType::Related);
    }

    #[test]
    fn test_symmetry() {
        let mut reversed = setup_catalog();
        reversed.reverse();

        let forward = derive_edges(&setup_catalog(), &ConnectionRules::default()).unwrap();
        let backward = derive_edges(&reversed, &ConnectionRules::default()).unwrap();

        // Input order never changes the result: same ids, same strengths.
        assert_eq!(forward.len(), backward.len());
        for (f, b) in forward.iter().zip(&backward) {
            assert_eq!(f.id, b.id);
            assert_eq!(f.from_id, b.from_id);
            assert_eq!(f.to_id, b.to_id);
            assert!((f.strength - b.strength).abs() < 0.0001);
        }
    }

    #[test]
    fn test_strength_bounds_and_pair_count() {
        // Everything references the same three things: all pairs connect
        // at full saturation.
        let entities: Vec<Entity> = (0..6)
            .map(|i| {
                Entity::new(format!("e{}", i), format!("E{}", i))
                    .with_references(["x", "y", "z", "w"])
            })
            .collect();

        let edges = derive_edges(&entities, &ConnectionRules::default()).unwrap();

        let n = entities.len();
        assert_eq!(edges.len(), n * (n - 1) / 2);
        for edge in &edges {
            assert!(edge.strength >= 0.0 && edge.strength <= 1.0);
            assert!((edge.strength - 1.0).abs() < 0.001); // 4 shared, cap 3
            assert_ne!(edge.from_id, edge.to_id);
        }
    }

    #[test]
    fn test_deterministic_ids_across_rebuilds() {
        let first = derive_edges(&setup_catalog(), &ConnectionRules::default()).unwrap();
        let second = derive_edges(&setup_catalog(), &ConnectionRules::default()).unwrap();

        let first_ids: Vec<_> = first.iter().map(|e| e.id.as_str().to_string()).collect();
        let second_ids: Vec<_> = second.iter().map(|e| e.id.as_str().to_string()).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn test_no_edges_without_overlap() {
        let entities = vec![
            Entity::new("a", "A").with_reference("x"),
            Entity::new("b", "B").with_reference("y"),
            Entity::new("c", "C"),
        ];
        let edges = derive_edges(&entities, &ConnectionRules::default()).unwrap();
        assert!(edges.is_empty());
    }

    #[test]
    fn test_custom_overlap_cap() {
        let entities = vec![
            Entity::new("a", "A").with_references(["x", "y"]),
            Entity::new("b", "B").with_references(["x", "y"]),
        ];

        let rules = ConnectionRules { overlap_cap: 2.0 };
        let edges = derive_edges(&entities, &rules).unwrap();
        assert!((edges[0].strength - 1.0).abs() < 0.001);

        let rules = ConnectionRules { overlap_cap: 8.0 };
        let edges = derive_edges(&entities, &rules).unwrap();
        assert!((edges[0].strength - 0.25).abs() < 0.001);
    }

    #[test]
    fn test_validation_aborts_build() {
        let entities = vec![
            Entity::new("a", "A").with_reference("x"),
            Entity::new("a", "A Again").with_reference("x"),
        ];
        let err = derive_edges(&entities, &ConnectionRules::default()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { ref id } if id == "a"));

        let entities = vec![Entity::new("", "Nameless").with_reference("x")];
        let err = derive_edges(&entities, &ConnectionRules::default()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingId { ref name } if name == "Nameless"));
    }
}
