//! Layout-owned node state and a small 2D vector helper.

use lore_catalog::EntityId;
use serde::{Deserialize, Serialize};

/// A 2D vector in graph (world) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn add(self, other: Vec2) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(self, other: Vec2) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Squared length; avoids the sqrt when only comparing magnitudes.
    pub fn length_sq(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Mutable per-node layout state.
///
/// Nodes are created on a full rebuild, always in 1:1 correspondence with
/// the entity set. Positions persist across filter changes and incremental
/// re-settles; only a rebuild replaces them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Pinned nodes are excluded from force integration; their position is
    /// written directly by the interaction layer.
    pub pinned: bool,
}

impl GraphNode {
    /// Create a node at rest at the given position.
    pub fn new(id: EntityId, position: Vec2) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::zero(),
            pinned: false,
        }
    }

    /// Kinetic energy contribution (unit mass).
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.velocity.length_sq()
    }
}
