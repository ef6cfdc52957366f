//! Render snapshots - the engine's output boundary.
//!
//! A snapshot is render-ready geometry and state. The renderer draws it;
//! the engine never draws pixels.

use serde::{Deserialize, Serialize};

use lore_catalog::{Category, EntityId};

use crate::connections::EdgeId;
use crate::viewport::Viewport;

/// A visible node, ready to draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderNode {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub label: String,
    pub category: Option<Category>,
    pub is_highlighted: bool,
}

/// A visible edge, ready to draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderEdge {
    pub id: EdgeId,
    pub from_id: EntityId,
    pub to_id: EntityId,
    pub strength: f32,
    pub is_highlighted: bool,
}

/// Everything the renderer needs for one frame.
///
/// Recomputed after every settled tick or interaction event; node order is
/// deterministic (sorted by entity id).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RenderSnapshot {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
    pub viewport: Viewport,
}

impl RenderSnapshot {
    /// An empty snapshot with the given transform (error and no-data
    /// states still carry a valid viewport).
    pub fn empty(viewport: Viewport) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            viewport,
        }
    }

    pub fn node(&self, id: &EntityId) -> Option<&RenderNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&RenderEdge> {
        self.edges.iter().find(|e| &e.id == id)
    }
}
