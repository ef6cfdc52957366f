//! Interaction - the hover/select/drag state machine.
//!
//! The controller is fed commands synchronously (pointer events already
//! translated by the caller); it owns no graph data itself and coordinates
//! pinning with the layout engine.

use std::collections::HashSet;

use lore_catalog::EntityId;

use crate::connections::Edge;
use crate::filter::VisibleSet;
use crate::layout::LayoutEngine;

/// Interaction states. At most one node is focused at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Hovering(EntityId),
    Selected(EntityId),
    Dragging(EntityId),
}

impl InteractionState {
    /// The node currently receiving focus, if any.
    pub fn focused(&self) -> Option<&EntityId> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Hovering(id)
            | InteractionState::Selected(id)
            | InteractionState::Dragging(id) => Some(id),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, InteractionState::Dragging(_))
    }
}

/// Drives interaction state transitions and layout pinning.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: InteractionState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Pointer moved over a node (`Some`) or empty canvas (`None`).
    ///
    /// Hover only applies from Idle or Hovering; selection and drag are
    /// sticky.
    pub fn hover(&mut self, target: Option<EntityId>) {
        match (&self.state, target) {
            (InteractionState::Idle | InteractionState::Hovering(_), Some(id)) => {
                self.state = InteractionState::Hovering(id);
            }
            (InteractionState::Hovering(_), None) => {
                self.state = InteractionState::Idle;
            }
            _ => {}
        }
    }

    /// Click over a node (`Some`) or empty canvas (`None`, which clears a
    /// selection). Ignored mid-drag.
    pub fn select(&mut self, target: Option<EntityId>) {
        if self.state.is_dragging() {
            return;
        }
        self.state = match target {
            Some(id) => InteractionState::Selected(id),
            None => InteractionState::Idle,
        };
    }

    /// Begin dragging a node, pinning it in the layout.
    ///
    /// Returns false without side effects when another drag is already
    /// active (the one mutual-exclusion rule in the engine) or the node
    /// does not exist.
    pub fn start_drag(&mut self, id: EntityId, layout: &mut LayoutEngine) -> bool {
        if self.state.is_dragging() || !layout.contains(&id) {
            return false;
        }
        layout.pin(&id);
        self.state = InteractionState::Dragging(id);
        true
    }

    /// Move the dragged node. The layout does not integrate it; the
    /// position is written directly. No-op unless dragging.
    pub fn update_drag(&mut self, x: f32, y: f32, layout: &mut LayoutEngine) {
        if let InteractionState::Dragging(id) = &self.state {
            layout.set_position(id, x, y);
        }
    }

    /// End the drag: unpin and let the layout resume settling from the
    /// dropped position. A drag whose node has vanished (concurrent
    /// rebuild) is a no-op that returns to Idle.
    pub fn end_drag(&mut self, layout: &mut LayoutEngine) {
        if let InteractionState::Dragging(id) = &self.state {
            if layout.contains(id) {
                let id = id.clone();
                layout.unpin(&id);
                self.state = InteractionState::Selected(id);
            } else {
                self.state = InteractionState::Idle;
            }
        }
    }

    /// The highlighted subgraph: the focused node plus its 1-hop
    /// neighbors via visible edges. Empty when idle. This is derived
    /// state exposed in the snapshot, never a graph mutation.
    pub fn highlight(&self, edges: &[Edge], visible: &VisibleSet) -> HashSet<EntityId> {
        let Some(focus) = self.state.focused() else {
            return HashSet::new();
        };

        let mut set = HashSet::new();
        set.insert(focus.clone());
        for edge in edges {
            if !visible.contains_edge(&edge.id) {
                continue;
            }
            if let Some(other) = edge.other_endpoint(focus) {
                set.insert(other.clone());
            }
        }
        set
    }
}
