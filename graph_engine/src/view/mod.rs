//! The graph view facade - one owner for all mutable engine state.
//!
//! A `GraphView` wires the store, connection derivation, layout, filter,
//! viewport, and interaction together behind a synchronous command surface.
//! All state is owned by a single view instance and driven by an external
//! per-frame tick source; nothing here blocks or shares state across views.

mod ticker;

pub use ticker::TickHandle;

use lore_catalog::{CatalogError, EntityId, EntityStore};

use crate::connections::{derive_edges, ConnectionRules, Edge};
use crate::filter::{visible, FilterState, VisibleSet};
use crate::interaction::InteractionController;
use crate::layout::{LayoutConfig, LayoutEngine};
use crate::snapshot::{RenderEdge, RenderNode, RenderSnapshot};
use crate::viewport::{Bounds, ViewportConfig, ViewportController};

use ticker::TickFlag;

/// Top-level configuration for a graph view.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Seed for initial node placement; fixed seed means reproducible
    /// layouts.
    pub seed: u64,

    /// Node radius in graph units, used for fit/pan bounds and handed to
    /// the renderer.
    pub node_radius: f32,

    pub rules: ConnectionRules,
    pub layout: LayoutConfig,
    pub viewport: ViewportConfig,
    pub filter: FilterState,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            node_radius: 5.0,
            rules: ConnectionRules::default(),
            layout: LayoutConfig::default(),
            viewport: ViewportConfig::default(),
            filter: FilterState::default(),
        }
    }
}

/// Commands a UI toolkit feeds into the view.
///
/// Everything a pointer or control surface can do is expressible as a
/// command, so event plumbing stays out of the engine.
#[derive(Debug, Clone)]
pub enum Command {
    SetFilter(FilterState),
    SelectNode(Option<EntityId>),
    HoverNode(Option<EntityId>),
    StartDrag(EntityId),
    UpdateDrag { x: f32, y: f32 },
    EndDrag,
    ZoomBy { factor: f32, focal: (f32, f32) },
    ZoomToFit,
    PanBy { dx: f32, dy: f32 },
    Reload,
}

/// The interactive graph view over a lore catalog.
pub struct GraphView {
    config: GraphConfig,
    store: EntityStore,
    edges: Vec<Edge>,
    layout: LayoutEngine,
    filter: FilterState,
    viewport: ViewportController,
    interaction: InteractionController,
    error: Option<CatalogError>,
    ticks: TickFlag,
}

impl GraphView {
    /// Build a view over the given store. A failed build (no data, invalid
    /// catalog) records the error and leaves an empty graph; the view stays
    /// usable and `reload` can recover once the store is fixed.
    pub fn new(store: EntityStore, config: GraphConfig) -> Self {
        let mut view = Self {
            filter: config.filter.clone(),
            layout: LayoutEngine::new(config.layout.clone()),
            viewport: ViewportController::new(config.viewport.clone()),
            interaction: InteractionController::new(),
            edges: Vec::new(),
            error: None,
            ticks: TickFlag::new(),
            store,
            config,
        };
        view.rebuild();
        view
    }

    /// Build with default configuration.
    pub fn with_defaults(store: EntityStore) -> Self {
        Self::new(store, GraphConfig::default())
    }

    /// Subscribe the external tick source. Ticks only advance while the
    /// returned handle is alive; dropping it on view teardown guarantees
    /// no orphaned callbacks can drive a dead view.
    pub fn attach_ticker(&mut self) -> TickHandle {
        self.ticks.activate();
        self.ticks.handle()
    }

    /// Advance the layout by one step if the subscription is active and
    /// the layout is not yet settled. Returns whether a step was taken.
    pub fn tick(&mut self) -> bool {
        if !self.ticks.is_active() || self.layout.is_settled() {
            return false;
        }
        self.layout.step(&self.edges);
        true
    }

    /// Apply a command from the UI's event queue.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SetFilter(filter) => self.set_filter(filter),
            Command::SelectNode(id) => self.select_node(id),
            Command::HoverNode(id) => self.hover_node(id),
            Command::StartDrag(id) => {
                self.start_drag(id);
            }
            Command::UpdateDrag { x, y } => self.update_drag(x, y),
            Command::EndDrag => self.end_drag(),
            Command::ZoomBy { factor, focal } => self.zoom_by(factor, focal),
            Command::ZoomToFit => self.zoom_to_fit(),
            Command::PanBy { dx, dy } => self.pan_by(dx, dy),
            Command::Reload => self.reload(),
        }
    }

    /// Replace the filter. Node positions are untouched; only the visible
    /// projection changes.
    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    /// Select a node (`None` clears). Stale ids are no-ops.
    pub fn select_node(&mut self, id: Option<EntityId>) {
        match id {
            Some(id) if !self.layout.contains(&id) => {}
            other => self.interaction.select(other),
        }
    }

    /// Hover a node (`None` on pointer-leave). Stale ids are no-ops.
    pub fn hover_node(&mut self, id: Option<EntityId>) {
        match id {
            Some(id) if !self.layout.contains(&id) => {}
            other => self.interaction.hover(other),
        }
    }

    /// Begin dragging. Returns false while another drag is active.
    pub fn start_drag(&mut self, id: EntityId) -> bool {
        self.interaction.start_drag(id, &mut self.layout)
    }

    /// Move the dragged node to graph coordinates.
    pub fn update_drag(&mut self, x: f32, y: f32) {
        self.interaction.update_drag(x, y, &mut self.layout);
    }

    /// Drop the dragged node; layout resumes settling from there.
    pub fn end_drag(&mut self) {
        self.interaction.end_drag(&mut self.layout);
    }

    /// Zoom around a focal point in screen coordinates.
    pub fn zoom_by(&mut self, factor: f32, focal: (f32, f32)) {
        self.viewport.zoom_by(factor, focal);
    }

    /// Fit all currently visible nodes into the viewport. No-op when
    /// nothing is visible.
    pub fn zoom_to_fit(&mut self) {
        if let Some(bounds) = self.visible_bounds() {
            self.viewport.zoom_to_fit(bounds);
        }
    }

    /// Pan by a screen-space delta, clamped against the visible content.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        let bounds = self.visible_bounds();
        self.viewport.pan_by(dx, dy, bounds);
    }

    /// Rebuild edges and layout from the store's current contents - the
    /// only cache invalidation path. Edge ids stay identical for an
    /// unchanged catalog; positions are re-scattered (full rebuild).
    pub fn reload(&mut self) {
        self.rebuild();
    }

    /// The last build error, if the current graph is the empty fallback.
    pub fn error(&self) -> Option<&CatalogError> {
        self.error.as_ref()
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Mutable store access for loading new data before a `reload`.
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Project the current state into a render-ready snapshot, applying
    /// the filter and highlight at snapshot time.
    pub fn snapshot(&self) -> RenderSnapshot {
        if self.error.is_some() {
            return RenderSnapshot::empty(self.viewport.viewport());
        }

        let vis = self.visible_set();
        let highlight = self.interaction.highlight(&self.edges, &vis);
        let focus = self.interaction.state().focused();

        let nodes = self
            .layout
            .nodes()
            .iter()
            .filter(|n| vis.contains_node(&n.id))
            .map(|n| {
                let entity = self.store.get(&n.id);
                RenderNode {
                    id: n.id.clone(),
                    x: n.position.x,
                    y: n.position.y,
                    radius: self.config.node_radius,
                    label: entity.map(|e| e.name.clone()).unwrap_or_default(),
                    category: entity.and_then(|e| e.category),
                    is_highlighted: highlight.contains(&n.id),
                }
            })
            .collect();

        let edges = self
            .edges
            .iter()
            .filter(|e| vis.contains_edge(&e.id))
            .map(|e| RenderEdge {
                id: e.id.clone(),
                from_id: e.from_id.clone(),
                to_id: e.to_id.clone(),
                strength: e.strength,
                is_highlighted: focus.map(|f| e.touches(f)).unwrap_or(false),
            })
            .collect();

        RenderSnapshot {
            nodes,
            edges,
            viewport: self.viewport.viewport(),
        }
    }

    fn visible_set(&self) -> VisibleSet {
        visible(self.store.entities(), &self.edges, &self.filter)
    }

    fn visible_bounds(&self) -> Option<Bounds> {
        let vis = self.visible_set();
        Bounds::around_points(
            self.layout
                .nodes()
                .iter()
                .filter(|n| vis.contains_node(&n.id))
                .map(|n| n.position),
            self.config.node_radius,
        )
    }

    fn rebuild(&mut self) {
        if !self.store.is_loaded() || self.store.is_empty() {
            self.error = Some(CatalogError::NoData);
            self.edges.clear();
            self.layout.rebuild(&[], self.config.seed);
            self.interaction = InteractionController::new();
            return;
        }

        match derive_edges(self.store.entities(), &self.config.rules) {
            Ok(edges) => {
                self.edges = edges;
                self.error = None;
                self.layout.rebuild(self.store.entities(), self.config.seed);
                // Focus on an entity that no longer exists is dropped.
                let stale = self
                    .interaction
                    .state()
                    .focused()
                    .map(|id| !self.layout.contains(id))
                    .unwrap_or(false);
                if stale {
                    self.interaction = InteractionController::new();
                }
            }
            Err(err) => {
                log::warn!("graph rebuild failed: {}", err);
                self.error = Some(err);
                self.edges.clear();
                self.layout.rebuild(&[], self.config.seed);
                self.interaction = InteractionController::new();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lore_catalog::{Category, Entity};

    fn setup_store() -> EntityStore {
        let mut store = EntityStore::new();
        store
            .load_entities(vec![
                Entity::new("hero", "The Hero")
                    .with_category(Category::Character)
                    .with_references(["c1", "c2", "c3"]),
                Entity::new("villain", "The Villain")
                    .with_category(Category::Character)
                    .with_references(["c1", "c2"]),
                Entity::new("ep-01", "Pilot Episode")
                    .with_category(Category::Episode)
                    .with_references(["c1"]),
                Entity::new("relic", "The Relic").with_category(Category::Mythos),
            ])
            .unwrap();
        store
    }

    fn settled_view() -> GraphView {
        let mut view = GraphView::with_defaults(setup_store());
        let ticker = view.attach_ticker();
        while view.tick() {}
        drop(ticker);
        view
    }

    #[test]
    fn test_build_from_store() {
        let view = GraphView::with_defaults(setup_store());
        assert!(view.error().is_none());
        assert_eq!(view.layout().nodes().len(), 4);
        // hero-villain, hero-ep-01, villain-ep-01
        assert_eq!(view.edges().len(), 3);
    }

    #[test]
    fn test_empty_store_flags_no_data() {
        let view = GraphView::with_defaults(EntityStore::new());
        assert!(matches!(view.error(), Some(CatalogError::NoData)));

        let snapshot = view.snapshot();
        assert!(snapshot.nodes.is_empty());
        assert!(snapshot.edges.is_empty());
    }

    #[test]
    fn test_invalid_catalog_is_fatal_to_build() {
        let mut store = EntityStore::new();
        store
            .load_entities(vec![Entity::new("a", "A"), Entity::new("b", "B")])
            .unwrap();
        let mut view = GraphView::with_defaults(store);
        assert!(view.error().is_none());

        // A later load can only fail at the store; the view keeps working
        // with the last good catalog until reload.
        assert!(view
            .store_mut()
            .load_entities(vec![Entity::new("x", "X"), Entity::new("x", "X2")])
            .is_err());
        view.reload();
        assert!(view.error().is_none());
        assert_eq!(view.layout().nodes().len(), 2);
    }

    #[test]
    fn test_tick_requires_subscription() {
        let mut view = GraphView::with_defaults(setup_store());
        assert!(!view.tick());

        let ticker = view.attach_ticker();
        assert!(view.tick());

        drop(ticker);
        assert!(!view.tick());
    }

    #[test]
    fn test_ticks_stop_when_settled() {
        let mut view = GraphView::with_defaults(setup_store());
        let _ticker = view.attach_ticker();

        let mut steps = 0;
        while view.tick() {
            steps += 1;
            assert!(steps <= 700);
        }
        assert!(view.layout().is_settled());
        assert!(!view.tick());
    }

    #[test]
    fn test_snapshot_shape() {
        let view = settled_view();
        let snapshot = view.snapshot();

        assert_eq!(snapshot.nodes.len(), 4);
        assert_eq!(snapshot.edges.len(), 3);

        let hero = snapshot.node(&EntityId::new("hero")).unwrap();
        assert_eq!(hero.label, "The Hero");
        assert_eq!(hero.category, Some(Category::Character));
        assert!((hero.radius - 5.0).abs() < 0.001);
        assert!(!hero.is_highlighted);
    }

    #[test]
    fn test_selection_highlights_one_hop() {
        let mut view = settled_view();
        view.select_node(Some(EntityId::new("hero")));

        let snapshot = view.snapshot();
        for node in &snapshot.nodes {
            let expected = node.id.as_str() != "relic";
            assert_eq!(node.is_highlighted, expected, "node {}", node.id);
        }
        for edge in &snapshot.edges {
            let expected = edge.touches_id("hero");
            assert_eq!(edge.is_highlighted, expected, "edge {}", edge.id);
        }
    }

    #[test]
    fn test_select_stale_id_is_noop() {
        let mut view = settled_view();
        view.select_node(Some(EntityId::new("ghost")));
        assert!(view.snapshot().nodes.iter().all(|n| !n.is_highlighted));
    }

    #[test]
    fn test_positions_survive_filter_toggle() {
        let mut view = settled_view();
        let before: Vec<_> = view.layout().nodes().iter().map(|n| n.position).collect();

        view.set_filter(FilterState {
            categories: [Category::Character].into_iter().collect(),
            ..FilterState::default()
        });
        assert_eq!(view.snapshot().nodes.len(), 2);

        view.set_filter(FilterState::default());
        let after: Vec<_> = view.layout().nodes().iter().map(|n| n.position).collect();
        assert_eq!(before, after);
        assert_eq!(view.snapshot().nodes.len(), 4);
    }

    #[test]
    fn test_filter_applied_at_snapshot_time() {
        let mut view = settled_view();
        view.set_filter(FilterState {
            min_strength: 0.5,
            connected_only: true,
            ..FilterState::default()
        });

        let snapshot = view.snapshot();
        // Only hero-villain survives the strength cut.
        assert_eq!(snapshot.edges.len(), 1);
        assert_eq!(snapshot.nodes.len(), 2);
    }

    #[test]
    fn test_drag_through_commands() {
        let mut view = settled_view();

        view.apply(Command::StartDrag(EntityId::new("hero")));
        view.apply(Command::UpdateDrag { x: 40.0, y: 30.0 });

        let node = view.layout().node(&EntityId::new("hero")).unwrap();
        assert!(node.pinned);
        assert_eq!((node.position.x, node.position.y), (40.0, 30.0));

        view.apply(Command::EndDrag);
        let node = view.layout().node(&EntityId::new("hero")).unwrap();
        assert!(!node.pinned);
        // Dropping the node wakes the simulation again.
        assert!(!view.layout().is_settled());
    }

    #[test]
    fn test_zoom_to_fit_covers_visible_nodes() {
        let mut view = settled_view();
        view.zoom_to_fit();

        let snapshot = view.snapshot();
        let config = ViewportConfig::default();
        for node in &snapshot.nodes {
            let sx = node.x * snapshot.viewport.scale + snapshot.viewport.translate_x;
            let sy = node.y * snapshot.viewport.scale + snapshot.viewport.translate_y;
            assert!(sx >= 0.0 && sx <= config.width, "node {} at sx {}", node.id, sx);
            assert!(sy >= 0.0 && sy <= config.height, "node {} at sy {}", node.id, sy);
        }
    }

    #[test]
    fn test_zoom_to_fit_with_nothing_visible_is_noop() {
        let mut view = settled_view();
        let before = view.snapshot().viewport;

        view.set_filter(FilterState {
            search_query: "no such name".to_string(),
            ..FilterState::default()
        });
        view.zoom_to_fit();

        let after = view.snapshot().viewport;
        assert!((before.scale - after.scale).abs() < 0.001);
        assert!((before.translate_x - after.translate_x).abs() < 0.001);
    }

    #[test]
    fn test_reload_keeps_edge_ids_for_unchanged_catalog() {
        let mut view = settled_view();
        let before: Vec<_> = view.edges().iter().map(|e| e.id.clone()).collect();

        view.apply(Command::Reload);
        let after: Vec<_> = view.edges().iter().map(|e| e.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_reload_drops_stale_focus() {
        let mut view = settled_view();
        view.select_node(Some(EntityId::new("relic")));

        view.store_mut()
            .load_entities(vec![
                Entity::new("hero", "The Hero").with_reference("c1"),
                Entity::new("villain", "The Villain").with_reference("c1"),
            ])
            .unwrap();
        view.reload();

        assert!(view.snapshot().nodes.iter().all(|n| !n.is_highlighted));
        assert_eq!(view.layout().nodes().len(), 2);
    }

    #[test]
    fn test_layout_determinism_across_views() {
        let settle = || {
            let mut view = GraphView::with_defaults(setup_store());
            let _t = view.attach_ticker();
            while view.tick() {}
            view.snapshot()
        };

        let a = settle();
        let b = settle();
        for (na, nb) in a.nodes.iter().zip(&b.nodes) {
            assert_eq!(na.id, nb.id);
            assert_eq!((na.x, na.y), (nb.x, nb.y));
        }
    }

    impl RenderEdge {
        fn touches_id(&self, id: &str) -> bool {
            self.from_id.as_str() == id || self.to_id.as_str() == id
        }
    }
}
