//! Force-directed layout - a discrete-time simulation over graph nodes.
//!
//! Each tick applies three forces:
//! 1. **Repulsion**: every node pair pushes apart (inverse-square, distance
//!    clamped to avoid singularities)
//! 2. **Attraction**: every edge pulls its endpoints together, scaled by
//!    edge strength
//! 3. **Centering**: a weak pull toward the layout center bounds drift
//!
//! Velocity is damped each tick; the layout is *settled* once total kinetic
//! energy drops below a threshold, with a hard step cap guaranteeing
//! termination. The step function is pure state-to-state and driven by an
//! external scheduler, so the physics is testable without a clock.

mod node;

pub use node::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

use lore_catalog::{Entity, EntityId};

use crate::connections::Edge;

/// Tunables for the force simulation.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Repulsive charge between node pairs.
    pub repulsion: f32,

    /// Spring coefficient for edge attraction.
    pub spring: f32,

    /// Pull toward the layout center.
    pub centering: f32,

    /// Velocity retained each tick (0.0-1.0).
    pub damping: f32,

    /// Minimum pair distance used in the repulsion term.
    pub min_distance: f32,

    /// Integration step size per tick.
    pub time_step: f32,

    /// Total kinetic energy below which the layout counts as settled.
    pub settle_threshold: f32,

    /// Hard cap on ticks since the last wake.
    pub max_steps: u32,

    /// Layout area, used for the center point and initial scatter.
    pub width: f32,
    pub height: f32,

    /// Radius of the initial scatter around the center.
    pub scatter_radius: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            repulsion: 1500.0,
            spring: 0.02,
            centering: 0.005,
            damping: 0.85,
            min_distance: 24.0,
            time_step: 1.0,
            settle_threshold: 0.05,
            max_steps: 600,
            width: 1200.0,
            height: 800.0,
            scatter_radius: 250.0,
        }
    }
}

/// The force-directed layout engine.
///
/// Owns the mutable `GraphNode` set, kept in 1:1 correspondence with the
/// entity set by `rebuild`. Nodes are stored sorted by id and iterated in
/// that order, so a given seed always produces the same layout.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
    nodes: Vec<GraphNode>,
    index: HashMap<EntityId, usize>,
    settled: bool,
    steps_since_wake: u32,
    instability_resets: u32,
}

impl LayoutEngine {
    /// Create an empty engine with the given configuration.
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            index: HashMap::new(),
            settled: true,
            steps_since_wake: 0,
            instability_resets: 0,
        }
    }

    /// Replace the node set from the entity set, scattering initial
    /// positions with a seeded generator for reproducibility.
    ///
    /// Discards all previous positions; use `wake` instead when the entity
    /// set has not changed.
    pub fn rebuild(&mut self, entities: &[Entity], seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let center = self.center();

        let mut ids: Vec<EntityId> = entities.iter().map(|e| e.id.clone()).collect();
        ids.sort();

        self.nodes.clear();
        self.index.clear();
        for id in ids {
            let r = self.config.scatter_radius;
            let position = Vec2::new(
                center.x + rng.gen_range(-r..=r),
                center.y + rng.gen_range(-r..=r),
            );
            self.index.insert(id.clone(), self.nodes.len());
            self.nodes.push(GraphNode::new(id, position));
        }

        log::debug!("layout rebuilt with {} nodes (seed {})", self.nodes.len(), seed);
        self.wake();
    }

    /// Advance the simulation by one discrete tick.
    ///
    /// Pinned nodes exert forces on others but are not integrated. Returns
    /// whether the layout is settled after this tick.
    pub fn step(&mut self, edges: &[Edge]) -> bool {
        if self.settled || self.nodes.is_empty() {
            self.settled = true;
            return true;
        }

        // Sanitize before computing forces; a single NaN would otherwise
        // contaminate every other node this tick.
        self.recover_instability();

        let mut forces = vec![Vec2::zero(); self.nodes.len()];

        // Repulsion between every pair.
        for i in 0..self.nodes.len() {
            for j in (i + 1)..self.nodes.len() {
                let delta = self.nodes[j].position.sub(self.nodes[i].position);
                let distance = delta.length().max(self.config.min_distance);
                let magnitude = self.config.repulsion / (distance * distance);
                let direction = delta.scale(1.0 / distance);

                forces[i] = forces[i].sub(direction.scale(magnitude));
                forces[j] = forces[j].add(direction.scale(magnitude));
            }
        }

        // Spring attraction along edges, scaled by strength.
        for edge in edges {
            let (Some(&i), Some(&j)) = (self.index.get(&edge.from_id), self.index.get(&edge.to_id))
            else {
                continue;
            };
            let delta = self.nodes[j].position.sub(self.nodes[i].position);
            let pull = delta.scale(self.config.spring * edge.strength);

            forces[i] = forces[i].add(pull);
            forces[j] = forces[j].sub(pull);
        }

        // Weak centering pull.
        let center = self.center();
        for (i, node) in self.nodes.iter().enumerate() {
            let to_center = center.sub(node.position);
            forces[i] = forces[i].add(to_center.scale(self.config.centering));
        }

        // Integrate unpinned nodes.
        let dt = self.config.time_step;
        for (i, node) in self.nodes.iter_mut().enumerate() {
            if node.pinned {
                continue;
            }
            node.velocity = node.velocity.add(forces[i].scale(dt)).scale(self.config.damping);
            node.position = node.position.add(node.velocity.scale(dt));
        }

        // Integration itself can overflow in degenerate configurations.
        self.recover_instability();

        self.steps_since_wake += 1;
        let energy: f32 = self
            .nodes
            .iter()
            .filter(|n| !n.pinned)
            .map(GraphNode::kinetic_energy)
            .sum();
        if energy < self.config.settle_threshold || self.steps_since_wake >= self.config.max_steps {
            self.settled = true;
        }
        self.settled
    }

    /// Resume settling from current positions (no re-scatter).
    pub fn wake(&mut self) {
        self.settled = self.nodes.is_empty();
        self.steps_since_wake = 0;
    }

    /// Whether the simulation currently counts as settled.
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Pin a node, excluding it from force integration. Stale ids are
    /// no-ops.
    pub fn pin(&mut self, id: &EntityId) {
        if let Some(&i) = self.index.get(id) {
            self.nodes[i].pinned = true;
            self.nodes[i].velocity = Vec2::zero();
            self.wake();
        }
    }

    /// Release a pinned node so the simulation resumes integrating it.
    pub fn unpin(&mut self, id: &EntityId) {
        if let Some(&i) = self.index.get(id) {
            self.nodes[i].pinned = false;
            self.wake();
        }
    }

    /// Write a node's position directly (drag moves). Stale ids are no-ops.
    pub fn set_position(&mut self, id: &EntityId, x: f32, y: f32) {
        if let Some(&i) = self.index.get(id) {
            self.nodes[i].position = Vec2::new(x, y);
            self.nodes[i].velocity = Vec2::zero();
            self.wake();
        }
    }

    /// All nodes, sorted by id.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Look up a node by id.
    pub fn node(&self, id: &EntityId) -> Option<&GraphNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Whether a node with this id exists.
    pub fn contains(&self, id: &EntityId) -> bool {
        self.index.contains_key(id)
    }

    /// How many nodes have been reset due to numerical instability.
    pub fn instability_resets(&self) -> u32 {
        self.instability_resets
    }

    /// The layout center point.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.config.width / 2.0, self.config.height / 2.0)
    }

    /// Reset any node that has gone non-finite to a safe coordinate near
    /// the center, with a per-node deterministic offset so coincident
    /// resets do not stack.
    fn recover_instability(&mut self) {
        let center = self.center();
        for (i, node) in self.nodes.iter_mut().enumerate() {
            if node.position.is_finite() && node.velocity.is_finite() {
                continue;
            }
            // Golden-angle spiral keeps repeated resets apart.
            let angle = i as f32 * 2.399_963;
            node.position = Vec2::new(
                center.x + 12.0 * angle.cos(),
                center.y + 12.0 * angle.sin(),
            );
            node.velocity = Vec2::zero();
            self.instability_resets += 1;
            log::warn!("reset non-finite position for node '{}'", node.id);
        }
    }
}
