//! # Graph Engine (The Loom)
//!
//! Derives a weighted relationship graph from shared references between lore
//! entities, lays it out with a force-directed simulation, and drives an
//! interactive viewport over that layout.
//!
//! ## Core Components
//!
//! - **connections**: derives the edge set from entities' shared references
//! - **layout**: discrete-time force simulation computing node positions
//! - **filter**: pure projection of the full graph to a visible subset
//! - **viewport**: zoom/pan transform and fit-to-content
//! - **interaction**: hover/select/drag state machine and highlight sets
//! - **view**: the `GraphView` facade tying everything together
//!
//! ## Design Philosophy
//!
//! - **Pure where possible**: edge derivation, filtering, and the layout
//!   step are functions of their inputs, testable without a clock or a UI
//! - **Renderer-agnostic**: the engine produces a render-ready snapshot of
//!   geometry and state; drawing pixels is someone else's job
//! - **Single owner**: all mutable state lives in one `GraphView` per graph
//!   view, driven by an external per-frame tick source

pub mod connections;
pub mod filter;
pub mod interaction;
pub mod layout;
pub mod snapshot;
pub mod view;
pub mod viewport;

pub use connections::*;
pub use filter::*;
pub use interaction::*;
pub use layout::*;
pub use snapshot::*;
pub use view::*;
pub use viewport::*;
