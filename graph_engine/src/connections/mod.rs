//! Connection derivation - turning shared references into weighted edges.
//!
//! Two entities are connected when their `referenced_ids` sets overlap. The
//! overlap count, normalized by a tunable cap, becomes the edge strength.

mod builder;
mod edge;

pub use builder::*;
pub use edge::*;
