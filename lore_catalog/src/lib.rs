//! # Lore Catalog
//!
//! The "Codex" crate - narrative entity records for characters, episodes,
//! and mythos lore. This crate is the single source of truth for entity data
//! and does not contain any graph logic.

pub mod entity;
pub mod error;
pub mod store;

pub use entity::*;
pub use error::*;
pub use store::*;
