//! # clubhouse-store
//!
//! In-memory `ResourceStore` for the Clubhouse site, optionally seeded from a
//! JSON file at startup. Records are lost on restart.

pub mod memory;
pub mod seed;

pub use memory::{utc_today, Clock, InMemoryResourceStore};
pub use seed::{SeedData, SeedGallery};

// ── Tests ─────────────────────────────────────────────────────────────────────
