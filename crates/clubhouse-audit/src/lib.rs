//! # clubhouse-audit
//!
//! Append-only, SHA-256 hash-chained log of access decisions for the
//! Clubhouse admin back-office.
//!
//! ## Overview
//!
//! Every protected operation the access gate evaluates is wrapped in an
//! `ActivityEvent` that links to the previous event via its hash. Editing
//! any stored event breaks the chain and is detected by `verify_chain`.
//! The in-memory log keeps a bounded window of recent events; a window
//! anchored on the last discarded hash is checked with `verify_window`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use clubhouse_audit::InMemoryActivityLog;
//!
//! let log = Arc::new(InMemoryActivityLog::new("site"));
//! let gate = AccessGate::new(policy, catalog, identity, log.clone());
//! assert!(log.verify_integrity()?);
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{hash_event, verify_chain, verify_window};
pub use event::{ActivityEvent, ActivityLog};
pub use memory::{InMemoryActivityLog, DEFAULT_CAPACITY};

// ── Tests ─────────────────────────────────────────────────────────────────────
