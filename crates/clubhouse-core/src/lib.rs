//! # clubhouse-core
//!
//! The access gate for the Clubhouse site.
//!
//! This crate provides:
//! - The collaborator traits (`IdentityProvider`, `AccessAuditor`, `ResourceStore`)
//! - The pure `evaluate` function and the `AccessGate` that wraps it
//!
//! ## Usage
//!
//! ```rust,ignore
//! use clubhouse_core::{AccessGate, traits::{IdentityProvider, ResourceStore}};
//!
//! gate.authorize(&credentials, Operation::DeleteGalleryImage).await?;
//! store.delete_gallery_image(&id).await?;
//! ```

pub mod gate;
pub mod traits;

pub use gate::{evaluate, AccessGate};
