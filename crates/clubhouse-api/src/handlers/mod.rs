//! Route handlers.
//!
//! Every handler follows the same order: authorize through the access gate,
//! then parse and validate the input, then call the store. A denied request
//! never reaches validation and an invalid one never reaches the store.

pub mod admin;
pub mod fixtures;
pub mod galleries;
pub mod images;
pub mod public;
pub mod training;
