//! Shared utilities for the cpak dependency manager.
//!
//! Cross-cutting concerns used by the other cpak crates: the unified error
//! type and terminal status output.

pub mod errors;
pub mod progress;
