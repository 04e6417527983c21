//! Dependency resolution engine for cpak.
//!
//! The engine is a pure state machine: an external driver asks it for
//! pending references, resolves each one out-of-process (fetch + parse),
//! and feeds the result back in. The engine records dependency edges,
//! unifies conflicting versions of the same package, and derives a
//! dependency-respecting build order over everything that resolved.

pub mod driver;
pub mod graph;
pub mod order;
pub mod scope;
pub mod unify;
