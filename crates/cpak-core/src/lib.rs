//! Core domain types for the cpak dependency manager: package coordinates,
//! version ordering, soft/hard references, and manifest models.

pub mod coordinate;
pub mod manifest;
pub mod reference;
pub mod version;
