//! Soft and hard dependency references.
//!
//! A soft reference is a name as originally requested, before anything is
//! known about whether it resolves: a root from cpak.toml or a coordinate
//! string discovered transitively. A hard reference is a dependency string
//! declared inside an already-resolved manifest; it must parse into a full
//! coordinate or the reference is permanently unresolvable.

use std::fmt;

/// A dependency name awaiting resolution, keyed by its original string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftReference {
    pub name: String,
}

impl SoftReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for SoftReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A dependency string declared by a resolved manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardReference {
    pub name: String,
}

impl HardReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for HardReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
