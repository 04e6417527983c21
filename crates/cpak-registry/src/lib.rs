//! Filesystem-backed package registry for cpak.

pub mod store;

pub use store::FsRegistry;
