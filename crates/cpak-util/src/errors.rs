use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all cpak operations.
#[derive(Debug, Error, Diagnostic)]
pub enum CpakError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (cpak.toml or a registry manifest).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check the manifest for syntax errors"))]
    Manifest { message: String },

    /// Registry store lookup or layout problem.
    #[error("Registry error: {message}")]
    Store { message: String },

    /// Dependency resolution failed (missing dependencies, usage violations).
    #[error("Dependency resolution failed: {message}")]
    Resolution { message: String },

    /// Internal invariant violation. Not caused by user input.
    #[error("Internal error: {message}")]
    #[diagnostic(help("This is a bug in cpak, please report it"))]
    Internal { message: String },
}
