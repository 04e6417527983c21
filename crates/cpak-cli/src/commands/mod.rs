//! Command dispatch and handler modules.

mod check;
mod resolve;
mod why;

use std::path::Path;

use miette::Result;

use cpak_core::manifest::Manifest;
use cpak_core::reference::SoftReference;
use cpak_registry::FsRegistry;
use cpak_resolver::driver;
use cpak_resolver::scope::ResolutionScope;
use cpak_util::errors::CpakError;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Resolve {
            registry,
            manifest,
            format,
        } => resolve::exec(&registry, &manifest, format),
        Command::Check { registry, manifest } => check::exec(&registry, &manifest),
        Command::Why {
            reference,
            registry,
            manifest,
        } => why::exec(&reference, &registry, &manifest),
    }
}

/// Load the project manifest and drive its dependency closure to completion
/// against a registry.
pub(crate) fn resolve_project(
    registry_root: &Path,
    manifest_path: &Path,
) -> Result<ResolutionScope> {
    if !manifest_path.is_file() {
        return Err(CpakError::Manifest {
            message: format!("No manifest found at {}", manifest_path.display()),
        }
        .into());
    }
    let project = Manifest::from_path(manifest_path)?;
    let roots: Vec<SoftReference> = project.dependencies.iter().map(SoftReference::new).collect();
    let registry = FsRegistry::new(registry_root);

    let spinner = cpak_util::progress::spinner("Resolving dependencies");
    let mut scope = ResolutionScope::new(&roots);
    let outcome = driver::resolve_all(&mut scope, &registry);
    spinner.finish_and_clear();
    outcome?;

    Ok(scope)
}
