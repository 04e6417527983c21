//! Handler for `cpak why`.

use std::collections::BTreeSet;
use std::path::Path;

use miette::Result;

use cpak_core::coordinate::Coordinate;
use cpak_resolver::scope::ResolutionScope;
use cpak_util::errors::CpakError;

use crate::commands::resolve_project;

pub fn exec(reference: &str, registry: &Path, manifest: &Path) -> Result<()> {
    let scope = resolve_project(registry, manifest)?;

    // Accept either a versionless identity or a full coordinate.
    let coordinate = match scope.resolution(reference) {
        Some(resolved) => resolved.coordinate.clone(),
        None => Coordinate::parse(reference).ok_or_else(|| CpakError::Resolution {
            message: format!("'{reference}' is not a resolved package or a coordinate"),
        })?,
    };

    let dependents = scope.dependents_of(&coordinate);
    if dependents.is_empty() {
        println!("{coordinate} is a direct dependency of the project");
    } else {
        println!("{coordinate} is required by:");
        let mut seen = BTreeSet::new();
        print_dependents(&scope, &coordinate, 1, &mut seen);
    }

    let identity = coordinate.identity().to_string();
    if let Some(current) = scope.resolution(&identity) {
        if current.coordinate != coordinate {
            println!(
                "note: {} was superseded by {}",
                coordinate.version, current.coordinate.version
            );
        }
    }

    Ok(())
}

fn print_dependents(
    scope: &ResolutionScope,
    coordinate: &Coordinate,
    depth: usize,
    seen: &mut BTreeSet<String>,
) {
    for parent in scope.dependents_of(coordinate) {
        println!("{}{parent}", "  ".repeat(depth));
        if seen.insert(parent.to_string()) {
            print_dependents(scope, parent, depth + 1, seen);
        }
    }
}
