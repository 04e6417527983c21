//! The resolution driver loop.
//!
//! The scope never performs I/O; this loop is the seam where manifests come
//! in from the outside. Each round snapshots the pending references, asks
//! the [`ManifestSource`] for each one, and feeds exactly one
//! `record_resolved` / `record_unresolvable` back into the scope.

use cpak_core::manifest::ResolvedManifest;
use cpak_core::reference::{HardReference, SoftReference};

use crate::scope::ResolutionScope;

/// A located manifest plus the dependency strings it declares.
pub struct LocatedManifest {
    pub manifest: ResolvedManifest,
    pub dependencies: Vec<HardReference>,
}

/// Where manifests come from. Implementations own all fetching and parsing.
pub trait ManifestSource {
    /// Locate and parse the manifest for a soft reference.
    ///
    /// `Ok(None)` means the reference does not exist anywhere this source
    /// can see — a per-reference failure, not an error.
    fn locate(&self, reference: &SoftReference) -> miette::Result<Option<LocatedManifest>>;
}

/// Drive a scope to completion against a manifest source.
///
/// Results are fed back serially. References that reach a terminal state
/// mid-batch (an alias resolving to a coordinate that was itself pending)
/// are skipped rather than resolved a second time, and a reference whose
/// located manifest carries an already-resolved coordinate (two aliases for
/// the same package) is recorded as an alias of that resolution.
pub fn resolve_all(
    scope: &mut ResolutionScope,
    source: &dyn ManifestSource,
) -> miette::Result<()> {
    while !scope.is_resolution_complete() {
        for reference in scope.unresolved_references() {
            if !scope.is_pending(&reference.name) {
                continue;
            }
            tracing::debug!("resolving {reference}");
            match source.locate(&reference)? {
                Some(found) if scope.is_terminal(&found.manifest.coordinate.to_string()) => {
                    scope.record_alias(&reference)
                }
                Some(found) => {
                    scope.record_resolved(&reference, found.manifest, &found.dependencies)?
                }
                None => scope.record_unresolvable(&reference),
            }
        }
    }
    Ok(())
}
