//! Resolution session state.
//!
//! A [`ResolutionScope`] records everything learned while resolving
//! top-level and transitive dependencies: the pending reference queue, the
//! terminal (resolved or failed) set, dependency edges, and unification
//! decisions. State only advances through [`ResolutionScope::record_resolved`]
//! and [`ResolutionScope::record_unresolvable`]; nothing is ever deleted
//! during a session, and one scope serves exactly one resolution run.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use cpak_core::coordinate::Coordinate;
use cpak_core::manifest::ResolvedManifest;
use cpak_core::reference::{HardReference, SoftReference};
use cpak_util::errors::CpakError;

use crate::graph::DependencyGraph;
use crate::order;
use crate::unify::UnificationTable;

/// Why a reference is permanently unresolvable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Unresolvable {
    /// The reference string does not parse into a coordinate.
    Unparseable,
    /// No manifest exists for the reference.
    DidntExist,
}

impl fmt::Display for Unresolvable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unresolvable::Unparseable => f.write_str("unparseable"),
            Unresolvable::DidntExist => f.write_str("didn't exist"),
        }
    }
}

/// The state of one resolution session.
pub struct ResolutionScope {
    graph: DependencyGraph,
    unification: UnificationTable,
    /// References not yet resolved, keyed by their original string.
    unresolved: BTreeMap<String, SoftReference>,
    /// Reference strings that reached a terminal state, successfully or not.
    resolved: BTreeSet<String>,
    /// The permanently failed subset of `resolved`.
    unresolvable: BTreeMap<String, Unresolvable>,
}

impl ResolutionScope {
    /// Start a session from the user-declared top-level references.
    pub fn new(roots: &[SoftReference]) -> Self {
        let mut scope = Self::empty();
        for root in roots {
            scope.add_unresolved(root.clone());
        }
        scope
    }

    pub fn empty() -> Self {
        Self {
            graph: DependencyGraph::new(),
            unification: UnificationTable::new(),
            unresolved: BTreeMap::new(),
            resolved: BTreeSet::new(),
            unresolvable: BTreeMap::new(),
        }
    }

    /// Queue a reference for resolution unless it already reached a
    /// terminal state.
    ///
    /// Re-adding is a no-op either way; the same dependency is routinely
    /// rediscovered along multiple paths.
    pub fn add_unresolved(&mut self, reference: SoftReference) {
        if !self.resolved.contains(&reference.name) {
            self.unresolved
                .entry(reference.name.clone())
                .or_insert(reference);
        }
    }

    /// True once no references remain to resolve.
    pub fn is_resolution_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Point-in-time copy of all pending references.
    pub fn unresolved_references(&self) -> Vec<SoftReference> {
        self.unresolved.values().cloned().collect()
    }

    /// Whether a reference string is still awaiting resolution.
    pub fn is_pending(&self, name: &str) -> bool {
        self.unresolved.contains_key(name)
    }

    /// All permanently failed reference strings.
    pub fn unresolvable_references(&self) -> Vec<String> {
        self.unresolvable.keys().cloned().collect()
    }

    /// Why a reference failed, if it did.
    pub fn unresolvable_reason(&self, name: &str) -> Option<Unresolvable> {
        self.unresolvable.get(name).copied()
    }

    /// Whether a reference string has reached a terminal state,
    /// successfully or not.
    pub fn is_terminal(&self, name: &str) -> bool {
        self.resolved.contains(name)
    }

    /// Record a successful resolution along with the transitive hard
    /// references its manifest declares.
    ///
    /// Resolving the same coordinate twice is a usage bug in the driver, not
    /// a package problem, and aborts the session.
    pub fn record_resolved(
        &mut self,
        softname: &SoftReference,
        resolved: ResolvedManifest,
        transitive: &[HardReference],
    ) -> Result<(), CpakError> {
        let coordinate = resolved.coordinate.clone();
        let key = coordinate.to_string();
        if self.is_terminal(&key) {
            return Err(CpakError::Resolution {
                message: format!("{coordinate} was already resolved"),
            });
        }

        tracing::debug!("resolved {softname} as {coordinate}");
        self.unification.unify(resolved);

        self.resolved.insert(key.clone());
        self.resolved.insert(softname.name.clone());
        self.unresolved.remove(&key);
        self.unresolved.remove(&softname.name);

        for hardname in transitive {
            let Some(dependency) = Coordinate::parse(&hardname.name) else {
                tracing::warn!("{coordinate} declares unparseable dependency '{hardname}'");
                self.resolved.insert(hardname.name.clone());
                self.unresolvable
                    .insert(hardname.name.clone(), Unresolvable::Unparseable);
                continue;
            };
            self.graph.add_dependency(&coordinate, &dependency);
            self.add_unresolved(SoftReference::new(dependency.to_string()));
        }

        Ok(())
    }

    /// Mark a pending reference terminal because its manifest's coordinate
    /// was already resolved under another name.
    ///
    /// Distinct soft names routinely alias the same package (a bare name
    /// and its full coordinate, say); whichever resolves first owns the
    /// coordinate and the rest are recorded here.
    pub fn record_alias(&mut self, softname: &SoftReference) {
        tracing::debug!("{softname} already resolved under another name");
        self.unresolved.remove(&softname.name);
        self.resolved.insert(softname.name.clone());
    }

    /// Record that a reference could not be resolved anywhere.
    pub fn record_unresolvable(&mut self, softname: &SoftReference) {
        tracing::warn!("{softname} could not be resolved");
        self.unresolved.remove(&softname.name);
        self.resolved.insert(softname.name.clone());
        self.unresolvable
            .insert(softname.name.clone(), Unresolvable::DidntExist);
    }

    /// The current resolution for an identity key (`group:artifact`).
    pub fn resolution(&self, key: &str) -> Option<&ResolvedManifest> {
        self.unification.current(key)
    }

    /// All resolved identity keys ordered so that dependees come before
    /// dependers.
    pub fn resolutions(&self) -> Result<Vec<String>, CpakError> {
        order::resolution_order(&self.unification, &self.graph)
    }

    /// The unification ledger (current winners, winner/loser history).
    pub fn unification(&self) -> &UnificationTable {
        &self.unification
    }

    pub fn unification_winners(&self) -> Vec<&Coordinate> {
        self.unification.winners()
    }

    pub fn unification_losers(&self) -> Vec<&Coordinate> {
        self.unification.losers()
    }

    /// Direct dependencies recorded for a coordinate.
    pub fn dependencies_of(&self, coordinate: &Coordinate) -> Vec<&Coordinate> {
        self.graph.dependencies_of(coordinate)
    }

    /// Direct dependents recorded for a coordinate.
    pub fn dependents_of(&self, coordinate: &Coordinate) -> Vec<&Coordinate> {
        self.graph.dependents_of(coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpak_core::manifest::{Manifest, PackageMetadata};

    fn manifest(group: &str, artifact: &str, version: &str) -> ResolvedManifest {
        ResolvedManifest::new(Manifest {
            package: PackageMetadata {
                group: group.to_string(),
                name: artifact.to_string(),
                version: version.to_string(),
                description: None,
                license: None,
            },
            dependencies: vec![],
        })
        .unwrap()
    }

    fn hard(names: &[&str]) -> Vec<HardReference> {
        names.iter().map(|name| HardReference::new(*name)).collect()
    }

    #[test]
    fn roots_start_pending() {
        let scope = ResolutionScope::new(&[SoftReference::new("libpng")]);
        assert!(!scope.is_resolution_complete());
        assert_eq!(scope.unresolved_references().len(), 1);
    }

    #[test]
    fn readd_of_terminal_reference_is_a_noop() {
        let mut scope = ResolutionScope::new(&[SoftReference::new("libpng")]);
        scope
            .record_resolved(
                &SoftReference::new("libpng"),
                manifest("g", "libpng", "1.6.0"),
                &[],
            )
            .unwrap();
        assert!(scope.is_resolution_complete());

        scope.add_unresolved(SoftReference::new("libpng"));
        scope.add_unresolved(SoftReference::new("g:libpng:1.6.0"));
        assert!(scope.is_resolution_complete());
    }

    #[test]
    fn transitive_dependencies_are_enqueued() {
        let mut scope = ResolutionScope::new(&[SoftReference::new("libpng")]);
        scope
            .record_resolved(
                &SoftReference::new("libpng"),
                manifest("g", "libpng", "1.6.0"),
                &hard(&["g:zlib:1.2.11"]),
            )
            .unwrap();

        let pending = scope.unresolved_references();
        assert_eq!(pending, vec![SoftReference::new("g:zlib:1.2.11")]);
    }

    #[test]
    fn unparseable_hard_reference_is_terminal_without_edges() {
        let mut scope = ResolutionScope::new(&[SoftReference::new("libpng")]);
        let png = manifest("g", "libpng", "1.6.0");
        let png_coord = png.coordinate.clone();
        scope
            .record_resolved(&SoftReference::new("libpng"), png, &hard(&["", "junk"]))
            .unwrap();

        assert!(scope.is_resolution_complete());
        assert_eq!(scope.unresolvable_references(), vec!["".to_string(), "junk".to_string()]);
        assert_eq!(scope.unresolvable_reason("junk"), Some(Unresolvable::Unparseable));
        assert!(scope.dependencies_of(&png_coord).is_empty());
    }

    #[test]
    fn unresolvable_root_never_reappears() {
        let mut scope = ResolutionScope::new(&[SoftReference::new("ghost")]);
        scope.record_unresolvable(&SoftReference::new("ghost"));

        assert!(scope.is_resolution_complete());
        assert_eq!(scope.unresolvable_reason("ghost"), Some(Unresolvable::DidntExist));

        scope.add_unresolved(SoftReference::new("ghost"));
        assert!(scope.is_resolution_complete());
    }

    #[test]
    fn alias_of_resolved_coordinate_goes_terminal() {
        let mut scope =
            ResolutionScope::new(&[SoftReference::new("zlib"), SoftReference::new("libz")]);
        scope
            .record_resolved(&SoftReference::new("zlib"), manifest("g", "zlib", "1.0"), &[])
            .unwrap();
        assert!(scope.is_terminal("g:zlib:1.0"));
        assert!(!scope.is_terminal("libz"));

        scope.record_alias(&SoftReference::new("libz"));
        assert!(scope.is_resolution_complete());
        assert!(scope.is_terminal("libz"));
        assert!(scope.unresolvable_references().is_empty());
    }

    #[test]
    fn resolving_the_same_coordinate_twice_is_fatal() {
        let mut scope = ResolutionScope::new(&[SoftReference::new("a"), SoftReference::new("b")]);
        scope
            .record_resolved(&SoftReference::new("a"), manifest("g", "lib", "1.0"), &[])
            .unwrap();
        let err = scope
            .record_resolved(&SoftReference::new("b"), manifest("g", "lib", "1.0"), &[])
            .unwrap_err();
        assert!(err.to_string().contains("already resolved"));
    }
}
