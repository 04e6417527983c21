//! Version unification: keeping a single current resolution per package
//! identity while recording every superseded version.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use cpak_core::coordinate::{Coordinate, PackageIdentity};
use cpak_core::manifest::ResolvedManifest;
use cpak_core::version;

/// Tracks the current winner for each versionless identity plus the full
/// history of winner/loser decisions made along the way.
///
/// The winner and loser edge maps are maintained as mutual inverses: every
/// winner→loser entry has a mirrored loser→winner entry.
#[derive(Default)]
pub struct UnificationTable {
    /// Current winner per identity, keyed by the identity's canonical string.
    /// Overwritten winners survive only through the loser edges below.
    manifests: BTreeMap<String, ResolvedManifest>,
    winners_to_losers: BTreeMap<Coordinate, Vec<Coordinate>>,
    losers_to_winners: BTreeMap<Coordinate, Vec<Coordinate>>,
}

impl UnificationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unify an incoming manifest with any previously recorded version of
    /// the same identity.
    ///
    /// The higher version becomes the recorded winner; when versions compare
    /// equal the incoming manifest replaces the prior winner, so the
    /// most recently resolved one wins. Returns the identity that keys the
    /// manifest even if a later round overwrites it.
    pub fn unify(&mut self, incoming: ResolvedManifest) -> PackageIdentity {
        let identity = incoming.coordinate.identity();
        let key = identity.to_string();

        let Some(existing) = self.manifests.get(&key) else {
            self.manifests.insert(key, incoming);
            return identity;
        };

        // Exactly two candidates per round: the incoming manifest and the
        // single previously recorded winner.
        let incoming_first = version::descending(
            &incoming.coordinate.version,
            &existing.coordinate.version,
        ) != Ordering::Greater;

        let (winner, loser) = if incoming_first {
            (incoming, existing.clone())
        } else {
            (existing.clone(), incoming)
        };

        tracing::debug!(
            "unified {}: {} supersedes {}",
            identity,
            winner.coordinate.version,
            loser.coordinate.version
        );

        self.record_decision(winner.coordinate.clone(), loser.coordinate.clone());
        self.manifests.insert(key, winner);
        identity
    }

    fn record_decision(&mut self, winner: Coordinate, loser: Coordinate) {
        self.winners_to_losers
            .entry(winner.clone())
            .or_default()
            .push(loser.clone());
        self.losers_to_winners.entry(loser).or_default().push(winner);
    }

    /// The current resolution for an identity key (`group:artifact`).
    pub fn current(&self, key: &str) -> Option<&ResolvedManifest> {
        self.manifests.get(key)
    }

    /// All current resolutions, keyed by identity, in sorted key order.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &ResolvedManifest)> {
        self.manifests.iter()
    }

    pub fn len(&self) -> usize {
        self.manifests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manifests.is_empty()
    }

    /// Coordinates that won at least one unification round.
    pub fn winners(&self) -> Vec<&Coordinate> {
        self.winners_to_losers.keys().collect()
    }

    /// Coordinates that lost at least one unification round.
    pub fn losers(&self) -> Vec<&Coordinate> {
        self.losers_to_winners.keys().collect()
    }

    /// Every coordinate a winner superseded.
    pub fn losses_of(&self, winner: &Coordinate) -> &[Coordinate] {
        self.winners_to_losers
            .get(winner)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl fmt::Display for UnificationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.winners_to_losers.is_empty() {
            return write!(f, "No version overrides.");
        }
        writeln!(f, "Version overrides ({}):", self.winners_to_losers.len())?;
        for (winner, losers) in &self.winners_to_losers {
            for loser in losers {
                writeln!(
                    f,
                    "  {}: {} superseded by {}",
                    winner.identity(),
                    loser.version,
                    winner.version
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpak_core::manifest::{Manifest, PackageMetadata};

    fn manifest(group: &str, artifact: &str, version: &str) -> ResolvedManifest {
        manifest_described(group, artifact, version, None)
    }

    fn manifest_described(
        group: &str,
        artifact: &str,
        version: &str,
        description: Option<&str>,
    ) -> ResolvedManifest {
        ResolvedManifest::new(Manifest {
            package: PackageMetadata {
                group: group.to_string(),
                name: artifact.to_string(),
                version: version.to_string(),
                description: description.map(str::to_string),
                license: None,
            },
            dependencies: vec![],
        })
        .unwrap()
    }

    #[test]
    fn first_resolution_becomes_winner() {
        let mut table = UnificationTable::new();
        assert!(table.is_empty());

        let identity = table.unify(manifest("g", "zlib", "1.2.11"));
        assert_eq!(identity.to_string(), "g:zlib");
        assert_eq!(table.len(), 1);
        let current = table.current("g:zlib").unwrap();
        assert_eq!(current.coordinate.version.original, "1.2.11");
        assert!(table.winners().is_empty());
        assert!(table.losers().is_empty());
    }

    #[test]
    fn higher_version_wins_regardless_of_arrival_order() {
        for order in [["1.2.8", "1.2.11"], ["1.2.11", "1.2.8"]] {
            let mut table = UnificationTable::new();
            table.unify(manifest("g", "zlib", order[0]));
            table.unify(manifest("g", "zlib", order[1]));

            let current = table.current("g:zlib").unwrap();
            assert_eq!(current.coordinate.version.original, "1.2.11");

            let winner = Coordinate::parse("g:zlib:1.2.11").unwrap();
            let loser = Coordinate::parse("g:zlib:1.2.8").unwrap();
            assert_eq!(table.winners(), vec![&winner]);
            assert_eq!(table.losers(), vec![&loser]);
            assert_eq!(table.losses_of(&winner), &[loser]);
        }
    }

    #[test]
    fn equal_versions_keep_most_recently_resolved() {
        let mut table = UnificationTable::new();
        table.unify(manifest_described("g", "a", "1.0", Some("first")));
        table.unify(manifest_described("g", "a", "1.0", Some("second")));
        let current = table.current("g:a").unwrap();
        assert_eq!(current.manifest.package.description.as_deref(), Some("second"));
    }

    #[test]
    fn successive_rounds_accumulate_losers() {
        let mut table = UnificationTable::new();
        table.unify(manifest("g", "a", "1.0"));
        table.unify(manifest("g", "a", "2.0"));
        table.unify(manifest("g", "a", "3.0"));

        let current = table.current("g:a").unwrap();
        assert_eq!(current.coordinate.version.original, "3.0");
        assert_eq!(table.losers().len(), 2);
    }

    #[test]
    fn display_reports_overrides() {
        let mut table = UnificationTable::new();
        assert_eq!(table.to_string(), "No version overrides.");
        table.unify(manifest("g", "zlib", "1.2.8"));
        table.unify(manifest("g", "zlib", "1.2.11"));
        let report = table.to_string();
        assert!(report.contains("g:zlib"));
        assert!(report.contains("1.2.8 superseded by 1.2.11"));
    }
}
