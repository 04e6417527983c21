//! Build ordering over resolved identities.
//!
//! Deliberately a bounded fixed-point relaxation rather than an
//! indegree-queue topological sort: graphs here are tens to low hundreds of
//! packages, and the pass structure doubles as a stuck-state detector whose
//! failure report is part of the contract.

use std::collections::BTreeSet;

use cpak_core::coordinate::PackageIdentity;
use cpak_util::errors::CpakError;

use crate::graph::DependencyGraph;
use crate::unify::UnificationTable;

/// Upper bound on relaxation passes. Far more than any plausible dependency
/// depth; exhausting it means the engine itself is broken, so it is reported
/// as an internal error rather than a user problem.
const MAX_ORDERING_PASSES: usize = 200;

/// Order all resolved identity keys so that dependees come before dependers.
pub fn resolution_order(
    unification: &UnificationTable,
    graph: &DependencyGraph,
) -> Result<Vec<String>, CpakError> {
    let mut seen: BTreeSet<PackageIdentity> = BTreeSet::new();
    let mut result: Vec<String> = Vec::new();

    for _ in 0..MAX_ORDERING_PASSES {
        let mut placed_this_pass = 0usize;

        for (key, manifest) in unification.entries() {
            let identity = manifest.coordinate.identity();
            if seen.contains(&identity) {
                continue;
            }

            let blocked = graph
                .dependencies_of(&manifest.coordinate)
                .iter()
                .any(|dep| !seen.contains(&dep.identity()));
            if blocked {
                continue;
            }

            result.push(key.clone());
            seen.insert(identity);
            placed_this_pass += 1;
        }

        if result.len() == unification.len() {
            return Ok(result);
        }

        if placed_this_pass == 0 {
            // A full pass placed nothing, so some dependency was referenced
            // but never resolved. Report every stuck identity at once.
            return Err(stuck_report(unification, graph, &seen));
        }
    }

    Err(CpakError::Internal {
        message: format!("exceeded maximum dependency depth {MAX_ORDERING_PASSES}"),
    })
}

fn stuck_report(
    unification: &UnificationTable,
    graph: &DependencyGraph,
    seen: &BTreeSet<PackageIdentity>,
) -> CpakError {
    let mut stuck: Vec<String> = Vec::new();
    for (_, manifest) in unification.entries() {
        if seen.contains(&manifest.coordinate.identity()) {
            continue;
        }
        let missing: Vec<String> = graph
            .dependencies_of(&manifest.coordinate)
            .iter()
            .filter(|dep| !seen.contains(&dep.identity()))
            .map(|dep| dep.to_string())
            .collect();
        stuck.push(format!(
            "{} has unresolved dependency {}",
            manifest.coordinate,
            missing.join(", ")
        ));
    }
    CpakError::Resolution {
        message: format!("no valid build order exists:\n  {}", stuck.join("\n  ")),
    }
}
