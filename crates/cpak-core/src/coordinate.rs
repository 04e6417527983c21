//! Package coordinates: the fully qualified `group:artifact:version` form
//! and the versionless identity used as the version-unification key.

use std::cmp::Ordering;
use std::fmt;

use crate::version::Version;

/// Fully qualified package coordinates parsed from `group:artifact:version`.
#[derive(Debug, Clone)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: Version,
}

impl Coordinate {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: Version,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version,
        }
    }

    /// Parse `"group:artifact:version"` into coordinates.
    ///
    /// Returns `None` when the string does not have exactly three non-empty
    /// colon-separated parts.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() == 3 && parts.iter().all(|p| !p.is_empty()) {
            Some(Self {
                group: parts[0].to_string(),
                artifact: parts[1].to_string(),
                version: Version::parse(parts[2]),
            })
        } else {
            None
        }
    }

    /// The versionless identity of this coordinate.
    pub fn identity(&self) -> PackageIdentity {
        PackageIdentity {
            group: self.group.clone(),
            artifact: self.artifact.clone(),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Coordinate {}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.group
            .cmp(&other.group)
            .then_with(|| self.artifact.cmp(&other.artifact))
            .then_with(|| self.version.cmp(&other.version))
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A `(group, artifact)` pair without version.
///
/// At most one resolved manifest is current for a given identity at any
/// time; newly arriving versions go through unification.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageIdentity {
    pub group: String,
    pub artifact: String,
}

impl PackageIdentity {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_coordinate() {
        let c = Coordinate::parse("com.github.zlib:zlib:1.2.11").unwrap();
        assert_eq!(c.group, "com.github.zlib");
        assert_eq!(c.artifact, "zlib");
        assert_eq!(c.version.original, "1.2.11");
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(Coordinate::parse("").is_none());
        assert!(Coordinate::parse("zlib").is_none());
        assert!(Coordinate::parse("group:zlib").is_none());
        assert!(Coordinate::parse("group::1.0").is_none());
        assert!(Coordinate::parse("a:b:c:d").is_none());
    }

    #[test]
    fn display_round_trip() {
        let c = Coordinate::parse("g:a:1.0").unwrap();
        assert_eq!(c.to_string(), "g:a:1.0");
    }

    #[test]
    fn identity_drops_version() {
        let c = Coordinate::parse("g:a:1.0").unwrap();
        assert_eq!(c.identity(), PackageIdentity::new("g", "a"));
        assert_eq!(c.identity().to_string(), "g:a");
    }

    #[test]
    fn coordinates_order_by_version() {
        let old = Coordinate::parse("g:a:1.2.8").unwrap();
        let new = Coordinate::parse("g:a:1.2.11").unwrap();
        assert!(old < new);
        assert_ne!(old, new);
    }
}
