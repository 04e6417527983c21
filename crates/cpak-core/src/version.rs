//! Package version parsing and comparison.
//!
//! cpak versions are not strict semver: coordinates in the wild carry forms
//! like `1.2.11`, `1.0.63-rev18` or `7.0.0-beta`. Versions are split into
//! segments on `.` and `-`; numeric segments compare as numbers (so `1.2.11`
//! is newer than `1.2.8`), everything else compares as lowercased text, and
//! a release sorts above the same release with a trailing text qualifier.

use std::cmp::Ordering;
use std::fmt;

/// A parsed package version with comparable segments.
#[derive(Debug, Clone)]
pub struct Version {
    pub original: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Segment {
    Numeric(u64),
    Text(String),
}

impl Version {
    pub fn parse(version: &str) -> Self {
        let segments = parse_segments(version);
        Self {
            original: version.to_string(),
            segments,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let max_len = self.segments.len().max(other.segments.len());
        for i in 0..max_len {
            let ord = compare_segments(self.segments.get(i), other.segments.get(i));
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Comparator placing the highest version first.
///
/// Version unification keeps whichever of two versions sorts first under
/// this ordering.
pub fn descending(a: &Version, b: &Version) -> Ordering {
    b.cmp(a)
}

fn compare_segments(a: Option<&Segment>, b: Option<&Segment>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(s), None) => compare_segment_to_empty(s),
        (None, Some(s)) => compare_segment_to_empty(s).reverse(),
        (Some(a), Some(b)) => compare_two_segments(a, b),
    }
}

fn compare_segment_to_empty(seg: &Segment) -> Ordering {
    match seg {
        // `1.0` and `1.0.0` are the same release
        Segment::Numeric(0) => Ordering::Equal,
        Segment::Numeric(_) => Ordering::Greater,
        // `1.0-rev1` sorts below the plain `1.0` release
        Segment::Text(s) if s.is_empty() => Ordering::Equal,
        Segment::Text(_) => Ordering::Less,
    }
}

fn compare_two_segments(a: &Segment, b: &Segment) -> Ordering {
    match (a, b) {
        (Segment::Numeric(a), Segment::Numeric(b)) => a.cmp(b),
        (Segment::Numeric(_), Segment::Text(_)) => Ordering::Greater,
        (Segment::Text(_), Segment::Numeric(_)) => Ordering::Less,
        (Segment::Text(a), Segment::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

fn parse_segments(version: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for ch in version.chars() {
        if ch == '.' || ch == '-' {
            if !current.is_empty() {
                segments.push(classify(&current));
                current.clear();
            }
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        segments.push(classify(&current));
    }

    segments
}

fn classify(token: &str) -> Segment {
    match token.parse::<u64>() {
        Ok(n) => Segment::Numeric(n),
        Err(_) => Segment::Text(token.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_ordering() {
        let v1 = Version::parse("1.0");
        let v2 = Version::parse("2.0");
        assert!(v1 < v2);
    }

    #[test]
    fn numeric_not_lexical() {
        let v1 = Version::parse("1.2.8");
        let v2 = Version::parse("1.2.11");
        assert!(v1 < v2);
    }

    #[test]
    fn trailing_zeros_equal() {
        let v1 = Version::parse("1.0");
        let v2 = Version::parse("1.0.0");
        assert_eq!(v1, v2);
    }

    #[test]
    fn text_qualifier_below_release() {
        let rel = Version::parse("1.0.63");
        let rev = Version::parse("1.0.63-rev18");
        assert!(rev < rel);
    }

    #[test]
    fn rev_suffixes_compare_as_text() {
        let a = Version::parse("1.0.63-rev18");
        let b = Version::parse("1.0.63-rev21");
        // Lowercased text comparison, both share the "rev" prefix
        assert!(a < b);
    }

    #[test]
    fn descending_places_highest_first() {
        let mut versions = vec![Version::parse("1.2.8"), Version::parse("1.3.0")];
        versions.sort_by(descending);
        assert_eq!(versions[0].original, "1.3.0");
    }

    #[test]
    fn display_keeps_original() {
        assert_eq!(Version::parse("1.6.0").to_string(), "1.6.0");
    }
}
