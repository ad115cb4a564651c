//! Release version ordering
//!
//! Forge clients expect "current release" selection to follow strict
//! dotted-numeric ordering (`1.10.0` > `1.9.3`), not lexical string order.
//! Versions are split on `.` and compared as unsigned integer tuples. A
//! version with any non-numeric component falls back to a lexical key;
//! lexical keys order below every numeric key, so a well-formed version
//! always wins selection.

use std::cmp::Ordering;

/// Comparison key for a release version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionKey {
    /// All dot-separated components parsed as unsigned integers.
    Numeric(Vec<u64>),
    /// Fallback for versions with non-numeric components.
    Lexical(String),
}

impl VersionKey {
    /// Parse a version string into its comparison key.
    pub fn parse(version: &str) -> Self {
        let components: Result<Vec<u64>, _> =
            version.split('.').map(|part| part.parse::<u64>()).collect();
        match components {
            Ok(parts) if !parts.is_empty() => VersionKey::Numeric(parts),
            _ => VersionKey::Lexical(version.to_string()),
        }
    }
}

impl Ord for VersionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (VersionKey::Numeric(a), VersionKey::Numeric(b)) => a.cmp(b),
            (VersionKey::Lexical(a), VersionKey::Lexical(b)) => a.cmp(b),
            // Lexical keys sort below all numeric keys
            (VersionKey::Lexical(_), VersionKey::Numeric(_)) => Ordering::Less,
            (VersionKey::Numeric(_), VersionKey::Lexical(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for VersionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Select the highest version string from an iterator, by `VersionKey`.
///
/// Returns `None` for an empty iterator.
pub fn latest<'a, I>(versions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    versions.into_iter().max_by_key(|v| VersionKey::parse(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_ordering_beats_lexical_order() {
        assert!(VersionKey::parse("1.10.0") > VersionKey::parse("1.9.3"));
        assert!(VersionKey::parse("0.2.0") < VersionKey::parse("0.10.0"));
    }

    #[test]
    fn test_more_components_extend_ordering() {
        assert!(VersionKey::parse("1.2.3.1") > VersionKey::parse("1.2.3"));
        assert!(VersionKey::parse("1.2") < VersionKey::parse("1.2.0"));
    }

    #[test]
    fn test_lexical_fallback_sorts_below_numeric() {
        assert!(VersionKey::parse("1.0.0-rc1") < VersionKey::parse("0.0.1"));
        assert!(VersionKey::parse("abc") < VersionKey::parse("0"));
        assert!(VersionKey::parse("abc") < VersionKey::parse("abd"));
    }

    #[test]
    fn test_latest_selection() {
        let versions = ["1.0.0", "1.2.3", "1.1.0"];
        assert_eq!(latest(versions), Some("1.2.3"));
        assert_eq!(latest([]), None);
    }
}
