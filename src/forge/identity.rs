//! Module identity parsing
//!
//! Modules are identified by an author and a name. Clients write the pair as
//! either `author/name` or `author-name` depending on the endpoint
//! generation; both normalize to the canonical `author/name` form. Names
//! containing `-` beyond the single author/name separator are not supported
//! by this grammar.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

static MODULE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn module_pattern() -> &'static Regex {
    MODULE_PATTERN.get_or_init(|| {
        Regex::new(r"^([a-zA-Z0-9]+)([/-])([a-zA-Z0-9_]+)$").expect("module pattern is valid")
    })
}

/// Archive suffix of downloadable release files.
const ARCHIVE_SUFFIX: &str = ".tar.gz";

/// Normalized (author, name) pair identifying a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleIdentity {
    author: String,
    name: String,
}

impl ModuleIdentity {
    /// Parse an `author/name` or `author-name` token.
    ///
    /// Returns `None` when the token does not match the naming grammar.
    pub fn parse(token: &str) -> Option<Self> {
        let captures = module_pattern().captures(token)?;
        Some(Self {
            author: captures[1].to_string(),
            name: captures[3].to_string(),
        })
    }

    /// Parse a release filename segment of the form
    /// `{author}-{name}-{version}.tar.gz`.
    ///
    /// The version is the token immediately following the second `-`; module
    /// names with additional hyphens are rejected by the grammar. Returns the
    /// identity together with the version string.
    pub fn parse_filename(segment: &str) -> Option<(Self, String)> {
        // Third '-' separated token is the version with the archive suffix
        // still attached, e.g. "1.2.3.tar.gz".
        let version_token = segment.split('-').nth(2)?;
        let module_token = segment.strip_suffix(&format!("-{version_token}"))?;
        let version = version_token
            .strip_suffix(ARCHIVE_SUFFIX)
            .unwrap_or(version_token)
            .to_string();
        let identity = Self::parse(module_token)?;
        Some((identity, version))
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical `author/name` form used as the release-map key.
    pub fn canonical(&self) -> String {
        format!("{}/{}", self.author, self.name)
    }

    /// Hyphenated `author-name` form used in v3 URIs.
    pub fn slug(&self) -> String {
        format!("{}-{}", self.author, self.name)
    }
}

impl fmt::Display for ModuleIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.author, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slash_form() {
        let identity = ModuleIdentity::parse("puppetlabs/stdlib").unwrap();
        assert_eq!(identity.author(), "puppetlabs");
        assert_eq!(identity.name(), "stdlib");
        assert_eq!(identity.canonical(), "puppetlabs/stdlib");
    }

    #[test]
    fn test_parse_hyphen_form() {
        let identity = ModuleIdentity::parse("test-module").unwrap();
        assert_eq!(identity.canonical(), "test/module");
        assert_eq!(identity.slug(), "test-module");
    }

    #[test]
    fn test_underscore_allowed_in_name_only() {
        assert!(ModuleIdentity::parse("author-module_name").is_some());
        assert!(ModuleIdentity::parse("auth_or-module").is_none());
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        assert!(ModuleIdentity::parse("").is_none());
        assert!(ModuleIdentity::parse("noseparator").is_none());
        assert!(ModuleIdentity::parse("a/b/c").is_none());
        assert!(ModuleIdentity::parse("author-name-extra").is_none());
        assert!(ModuleIdentity::parse("author!name").is_none());
    }

    #[test]
    fn test_parse_filename() {
        let (identity, version) =
            ModuleIdentity::parse_filename("test-module-1.2.3.tar.gz").unwrap();
        assert_eq!(identity.canonical(), "test/module");
        assert_eq!(version, "1.2.3");
    }

    #[test]
    fn test_parse_filename_too_few_tokens() {
        assert!(ModuleIdentity::parse_filename("module-1.2.3.tar.gz").is_none());
        assert!(ModuleIdentity::parse_filename("plain.tar.gz").is_none());
    }
}
