//! Tests for the module naming grammar

use forge_gateway::ModuleIdentity;

#[test]
fn test_matching_tokens_normalize_to_author_slash_name() {
    for (token, canonical) in [
        ("puppetlabs/java", "puppetlabs/java"),
        ("puppetlabs-java", "puppetlabs/java"),
        ("a/b", "a/b"),
        ("author1-module_2", "author1/module_2"),
    ] {
        let identity = ModuleIdentity::parse(token).unwrap();
        assert_eq!(identity.canonical(), canonical, "token {token}");
    }
}

#[test]
fn test_non_matching_tokens_yield_no_identity() {
    for token in [
        "",
        "solo",
        "author/",
        "/name",
        "a/b/c",
        "a-b-c",
        "under_score/name",
        "author.name",
        "author name",
    ] {
        assert!(ModuleIdentity::parse(token).is_none(), "token {token:?}");
    }
}

#[test]
fn test_slug_and_name_forms() {
    let identity = ModuleIdentity::parse("puppetlabs/stdlib").unwrap();
    assert_eq!(identity.slug(), "puppetlabs-stdlib");
    assert_eq!(identity.name(), "stdlib");
    assert_eq!(identity.author(), "puppetlabs");
    assert_eq!(identity.to_string(), "puppetlabs/stdlib");
}

#[test]
fn test_download_filename_extraction() {
    let (identity, version) = ModuleIdentity::parse_filename("test-module-1.2.3.tar.gz").unwrap();
    assert_eq!(identity.canonical(), "test/module");
    assert_eq!(identity.slug(), "test-module");
    assert_eq!(version, "1.2.3");
}

#[test]
fn test_download_filename_with_extra_hyphens_is_rejected() {
    // Hyphenated module names beyond the author/name separator are a known
    // grammar limitation: the third token is always taken as the version.
    assert!(ModuleIdentity::parse_filename("author-my-module-1.0.0.tar.gz").is_none());
}

#[test]
fn test_download_filename_with_too_few_tokens_is_rejected() {
    assert!(ModuleIdentity::parse_filename("module-1.2.3.tar.gz").is_none());
    assert!(ModuleIdentity::parse_filename("archive.tar.gz").is_none());
    assert!(ModuleIdentity::parse_filename("").is_none());
}
