//! Tests for the JSON-index-backed release source

use forge_gateway::{Credentials, LocalIndexSource, ModuleIdentity, QueryPolicy, ReleaseSource};
use std::io::Write;

const INDEX: &str = r#"{
  "repository": "demo",
  "modules": {
    "puppetlabs/stdlib": [
      {
        "version": "4.1.0",
        "file": "http://forge.example.com/files/puppetlabs-stdlib-4.1.0.tar.gz",
        "file_md5": "6c7e2a4a82ac0d07e1b6b5e100f7a073",
        "dependencies": [["puppetlabs/concat", ">= 1.0.0"]]
      },
      {
        "version": "4.10.0",
        "file": "http://forge.example.com/files/puppetlabs-stdlib-4.10.0.tar.gz",
        "dependencies": []
      }
    ]
  }
}"#;

fn load_index() -> LocalIndexSource {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(INDEX.as_bytes()).unwrap();
    LocalIndexSource::from_file(file.path()).unwrap()
}

fn wildcard() -> Credentials {
    Credentials {
        consumer: ".".to_string(),
        repository: ".".to_string(),
    }
}

#[tokio::test]
async fn test_load_and_query_all_matching() {
    let source = load_index();
    let identity = ModuleIdentity::parse("puppetlabs/stdlib").unwrap();

    let map = source
        .view(&wildcard(), &identity, None, "host", QueryPolicy::flattened())
        .await
        .unwrap();
    let entries = &map["puppetlabs/stdlib"];
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].file_md5.as_deref(), Some("6c7e2a4a82ac0d07e1b6b5e100f7a073"));
    assert_eq!(entries[0].dependencies[0].0, "puppetlabs/concat");
    assert_eq!(entries[0].dependencies[0].1, ">= 1.0.0");
}

#[tokio::test]
async fn test_legacy_policy_serves_numerically_highest_version() {
    let source = load_index();
    let identity = ModuleIdentity::parse("puppetlabs/stdlib").unwrap();

    let map = source
        .view(&wildcard(), &identity, None, "host", QueryPolicy::legacy())
        .await
        .unwrap();
    let entries = &map["puppetlabs/stdlib"];
    assert_eq!(entries.len(), 1);
    // 4.10.0 beats 4.1.0 numerically even though it sorts lower lexically.
    assert_eq!(entries[0].version, "4.10.0");
}

#[tokio::test]
async fn test_named_repository_scope_matches_index() {
    let source = load_index();
    let identity = ModuleIdentity::parse("puppetlabs/stdlib").unwrap();
    let credentials = Credentials {
        consumer: ".".to_string(),
        repository: "demo".to_string(),
    };

    let map = source
        .view(&credentials, &identity, None, "host", QueryPolicy::flattened())
        .await
        .unwrap();
    assert!(!map.is_empty());
}

#[tokio::test]
async fn test_consumer_scope_is_never_bound_locally() {
    let source = load_index();
    let identity = ModuleIdentity::parse("puppetlabs/stdlib").unwrap();
    let credentials = Credentials {
        consumer: "consumer1".to_string(),
        repository: ".".to_string(),
    };

    let map = source
        .view(&credentials, &identity, None, "host", QueryPolicy::flattened())
        .await
        .unwrap();
    assert!(map.is_empty());
}

#[test]
fn test_missing_index_file_is_an_error() {
    assert!(LocalIndexSource::from_file(std::path::Path::new("/no/such/index.json")).is_err());
}
