//! JSON-index-backed release source
//!
//! A single repository's module catalog loaded from disk at startup. The
//! index is immutable after load and shared behind `Arc`, so queries touch no
//! locks. Dependency recursion is not performed here; the gateway only
//! transports the flag for sources that implement it.

use crate::forge::auth::{Credentials, WILDCARD};
use crate::forge::identity::ModuleIdentity;
use crate::forge::releases::{QueryError, QueryPolicy, ReleaseEntry, ReleaseMap, ReleaseSource};
use crate::forge::version;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// On-disk index document.
#[derive(Debug, Deserialize)]
struct IndexFile {
    /// Repository id this index serves.
    repository: String,
    /// Canonical module identity to its release entries.
    #[serde(default)]
    modules: BTreeMap<String, Vec<ReleaseEntry>>,
}

/// In-process [`ReleaseSource`] reading a JSON module index.
#[derive(Debug)]
pub struct LocalIndexSource {
    repository: String,
    modules: BTreeMap<String, Vec<ReleaseEntry>>,
}

impl LocalIndexSource {
    /// Load an index document from `path`.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read module index {}", path.display()))?;
        let index: IndexFile = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse module index {}", path.display()))?;
        info!(
            repository = %index.repository,
            modules = index.modules.len(),
            "loaded module index"
        );
        Ok(Self {
            repository: index.repository,
            modules: index.modules,
        })
    }

    /// Build an index directly from parts.
    pub fn new(repository: impl Into<String>, modules: BTreeMap<String, Vec<ReleaseEntry>>) -> Self {
        Self {
            repository: repository.into(),
            modules,
        }
    }

    /// Whether the requested scope can see this index at all.
    ///
    /// A concrete repository scope must name this repository; consumer
    /// bindings do not exist locally, so any concrete consumer scope matches
    /// nothing.
    fn scope_matches(&self, credentials: &Credentials) -> bool {
        let repository_ok =
            credentials.repository == WILDCARD || credentials.repository == self.repository;
        let consumer_ok = credentials.consumer == WILDCARD;
        repository_ok && consumer_ok
    }
}

#[async_trait]
impl ReleaseSource for LocalIndexSource {
    async fn view(
        &self,
        credentials: &Credentials,
        module: &ModuleIdentity,
        version: Option<&str>,
        _hostname: &str,
        policy: QueryPolicy,
    ) -> Result<ReleaseMap, QueryError> {
        let mut result = ReleaseMap::new();
        if !self.scope_matches(credentials) {
            debug!(%module, "scope does not match local index");
            return Ok(result);
        }

        let key = module.canonical();
        let Some(entries) = self.modules.get(&key) else {
            return Ok(result);
        };

        let mut matching: Vec<ReleaseEntry> = entries
            .iter()
            .filter(|entry| version.map_or(true, |wanted| entry.version == wanted))
            .cloned()
            .collect();

        if !policy.view_all_matching {
            // Narrow to the single highest matching version.
            if let Some(best) =
                version::latest(matching.iter().map(|entry| entry.version.as_str()))
            {
                let best = best.to_string();
                matching.retain(|entry| entry.version == best);
                matching.truncate(1);
            }
        }

        if !matching.is_empty() {
            result.insert(key, matching);
        }
        Ok(result)
    }
}
