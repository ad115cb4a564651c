//! Release records and the release-resolution boundary
//!
//! The gateway never owns package metadata. Matching releases come from a
//! [`ReleaseSource`] collaborator, keyed by canonical module identity. The
//! core interprets the result only as "empty means not found" and passes the
//! collaborator's own failures through untouched.

use crate::forge::auth::Credentials;
use crate::forge::identity::ModuleIdentity;
use async_trait::async_trait;
use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// One `(module name, version requirement)` dependency pair.
///
/// Serialized as a two-element JSON array, the shape the legacy listing
/// carries on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency(pub String, pub String);

/// One published release of a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseEntry {
    pub version: String,
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_md5: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

/// Canonical module identity string to its ordered release entries.
///
/// Entry order within each list is the collaborator's insertion order and is
/// preserved through formatting.
pub type ReleaseMap = BTreeMap<String, Vec<ReleaseEntry>>;

/// Filtering flags forwarded to the release source.
///
/// The two endpoint generations differ only here: legacy endpoints use the
/// source defaults, post-3.6 endpoints always request a flattened,
/// non-transitive listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPolicy {
    pub recurse_deps: bool,
    pub view_all_matching: bool,
}

impl QueryPolicy {
    /// Source-default filtering used by the legacy endpoints.
    pub const fn legacy() -> Self {
        Self {
            recurse_deps: true,
            view_all_matching: false,
        }
    }

    /// Flattened, view-all-matching filtering used by post-3.6 endpoints.
    pub const fn flattened() -> Self {
        Self {
            recurse_deps: false,
            view_all_matching: true,
        }
    }
}

/// Failure from the release source.
#[derive(Debug, Error)]
pub enum QueryError {
    /// An HTTP-shaped refusal from the source, returned to the client
    /// unchanged.
    #[error("release source denied the query: {status}")]
    Denied { status: StatusCode, body: String },
    /// Any other source failure. Rendered 500; never retried.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Boundary to the external release-resolution service.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetch the releases matching `module` (and `version`, when given) that
    /// are visible under `credentials`. `hostname` is the host the client
    /// addressed, available to sources that build absolute file URLs.
    ///
    /// An empty map is a valid result meaning nothing matched.
    async fn view(
        &self,
        credentials: &Credentials,
        module: &ModuleIdentity,
        version: Option<&str>,
        hostname: &str,
        policy: QueryPolicy,
    ) -> Result<ReleaseMap, QueryError>;
}
