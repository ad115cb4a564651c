//! Forge API response shapes
//!
//! View models for the v3 single-module document plus the response builders
//! shared by all endpoints. Everything here is a transient per-request value;
//! nothing is mutated after construction.

use crate::forge::identity::ModuleIdentity;
use crate::forge::releases::ReleaseEntry;
use crate::forge::version;
use serde::Serialize;

/// Fixed module timestamps emitted by the v3 document. The backing repository
/// does not track them, so the contract carries constants.
const MODULE_CREATED_AT: &str = "2015-09-11 07:22:37 -0700";
const MODULE_UPDATED_AT: &str = "2016-01-06 12:58:15 -0800";

/// v3 single-module document.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleDocument {
    pub uri: String,
    pub slug: String,
    pub name: String,
    pub created_at: &'static str,
    pub updated_at: &'static str,
    pub endorsement: Option<String>,
    pub module_group: &'static str,
    pub current_release: CurrentRelease,
    pub releases: Vec<ReleaseSummary>,
}

/// The highest-versioned release, expanded with its module sub-document.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentRelease {
    pub module: ModuleRef,
    pub metadata: ReleaseMetadata,
    pub file_uri: String,
    pub file_md5: Option<String>,
    pub version: String,
    pub slug: String,
}

/// Module reference nested inside the current release.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleRef {
    pub uri: String,
    pub slug: String,
    pub name: String,
    pub owner: Owner,
}

#[derive(Debug, Clone, Serialize)]
pub struct Owner {
    pub slug: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReleaseMetadata {
    pub name: String,
    pub version: String,
    pub dependencies: Vec<FormattedDependency>,
}

/// Dependency pair in the v3 object shape.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedDependency {
    pub name: String,
    pub version_requirement: String,
}

/// Per-version summary in the document's `releases` list.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseSummary {
    pub uri: String,
    pub slug: String,
    pub version: String,
    pub supported: bool,
    pub created_at: Option<String>,
    pub deleted_at: Option<String>,
}

impl ModuleDocument {
    /// Build the v3 document for `identity` from its release entries.
    ///
    /// Returns `None` when `entries` is empty; the caller renders not-found.
    /// Summaries keep the entries' insertion order. The current release is
    /// the entry whose version sorts highest under dotted-numeric ordering.
    pub fn build(identity: &ModuleIdentity, entries: &[ReleaseEntry]) -> Option<Self> {
        let module_slug = identity.slug();
        let module_uri = format!("/v3/modules/{module_slug}");

        let current_version =
            version::latest(entries.iter().map(|entry| entry.version.as_str()))?.to_string();
        let current = entries
            .iter()
            .find(|entry| entry.version == current_version)?;

        let current_release = CurrentRelease {
            module: ModuleRef {
                uri: module_uri.clone(),
                slug: module_slug.clone(),
                name: identity.name().to_string(),
                owner: Owner {
                    slug: identity.author().to_string(),
                    username: identity.author().to_string(),
                },
            },
            metadata: ReleaseMetadata {
                name: module_slug.clone(),
                version: current.version.clone(),
                dependencies: current
                    .dependencies
                    .iter()
                    .map(|dep| FormattedDependency {
                        name: dep.0.clone(),
                        version_requirement: dep.1.clone(),
                    })
                    .collect(),
            },
            file_uri: current.file.clone(),
            file_md5: current.file_md5.clone(),
            version: current.version.clone(),
            slug: format!("{module_slug}-{}", current.version),
        };

        let releases = entries
            .iter()
            .map(|entry| {
                let release_slug = format!("{module_slug}-{}", entry.version);
                ReleaseSummary {
                    uri: format!("/v3/releases/{release_slug}"),
                    slug: release_slug,
                    version: entry.version.clone(),
                    supported: false,
                    created_at: None,
                    deleted_at: None,
                }
            })
            .collect();

        Some(Self {
            uri: module_uri,
            slug: module_slug,
            name: identity.name().to_string(),
            created_at: MODULE_CREATED_AT,
            updated_at: MODULE_UPDATED_AT,
            endorsement: None,
            module_group: "base",
            current_release,
            releases,
        })
    }
}

// Response builders shared by every endpoint.

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{CONTENT_TYPE, LOCATION};
use hyper::{Response, StatusCode};

/// Plain-text response with the given status.
pub fn text_response(status: StatusCode, body: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap_or_else(|_| fallback_response())
}

/// 200 response carrying `data` serialized as JSON.
pub fn json_response<T: Serialize>(data: &T) -> Response<Full<Bytes>> {
    let body = match serde_json::to_string(data) {
        Ok(body) => body,
        Err(_) => return fallback_response(),
    };
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|_| fallback_response())
}

/// 302 redirect to `location`.
///
/// A file URL that is not a legal header value degrades to 500 rather than
/// panicking.
pub fn redirect_response(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::FOUND)
        .header(LOCATION, location)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|_| fallback_response())
}

fn fallback_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .body(Full::new(Bytes::from("Internal server error")))
        .expect("fallback response should always build")
}
