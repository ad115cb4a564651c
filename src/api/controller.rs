//! Shared endpoint lifecycle
//!
//! All three endpoint families run the same decision tree: resolve scope
//! credentials, require a parsed module identity, query the release source,
//! then hand the result to the configured formatter. The families differ only
//! in the [`QueryPolicy`] forwarded to the source and the [`ResponseFormat`]
//! applied to its result, both fixed at routing time.

use crate::api::types::{self, ModuleDocument};
use crate::forge::auth::{AuthError, Credentials};
use crate::forge::identity::ModuleIdentity;
use crate::forge::releases::{QueryError, QueryPolicy, ReleaseMap, ReleaseSource};
use bytes::Bytes;
use http_body_util::Full;
use hyper::{HeaderMap, Response, StatusCode};
use tracing::{debug, warn};

pub const UNAUTHORIZED_BODY: &str = "Unauthorized";
pub const MISSING_MODULE_BODY: &str = "Module name is missing.";
pub const MODULE_NOT_FOUND_BODY: &str = "Module not found";
pub const NO_MATCHING_FILE_BODY: &str = "No matching version file found";

/// Output strategy of an endpoint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Flat release mapping, serialized as-is.
    LegacyListing,
    /// v3 single-module document.
    ModuleDocument,
    /// 302 redirect to the first matching release file.
    FileRedirect,
}

/// Capability set of one endpoint family.
#[derive(Debug, Clone, Copy)]
pub struct Controller {
    pub policy: QueryPolicy,
    pub format: ResponseFormat,
}

/// Legacy listing endpoint (`/api/v1/releases.json`).
pub const LEGACY_RELEASES: Controller = Controller {
    policy: QueryPolicy::legacy(),
    format: ResponseFormat::LegacyListing,
};

/// v3 module metadata endpoint (`/v3/modules/{slug}`).
pub const V3_MODULES: Controller = Controller {
    policy: QueryPolicy::flattened(),
    format: ResponseFormat::ModuleDocument,
};

/// v3 file download endpoint (`/v3/files/{filename}`).
pub const V3_FILES: Controller = Controller {
    policy: QueryPolicy::flattened(),
    format: ResponseFormat::FileRedirect,
};

impl Controller {
    /// Run the shared lifecycle for one request.
    ///
    /// `scope` carries the explicit `{resource_type}/{resource}` path
    /// segments when the route had them; `target` is the module identity and
    /// optional version the route extracted, or `None` when extraction
    /// failed.
    pub async fn handle(
        &self,
        source: &dyn ReleaseSource,
        scope: Option<(&str, &str)>,
        headers: &HeaderMap,
        target: Option<(ModuleIdentity, Option<String>)>,
        hostname: &str,
    ) -> Response<Full<Bytes>> {
        let credentials = match Credentials::resolve(scope, headers) {
            Ok(credentials) => credentials,
            Err(AuthError::InvalidScope(resource_type)) => {
                debug!(%resource_type, "rejecting unknown scope resource type");
                return types::text_response(StatusCode::NOT_FOUND, "");
            }
            Err(AuthError::Unauthorized) => {
                return types::text_response(StatusCode::UNAUTHORIZED, UNAUTHORIZED_BODY);
            }
        };

        let Some((identity, version)) = target else {
            return types::text_response(StatusCode::BAD_REQUEST, MISSING_MODULE_BODY);
        };

        let result = source
            .view(
                &credentials,
                &identity,
                version.as_deref(),
                hostname,
                self.policy,
            )
            .await;
        let releases = match result {
            Ok(releases) => releases,
            Err(QueryError::Denied { status, body }) => {
                // The source's own refusal goes back to the client unchanged.
                return types::text_response(status, &body);
            }
            Err(QueryError::Internal(error)) => {
                warn!(%identity, %error, "release source failure");
                return types::text_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                );
            }
        };

        self.format_response(&identity, &releases)
    }

    fn format_response(
        &self,
        identity: &ModuleIdentity,
        releases: &ReleaseMap,
    ) -> Response<Full<Bytes>> {
        match self.format {
            ResponseFormat::LegacyListing => types::json_response(releases),
            ResponseFormat::ModuleDocument => {
                let entries = releases.get(&identity.canonical());
                match entries.and_then(|entries| ModuleDocument::build(identity, entries)) {
                    Some(document) => types::json_response(&document),
                    None => types::text_response(StatusCode::NOT_FOUND, MODULE_NOT_FOUND_BODY),
                }
            }
            ResponseFormat::FileRedirect => {
                if releases.is_empty() {
                    return types::text_response(StatusCode::NOT_FOUND, MODULE_NOT_FOUND_BODY);
                }
                match releases.get(&identity.canonical()) {
                    // Only the first entry is ever used; version narrowing
                    // already happened in the query.
                    Some(entries) => match entries.first() {
                        Some(entry) => types::redirect_response(&entry.file),
                        None => types::text_response(
                            StatusCode::NOT_FOUND,
                            NO_MATCHING_FILE_BODY,
                        ),
                    },
                    None => types::text_response(StatusCode::NOT_FOUND, MODULE_NOT_FOUND_BODY),
                }
            }
        }
    }
}
