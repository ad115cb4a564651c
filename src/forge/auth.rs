//! Scope credential resolution
//!
//! The module-install client hard-codes its request paths, so repository and
//! consumer scoping is smuggled through the HTTP Basic-Auth header instead of
//! the URL: the username field carries a consumer id and the password field a
//! repository id. Neither value is a verified secret. Alternatively, scoped
//! URL prefixes (`/repository/{id}/...`, `/consumer/{id}/...`) carry the same
//! pair explicitly.

use base64::{engine::general_purpose, Engine as _};
use hyper::header::AUTHORIZATION;
use hyper::HeaderMap;
use thiserror::Error;

/// Scope value meaning "unscoped / match any".
pub const WILDCARD: &str = ".";

/// Path-segment literal selecting repository scoping.
pub const REPO_RESOURCE: &str = "repository";
/// Path-segment literal selecting consumer scoping.
pub const CONSUMER_RESOURCE: &str = "consumer";

/// Consumer/repository scope pair for a release query.
///
/// Either side may be [`WILDCARD`]. Constructed once per request and
/// discarded with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub consumer: String,
    pub repository: String,
}

/// Failure to resolve a scope for a request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Explicit scope segments named an unknown resource type. Rendered 404.
    #[error("unknown resource type: {0}")]
    InvalidScope(String),
    /// No parseable credentials in the request. Rendered 401.
    #[error("no credentials found")]
    Unauthorized,
}

impl Credentials {
    /// Map explicit `{resource_type}/{resource}` path segments to a scope
    /// pair.
    pub fn from_scope(resource_type: &str, resource: &str) -> Result<Self, AuthError> {
        match resource_type {
            REPO_RESOURCE => Ok(Self {
                consumer: WILDCARD.to_string(),
                repository: resource.to_string(),
            }),
            CONSUMER_RESOURCE => Ok(Self {
                consumer: resource.to_string(),
                repository: WILDCARD.to_string(),
            }),
            other => Err(AuthError::InvalidScope(other.to_string())),
        }
    }

    /// Decode the smuggled scope pair from the `Authorization` header.
    ///
    /// Accepts the value with or without the literal `Basic ` prefix. A
    /// missing header, undecodable payload, or payload without a `:` all
    /// yield `None`; the caller decides that means unauthorized.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
        let encoded = value.strip_prefix("Basic ").unwrap_or(value);
        let decoded = general_purpose::STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (consumer, repository) = decoded.split_once(':')?;
        Some(Self {
            consumer: consumer.to_string(),
            repository: repository.to_string(),
        })
    }

    /// Resolve the scope pair for a request: explicit path segments when
    /// present, otherwise the Basic-Auth header.
    pub fn resolve(
        scope: Option<(&str, &str)>,
        headers: &HeaderMap,
    ) -> Result<Self, AuthError> {
        match scope {
            Some((resource_type, resource)) => Self::from_scope(resource_type, resource),
            None => Self::from_headers(headers).ok_or(AuthError::Unauthorized),
        }
    }
}
