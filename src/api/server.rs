//! Forge API server
//!
//! HTTP front end for the three forge endpoint families. Uses hyper's http1
//! server directly: one accepted connection per task, `service_fn` dispatch,
//! and per-request ids for tracing. Request handling is stateless; the only
//! shared state is the immutable release source behind `Arc`.

use crate::api::controller;
use crate::api::types;
use crate::forge::identity::ModuleIdentity;
use crate::forge::releases::ReleaseSource;
use anyhow::Result;
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::header::HOST;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Forge API server.
#[derive(Clone)]
pub struct ForgeApiServer {
    addr: SocketAddr,
    source: Arc<dyn ReleaseSource>,
    hostname: Option<String>,
}

impl ForgeApiServer {
    /// Create a new server for `addr` backed by `source`.
    pub fn new(addr: SocketAddr, source: Arc<dyn ReleaseSource>) -> Self {
        Self {
            addr,
            source,
            hostname: None,
        }
    }

    /// Override the hostname reported to the release source instead of using
    /// the request `Host` header.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Accept connections until the process stops.
    pub async fn start(&self) -> Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        info!("forge API server listening on {}", self.addr);

        let server = Arc::new(self.clone());

        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    debug!("new forge API connection from {}", peer);
                    let server = Arc::clone(&server);
                    tokio::spawn(async move {
                        let io = TokioIo::new(stream);
                        let service =
                            service_fn(move |req| Self::handle_request(server.clone(), req));
                        if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                            debug!("forge API connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    error!("failed to accept forge API connection: {}", e);
                }
            }
        }
    }

    /// Handle one HTTP request.
    async fn handle_request(
        server: Arc<Self>,
        req: Request<Incoming>,
    ) -> Result<Response<Full<Bytes>>, hyper::Error> {
        let method = req.method().clone();
        let uri = req.uri().clone();
        let path = uri.path();
        let query = uri.query();
        let headers = req.headers();

        let request_id = Uuid::new_v4().to_string();
        debug!(
            "forge API {} {} (request_id: {})",
            method,
            path,
            &request_id[..8]
        );

        if method != Method::GET {
            return Ok(types::text_response(
                StatusCode::METHOD_NOT_ALLOWED,
                "Only GET is supported",
            ));
        }

        let hostname = match &server.hostname {
            Some(hostname) => hostname.clone(),
            None => headers
                .get(HOST)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string(),
        };

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        // Paths not rooted at a known API generation carry an explicit
        // `{resource_type}/{resource}` scope prefix.
        let (scope, route) = match segments.first() {
            Some(&"api") | Some(&"v3") => (None, &segments[..]),
            Some(_) if segments.len() >= 2 => {
                (Some((segments[0], segments[1])), &segments[2..])
            }
            _ => (None, &segments[..]),
        };

        let response = match route {
            ["api", "v1", "releases.json"] => {
                let target = query_param(query, "module")
                    .and_then(|module| ModuleIdentity::parse(&module))
                    .map(|identity| (identity, query_param(query, "version")));
                controller::LEGACY_RELEASES
                    .handle(server.source.as_ref(), scope, headers, target, &hostname)
                    .await
            }
            ["v3", "modules", slug] => {
                let target = ModuleIdentity::parse(slug)
                    .map(|identity| (identity, query_param(query, "version")));
                controller::V3_MODULES
                    .handle(server.source.as_ref(), scope, headers, target, &hostname)
                    .await
            }
            ["v3", "files", filename] => {
                let target = ModuleIdentity::parse_filename(filename)
                    .map(|(identity, version)| (identity, Some(version)));
                controller::V3_FILES
                    .handle(server.source.as_ref(), scope, headers, target, &hostname)
                    .await
            }
            _ => types::text_response(
                StatusCode::NOT_FOUND,
                &format!("Endpoint not found: {}", path),
            ),
        };

        Ok(response)
    }
}

/// Extract a raw query-string parameter value.
fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    let query = query?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}
