//! forge-gateway - Forge-compatible module gateway for package repositories
//!
//! The `puppet module install` style client speaks a fixed, versioned REST
//! contract with hard-coded paths. This crate serves that contract in front
//! of an arbitrary package repository: it translates the client's opaque
//! path/query conventions into normalized module queries, asks a
//! release-resolution source for matching releases, and reshapes the result
//! into the exact legacy or v3 response the client expects.
//!
//! Because the client cannot carry repository or consumer ids in its paths,
//! scoping is smuggled through the HTTP Basic-Auth fields (username =
//! consumer id, password = repository id) or given explicitly as a
//! `/{resource_type}/{resource}` path prefix. The values select a scope;
//! nothing is authenticated.
//!
//! Layers:
//!
//! 1. `forge` - scope credentials, module identities, version ordering, and
//!    the [`forge::ReleaseSource`] boundary with a JSON-index-backed
//!    implementation
//! 2. `api` - the hyper HTTP server, endpoint routing, and response shaping
//! 3. `config` - process configuration

pub mod api;
pub mod config;
pub mod forge;

pub use api::ForgeApiServer;
pub use config::ForgeConfig;
pub use forge::{
    Credentials, LocalIndexSource, ModuleIdentity, QueryPolicy, ReleaseEntry, ReleaseMap,
    ReleaseSource,
};
