//! Forge REST API
//!
//! Endpoint families:
//!
//! - `GET [/{resource_type}/{resource}]/api/v1/releases.json?module=…` —
//!   legacy flat release listing
//! - `GET [/{resource_type}/{resource}]/v3/modules/{author}-{name}` —
//!   v3 module document
//! - `GET [/{resource_type}/{resource}]/v3/files/{author}-{name}-{version}.tar.gz`
//!   — redirect to the release file

pub mod controller;
pub mod server;
pub mod types;

pub use server::ForgeApiServer;
