//! Core forge domain: scope credentials, module identities, release records,
//! and the release-resolution boundary.

pub mod auth;
pub mod identity;
pub mod index;
pub mod releases;
pub mod version;

pub use auth::{AuthError, Credentials};
pub use identity::ModuleIdentity;
pub use index::LocalIndexSource;
pub use releases::{Dependency, QueryError, QueryPolicy, ReleaseEntry, ReleaseMap, ReleaseSource};
