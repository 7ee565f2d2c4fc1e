//! Identity — adapter for the upstream Identity Service.
//!
//! DESIGN
//! ======
//! Routes and pages depend on the [`IdentityApi`] trait object so the
//! upstream can be swapped for a mock in tests. [`HttpIdentityClient`] is
//! the production implementation. Token validity is never decided locally;
//! only the upstream's response code is authoritative.

pub mod http;
pub mod types;

pub use http::HttpIdentityClient;
pub use types::{Credentials, IdentityApi, IdentityError, UserIdentity};
