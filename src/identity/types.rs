//! Identity types — credentials, user identity, errors, and the client trait.
//!
//! Shared by the HTTP-backed client, the auth routes, the page renderers,
//! and the portal client.

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by Identity Service operations.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The Identity Service answered with a non-success HTTP status.
    #[error("identity service rejected request: status {status}")]
    Rejected { status: u16 },

    /// Token issuance succeeded at the HTTP level but carried no token.
    #[error("identity service returned no token (status {status})")]
    MissingToken { status: u16 },

    /// The HTTP request to the Identity Service failed.
    #[error("identity request failed: {0}")]
    Request(String),

    /// The response body could not be deserialized.
    #[error("identity response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl IdentityError {
    /// Upstream HTTP status for rejections, `None` for transport/shape failures.
    #[must_use]
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status } => Some(*status),
            _ => None,
        }
    }
}

// =============================================================================
// CREDENTIALS
// =============================================================================

/// Login credentials submitted by the browser.
///
/// Missing fields become empty strings; the Identity Service decides
/// whether they are acceptable.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// USER IDENTITY
// =============================================================================

/// The reduced identity exposed to pages and the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

/// Accept `"42"` or `42` for the upstream `id` field.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}

// =============================================================================
// TRAIT
// =============================================================================

/// Consumed contract of the upstream Identity Service.
///
/// Each method performs exactly one upstream request with no retries.
#[async_trait::async_trait]
pub trait IdentityApi: Send + Sync {
    /// Exchange credentials for an opaque session token.
    async fn issue_token(&self, credentials: &Credentials) -> Result<String, IdentityError>;

    /// Resolve a session token to the user it belongs to.
    async fn user_info(&self, token: &str) -> Result<UserIdentity, IdentityError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
