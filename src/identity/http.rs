//! HTTP client for the upstream Identity Service.
//!
//! Thin wrapper over `/v1/yeshtery/token` and `/v1/user/info`. Response
//! interpretation lives in pure `parse_*` functions for testability.

use super::types::{Credentials, IdentityApi, IdentityError, UserIdentity};

const TOKEN_PATH: &str = "/v1/yeshtery/token";
const USER_INFO_PATH: &str = "/v1/user/info";

// =============================================================================
// CLIENT
// =============================================================================

/// reqwest-backed [`IdentityApi`]. No retries, transport-default timeouts.
pub struct HttpIdentityClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpIdentityClient {
    /// Build a client rooted at `base_url` (trailing `/` ignored).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, IdentityError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| IdentityError::HttpClientBuild(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait::async_trait]
impl IdentityApi for HttpIdentityClient {
    async fn issue_token(&self, credentials: &Credentials) -> Result<String, IdentityError> {
        let body = TokenRequest { email: &credentials.email, password: &credentials.password, is_employee: true };

        let response = self
            .http
            .post(self.url(TOKEN_PATH))
            .json(&body)
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        parse_token_response(status, &text)
    }

    async fn user_info(&self, token: &str) -> Result<UserIdentity, IdentityError> {
        let response = self
            .http
            .get(self.url(USER_INFO_PATH))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        parse_user_info_response(status, &text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct TokenRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "isEmployee")]
    is_employee: bool,
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    #[serde(default)]
    token: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Interpret a token-issuance response.
///
/// A 2xx body that is not JSON or has no non-empty `token` counts as
/// [`IdentityError::MissingToken`].
pub(crate) fn parse_token_response(status: u16, body: &str) -> Result<String, IdentityError> {
    if !is_success(status) {
        return Err(IdentityError::Rejected { status });
    }

    serde_json::from_str::<TokenResponse>(body)
        .ok()
        .and_then(|r| r.token)
        .filter(|t| !t.is_empty())
        .ok_or(IdentityError::MissingToken { status })
}

/// Interpret a user-info response, keeping only `id` and `name`.
pub(crate) fn parse_user_info_response(status: u16, body: &str) -> Result<UserIdentity, IdentityError> {
    if !is_success(status) {
        return Err(IdentityError::Rejected { status });
    }

    serde_json::from_str(body).map_err(|e| IdentityError::Parse(e.to_string()))
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
