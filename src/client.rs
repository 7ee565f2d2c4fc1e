//! Portal client — the login page's flow, driven from Rust.
//!
//! Submits credentials to the login route, confirms the session through
//! `/api/auth/me`, records the identity in a [`SessionCache`], and reports
//! where the browser should navigate next. The session cookie stays in the
//! client's own cookie jar, exactly as it would in a browser tab.
//!
//! ERROR HANDLING
//! ==============
//! A failed login never touches the cache, and callers only ever see the
//! generic invalid-credentials message.

use crate::gate::resolve_destination;
use crate::identity::{Credentials, UserIdentity};
use crate::session_cache::SessionCache;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid email or password")]
    InvalidCredentials { status: u16 },
    #[error("unauthorized (status {0})")]
    Unauthorized(u16),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub struct PortalClient {
    http: reqwest::Client,
    base_url: String,
    cache: SessionCache,
}

impl PortalClient {
    /// Build a client for the app at `base_url`, reporting into `cache`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, cache: SessionCache) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url, cache })
    }

    #[must_use]
    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Log in and return the destination to navigate to.
    ///
    /// `from` is the raw `from` query parameter of the login page, if any.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidCredentials`] when the login route refuses,
    /// [`ClientError::Unauthorized`] when the fresh session cannot be read back.
    pub async fn login(&self, credentials: &Credentials, from: Option<&str>) -> Result<String, ClientError> {
        let resp = self
            .http
            .post(self.url("/api/auth/login"))
            .json(credentials)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "login refused");
            return Err(ClientError::InvalidCredentials { status: status.as_u16() });
        }

        let user = self.me().await?;
        self.cache.set(user);
        Ok(resolve_destination(from))
    }

    /// Fetch the current identity from `/api/auth/me`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Unauthorized`] with the response status on any non-2xx.
    pub async fn me(&self) -> Result<UserIdentity, ClientError> {
        let resp = self.http.get(self.url("/api/auth/me")).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Unauthorized(status.as_u16()));
        }
        Ok(resp.json().await?)
    }

    /// Clear the cached identity and the server-side cookie.
    ///
    /// Returns the login redirect target reported by the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout request cannot be sent.
    pub async fn logout(&self) -> Result<Option<String>, ClientError> {
        self.cache.clear();
        let resp = self.http.post(self.url("/api/auth/logout")).send().await?;
        Ok(resp
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned))
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
