//! Session token cookie — read, issue, clear.
//!
//! ARCHITECTURE
//! ============
//! The session token lives only in the browser's cookie jar. The server
//! never stores it; every handler reads it from the request and, at most,
//! writes one replacement cookie on the response.
//!
//! TRADE-OFFS
//! ==========
//! Expiry is enforced only by the cookie `Max-Age` and upstream rejection.
//! There is no server-side clock check on the token.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::config::AppConfig;

/// Lifetime of a freshly issued session cookie.
pub const SESSION_MAX_AGE: Duration = Duration::hours(24);

/// Return the session token if the cookie is present and non-empty.
#[must_use]
pub fn token_from_jar<'a>(jar: &'a CookieJar, cookie_name: &str) -> Option<&'a str> {
    jar.get(cookie_name)
        .map(Cookie::value)
        .filter(|v| !v.is_empty())
}

/// Build the cookie that carries a newly issued token.
#[must_use]
pub fn session_cookie(config: &AppConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(SESSION_MAX_AGE)
        .build()
}

/// Build the cookie that overwrites the token with an immediately expired blank.
#[must_use]
pub fn cleared_cookie(config: &AppConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(Duration::ZERO)
        .build()
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
