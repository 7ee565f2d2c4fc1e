//! Session gate — presence-only redirect filter in front of the pages.
//!
//! DESIGN
//! ======
//! The gate only asks "is a token cookie present?". It never calls the
//! Identity Service, so a stale cookie can reach `/dashboard`; the
//! dashboard's own authoritative check then redirects back to login.
//! Keeping the two tiers separate avoids an upstream round trip on every
//! navigation.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::session::token_from_jar;
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Query parameter carrying the originally requested destination.
pub const FROM_PARAM: &str = "from";

/// Outcome of the gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    /// Send the browser to login, remembering where it was going.
    ToLogin { from: String },
    ToDashboard,
}

impl GateDecision {
    /// Location header value for redirect decisions.
    #[must_use]
    pub fn location(&self) -> Option<String> {
        match self {
            Self::Pass => None,
            Self::ToLogin { from } => Some(login_url_with_from(from)),
            Self::ToDashboard => Some(DASHBOARD_PATH.to_owned()),
        }
    }
}

/// True when `path` is `prefix` itself or a sub-path of it.
fn under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn is_protected(path: &str) -> bool {
    under(path, DASHBOARD_PATH)
}

fn is_login(path: &str) -> bool {
    path == LOGIN_PATH || path == "/login/"
}

/// Apply the gate rule table.
///
/// `target` is the path plus query, preserved for the post-login redirect.
#[must_use]
pub fn decide(path: &str, target: &str, token_present: bool) -> GateDecision {
    if is_protected(path) {
        if token_present {
            return GateDecision::Pass;
        }
        return GateDecision::ToLogin { from: target.to_owned() };
    }
    if is_login(path) && token_present {
        return GateDecision::ToDashboard;
    }
    GateDecision::Pass
}

/// `/login?from=<encoded target>`
#[must_use]
pub fn login_url_with_from(from: &str) -> String {
    format!("{LOGIN_PATH}?{FROM_PARAM}={}", urlencoding::encode(from))
}

/// Resolve the post-login destination from the `from` parameter.
///
/// Only same-site absolute paths are honored; anything else falls back to
/// the dashboard.
#[must_use]
pub fn resolve_destination(from: Option<&str>) -> String {
    match from.map(str::trim) {
        Some(dest) if is_same_site_path(dest) => dest.to_owned(),
        _ => DASHBOARD_PATH.to_owned(),
    }
}

// Browsers drop tab/CR/LF before parsing, so `/\t/host` would become `//host`.
fn is_same_site_path(dest: &str) -> bool {
    !dest.chars().any(|c| c.is_ascii_control())
        && dest.starts_with('/')
        && !dest.starts_with("//")
        && !dest.starts_with("/\\")
}

/// Axum middleware applying [`decide`] to every request.
pub async fn session_gate(State(state): State<AppState>, jar: CookieJar, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let target = req
        .uri()
        .path_and_query()
        .map_or_else(|| path.clone(), |pq| pq.as_str().to_owned());
    let token_present = token_from_jar(&jar, &state.config.cookie_name).is_some();

    let decision = decide(&path, &target, token_present);
    match decision.location() {
        None => next.run(req).await,
        Some(location) => {
            tracing::debug!(%path, ?decision, "session gate redirect");
            Redirect::temporary(&location).into_response()
        }
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
