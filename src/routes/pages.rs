//! Server-rendered pages — landing, login, dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The landing page only checks cookie presence. The dashboard performs the
//! authoritative check by calling the Identity Service directly on every
//! render, independent of `/api/auth/me`.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::auth::INVALID_CREDENTIALS;
use crate::gate::{DASHBOARD_PATH, LOGIN_PATH, resolve_destination};
use crate::identity::UserIdentity;
use crate::session::{cleared_cookie, token_from_jar};
use crate::state::AppState;

const LOGIN_TEMPLATE: &str = include_str!("../../templates/login.html");
const DASHBOARD_TEMPLATE: &str = include_str!("../../templates/dashboard.html");

/// Escape text for interpolation into HTML bodies and attribute values.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[must_use]
pub fn render_login_page(destination: &str) -> String {
    LOGIN_TEMPLATE
        .replace("{{DESTINATION}}", &escape_html(destination))
        .replace("{{ERROR_MESSAGE}}", INVALID_CREDENTIALS)
}

#[must_use]
pub fn render_dashboard_page(user: &UserIdentity) -> String {
    DASHBOARD_TEMPLATE
        .replace("{{ID}}", &escape_html(&user.id))
        .replace("{{NAME}}", &escape_html(&user.name))
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /` — presence-only redirect.
pub async fn landing(State(state): State<AppState>, jar: CookieJar) -> Redirect {
    if token_from_jar(&jar, &state.config.cookie_name).is_some() {
        Redirect::temporary(DASHBOARD_PATH)
    } else {
        Redirect::temporary(LOGIN_PATH)
    }
}

#[derive(Deserialize)]
pub struct LoginQuery {
    from: Option<String>,
}

/// `GET /login` — credential form; the script posts to the login route.
pub async fn login_page(Query(query): Query<LoginQuery>) -> Html<String> {
    let destination = resolve_destination(query.from.as_deref());
    Html(render_login_page(&destination))
}

/// `GET /dashboard` — authoritative check, then render.
pub async fn dashboard(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some(token) = token_from_jar(&jar, &state.config.cookie_name) else {
        return Redirect::temporary(LOGIN_PATH).into_response();
    };

    match state.identity.user_info(token).await {
        Ok(user) => (
            [(header::CACHE_CONTROL, "no-store")],
            Html(render_dashboard_page(&user)),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "dashboard identity check failed");
            // Drop the stale cookie so the gate stops bouncing /login back here.
            let jar = CookieJar::new().add(cleared_cookie(&state.config));
            (jar, Redirect::temporary(LOGIN_PATH)).into_response()
        }
    }
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
