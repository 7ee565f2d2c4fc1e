//! Auth routes — credential exchange, logout, current user.
//!
//! These handlers are a thin proxy over the Identity Service. The only
//! state they touch is the session cookie, read and written within one
//! request.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use crate::gate::LOGIN_PATH;
use crate::identity::{Credentials, IdentityError};
use crate::session::{cleared_cookie, session_cookie, token_from_jar};
use crate::state::AppState;

/// Shown for every login failure; never says which field was wrong.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
const UNAUTHORIZED: &str = "Unauthorized";

/// Upstream status if it is an error status, otherwise `fallback`.
pub(crate) fn error_status(err: &IdentityError, fallback: StatusCode) -> StatusCode {
    err.upstream_status()
        .and_then(|s| StatusCode::from_u16(s).ok())
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(fallback)
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/login` — exchange credentials for a token cookie.
pub async fn login(State(state): State<AppState>, payload: Result<Json<Credentials>, JsonRejection>) -> Response {
    let credentials = match payload {
        Ok(Json(credentials)) => credentials,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "login body rejected");
            return message(StatusCode::BAD_REQUEST, INVALID_CREDENTIALS);
        }
    };

    let token = match state.identity.issue_token(&credentials).await {
        Ok(token) => token,
        Err(e) => {
            let status = error_status(&e, StatusCode::BAD_REQUEST);
            tracing::warn!(error = %e, %status, "login failed");
            return message(status, INVALID_CREDENTIALS);
        }
    };

    let jar = CookieJar::new().add(session_cookie(&state.config, token));
    (jar, Json(json!({ "ok": true }))).into_response()
}

/// `POST /api/auth/logout` — clear the cookie and send the browser to login.
///
/// Works the same with or without an existing session.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let jar = CookieJar::new().add(cleared_cookie(&state.config));
    let location = format!("{}{LOGIN_PATH}", state.config.app_url);
    (jar, Redirect::to(&location))
}

/// `GET /api/auth/me` — resolve the cookie to `{id, name}`.
pub async fn me(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some(token) = token_from_jar(&jar, &state.config.cookie_name) else {
        return message(StatusCode::UNAUTHORIZED, UNAUTHORIZED);
    };

    match state.identity.user_info(token).await {
        Ok(user) => Json(user).into_response(),
        Err(e) => {
            let status = error_status(&e, StatusCode::UNAUTHORIZED);
            tracing::warn!(error = %e, %status, "user info lookup failed");
            message(status, UNAUTHORIZED)
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
