//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the auth API and the server-rendered pages under one Axum router.
//! The session gate wraps everything; it only acts on `/dashboard` and
//! `/login` and passes every other path through untouched.

pub mod auth;
pub mod pages;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::gate;
use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::landing))
        .route("/login", get(pages::login_page))
        .route("/login/", get(pages::login_page))
        .route("/dashboard", get(pages::dashboard))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/healthz", get(healthz))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), gate::session_gate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// Registered before the gate layer so unknown `/dashboard/...` paths are gated too.
async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
