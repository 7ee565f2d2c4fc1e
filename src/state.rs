//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds immutable configuration and the Identity Service client. There
//! is no per-request or per-user mutable state on the server.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::identity::IdentityApi;

/// Shared application state. Clone is required by Axum; all fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub identity: Arc<dyn IdentityApi>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, identity: Arc<dyn IdentityApi>) -> Self {
        Self { config: Arc::new(config), identity }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
