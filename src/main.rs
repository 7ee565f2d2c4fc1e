use std::sync::Arc;

use portal_gate::config::AppConfig;
use portal_gate::identity::HttpIdentityClient;
use portal_gate::{routes, state};

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().expect("invalid configuration");
    let identity = HttpIdentityClient::new(config.api_base.clone()).expect("identity client init failed");
    tracing::info!(
        api_base = %config.api_base,
        cookie = %config.cookie_name,
        secure_cookie = config.cookie_secure,
        "identity client initialized"
    );

    let port = config.port;
    let state = state::AppState::new(config, Arc::new(identity));

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "portal-gate listening");
    axum::serve(listener, app).await.expect("server failed");
}
