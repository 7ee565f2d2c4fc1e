//! Full-stack checks: fake upstream Identity Service, real HTTP identity
//! client, the application router, and the portal client, all on loopback.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use portal_gate::client::{ClientError, PortalClient};
use portal_gate::config::AppConfig;
use portal_gate::identity::{Credentials, HttpIdentityClient, UserIdentity};
use portal_gate::routes;
use portal_gate::session_cache::SessionCache;
use portal_gate::state::AppState;
use serde_json::{Value, json};
use tokio::net::TcpListener;

const PASSWORD: &str = "s3cret";
const TOKEN: &str = "tok-ada";

// =============================================================================
// FAKE UPSTREAM
// =============================================================================

async fn issue_token(Json(body): Json<Value>) -> Response {
    if body["isEmployee"] != json!(true) {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "employees only" }))).into_response();
    }
    if body["password"] == PASSWORD {
        Json(json!({ "token": TOKEN, "tokenType": "bearer" })).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "message": "bad credentials" }))).into_response()
    }
}

async fn user_info(headers: HeaderMap) -> Response {
    let expected = format!("Bearer {TOKEN}");
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(auth) if auth == expected => {
            Json(json!({ "id": 42, "name": "Ada", "email": "ada@example.com", "roles": ["staff"] })).into_response()
        }
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

fn upstream() -> Router {
    Router::new()
        .route("/v1/yeshtery/token", post(issue_token))
        .route("/v1/user/info", get(user_info))
}

// =============================================================================
// HARNESS
// =============================================================================

async fn serve(listener: TcpListener, router: Router) -> SocketAddr {
    let addr = listener.local_addr().expect("bound listener has an address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server failed");
    });
    addr
}

async fn spawn_app(api_base: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = AppConfig::for_api_base(api_base.clone());
    config.app_url = format!("http://{addr}");
    let identity = HttpIdentityClient::new(api_base).unwrap();
    let app = routes::app(AppState::new(config, Arc::new(identity)));

    serve(listener, app).await
}

async fn spawn_stack() -> SocketAddr {
    let upstream_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let upstream_addr = serve(upstream_listener, upstream()).await;
    spawn_app(format!("http://{upstream_addr}")).await
}

fn raw_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

// =============================================================================
// TESTS
// =============================================================================

#[tokio::test]
async fn login_me_logout_round_trip() {
    let app = spawn_stack().await;
    let cache = SessionCache::new();
    let client = PortalClient::new(format!("http://{app}"), cache.clone()).unwrap();

    let destination = client
        .login(&Credentials::new("ada@example.com", PASSWORD), Some("/dashboard/orders"))
        .await
        .unwrap();
    assert_eq!(destination, "/dashboard/orders");
    assert_eq!(cache.current(), Some(UserIdentity { id: "42".into(), name: "Ada".into() }));

    let me = client.me().await.unwrap();
    assert_eq!(me.name, "Ada");

    let location = client.logout().await.unwrap();
    assert_eq!(location, Some(format!("http://{app}/login")));
    assert!(cache.current().is_none());

    let err = client.me().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(401)));
}

#[tokio::test]
async fn login_defaults_destination_and_rejects_offsite_from() {
    let app = spawn_stack().await;
    let client = PortalClient::new(format!("http://{app}"), SessionCache::new()).unwrap();

    let creds = Credentials::new("ada@example.com", PASSWORD);
    assert_eq!(client.login(&creds, None).await.unwrap(), "/dashboard");
    assert_eq!(client.login(&creds, Some("https://evil.test")).await.unwrap(), "/dashboard");
}

#[tokio::test]
async fn wrong_password_leaves_cache_empty() {
    let app = spawn_stack().await;
    let cache = SessionCache::new();
    let client = PortalClient::new(format!("http://{app}"), cache.clone()).unwrap();

    let err = client
        .login(&Credentials::new("a@b.com", "wrong"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidCredentials { status: 401 }));
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(cache.current().is_none());
}

#[tokio::test]
async fn dashboard_renders_identity_from_upstream() {
    let app = spawn_stack().await;

    let resp = raw_client()
        .get(format!("http://{app}/dashboard"))
        .header(header::COOKIE.as_str(), format!("access_token={TOKEN}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Ada"));
    assert!(html.contains("42"));
}

#[tokio::test]
async fn dashboard_with_stale_token_redirects_to_login() {
    let app = spawn_stack().await;

    let resp = raw_client()
        .get(format!("http://{app}/dashboard"))
        .header(header::COOKIE.as_str(), "access_token=expired")
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_redirection());
    assert_eq!(
        resp.headers()
            .get(header::LOCATION.as_str())
            .and_then(|v| v.to_str().ok()),
        Some("/login")
    );
}

#[tokio::test]
async fn upstream_down_fails_closed() {
    let dead = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let app = spawn_app(format!("http://{dead}")).await;
    let client = PortalClient::new(format!("http://{app}"), SessionCache::new()).unwrap();

    let err = client
        .login(&Credentials::new("ada@example.com", PASSWORD), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidCredentials { status: 400 }));

    let resp = raw_client()
        .get(format!("http://{app}/api/auth/me"))
        .header(header::COOKIE.as_str(), format!("access_token={TOKEN}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 401);
}
