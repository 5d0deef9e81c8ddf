#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tokio::sync::broadcast;
use tower::ServiceExt;

use securechain_api::auth::jwt::JwtConfig;
use securechain_api::auth::password::hash_password;
use securechain_api::auth::users::{UserDirectory, UserRecord};
use securechain_api::config::ServerConfig;
use securechain_api::router::build_app_router;
use securechain_api::state::AppState;
use securechain_core::envelope::EventEnvelope;
use securechain_core::publisher::MessageSink;
use securechain_events::EventBus;

pub const TEST_SECRET: &str = "integration-test-secret-long-enough";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            expiry_mins: 15,
        },
        users_file: None,
        webhook_url: None,
    }
}

/// A directory holding `alice` / `correct` with the `publisher` role.
pub fn test_directory() -> UserDirectory {
    UserDirectory::new(vec![UserRecord {
        username: "alice".to_string(),
        password_hash: hash_password("correct").expect("hashing should succeed"),
        roles: vec!["publisher".to_string()],
    }])
    .expect("directory should build")
}

/// Build the full application router around `sink`.
///
/// Uses the same middleware stack as production via [`build_app_router`].
pub fn build_app_with_sink(sink: Arc<dyn MessageSink>) -> Router {
    let state = AppState::new(test_config(), test_directory(), sink);
    build_app_router(state).expect("router should build")
}

/// Build the app on an in-process bus and return a subscriber to observe
/// published envelopes.
pub fn build_test_app() -> (Router, broadcast::Receiver<EventEnvelope>) {
    let bus = Arc::new(EventBus::default());
    let rx = bus.subscribe();
    (build_app_with_sink(bus), rx)
}

/// Wait for the next envelope on the bus.
pub async fn next_envelope(rx: &mut broadcast::Receiver<EventEnvelope>) -> EventEnvelope {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("envelope should arrive within 5s")
        .expect("bus should stay open")
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    authorization: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", authorization)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("body should be JSON")
}
