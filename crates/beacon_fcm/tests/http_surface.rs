//! Integration tests for the notification HTTP surface.
//!
//! These drive the real router built by `routes()`. No FCM credential is
//! configured in the test environment, so the gateway resolves to
//! "unavailable" and the send endpoint must answer 503 while registration
//! and status keep working.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use beacon_config::{AppConfig, FcmConfig, ServerConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        },
        use_fcm: true,
        fcm: Some(FcmConfig {
            project_id: Some("beacon-test".to_string()),
            key_path: None,
        }),
    })
}

async fn build_router() -> Router {
    // Make sure no ambient credential turns the gateway on under test
    std::env::remove_var("FCM_SERVICE_ACCOUNT_JSON");
    beacon_fcm::routes(test_config()).await
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

#[tokio::test]
async fn register_then_status_then_send_without_credentials() {
    let app = build_router().await;

    // Register a token
    let response = app
        .clone()
        .oneshot(post_json(
            "/notifications/register",
            json!({ "token": "abc123", "userId": "user1" }),
        ))
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["tokenCount"], json!(1));

    // The status endpoint sees it
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/notifications/send")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("ready"));
    assert_eq!(body["registeredDevices"], json!(1));

    // Without credentials the gateway reports itself unavailable
    let response = app
        .oneshot(post_json(
            "/notifications/send",
            json!({ "title": "Hi", "body": "There" }),
        ))
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["documentation"]
        .as_str()
        .expect("documentation should be a string")
        .contains("FCM_SERVICE_ACCOUNT_JSON"));
}

#[tokio::test]
async fn register_rejects_non_string_token_on_the_wire() {
    let app = build_router().await;

    let response = app
        .oneshot(post_json(
            "/notifications/register",
            json!({ "token": 12345 }),
        ))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        json!("Token is required and must be a string")
    );
}

#[tokio::test]
async fn status_with_no_devices_hints_at_enabling_notifications() {
    let app = build_router().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/notifications/send")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["registeredDevices"], json!(0));
    assert!(body["message"]
        .as_str()
        .expect("message should be a string")
        .contains("No devices registered"));
}
