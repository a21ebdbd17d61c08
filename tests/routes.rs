use std::path::PathBuf;

use api_wrapper::config::{AppConfig, AppState, LogConfig};
use api_wrapper::handlers::demo_handler::RESERVED_NAME;
use api_wrapper::routes::{create_router, INVALID_TOKEN};
use api_wrapper::utils::Validator;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

const TOKEN: &str = "test-token";

fn test_config(api_token: Option<&str>) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        app_name: "api-wrapper".to_string(),
        app_version: "0.1.0".to_string(),
        api_token: api_token.map(str::to_string),
        log: LogConfig {
            file: PathBuf::from("logs/test.log"),
            ..LogConfig::default()
        },
    }
}

fn app(api_token: Option<&str>) -> Router {
    create_router(AppState::new(Validator::new(), test_config(api_token)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn authorized(method: Method, uri: &str, body: Option<&str>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"));
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn health_is_public() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(Some(TOKEN)), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn api_routes_require_token() {
    let request = Request::builder().uri("/api/whoami").body(Body::empty()).unwrap();
    let (status, body) = send(app(Some(TOKEN)), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["data"], "no token");

    let request = Request::builder()
        .uri("/api/whoami")
        .header(header::AUTHORIZATION, "Bearer wrong")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(Some(TOKEN)), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "success": false, "code": INVALID_TOKEN, "data": "invalid token" }));
}

#[tokio::test]
async fn unconfigured_token_rejects_everyone() {
    let (status, body) = send(app(None), authorized(Method::GET, "/api/whoami", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], -1);
}

#[tokio::test]
async fn whoami_sees_verified_token() {
    let (status, body) = send(app(Some(TOKEN)), authorized(Method::GET, "/api/whoami", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({ "authenticated": true, "token_length": TOKEN.len(), "path": "/api/whoami" })
    );
}

#[tokio::test]
async fn greet_validates_and_answers() {
    let (status, body) = send(
        app(Some(TOKEN)),
        authorized(Method::POST, "/api/greet", Some(r#"{"displayName":"Ada"}"#)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "greeting": "Hello, Ada!" }));

    let (status, body) = send(
        app(Some(TOKEN)),
        authorized(
            Method::POST,
            "/api/greet",
            Some(r#"{"displayName":"","email":"nope"}"#),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["data"],
        "validation error: displayName must be between 1 and 50 characters in length; \
         email must be a valid email address"
    );

    let (status, body) = send(
        app(Some(TOKEN)),
        authorized(Method::POST, "/api/greet", Some(r#"{"displayName":"admin"}"#)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "success": false, "code": RESERVED_NAME, "data": "display name is reserved" })
    );
}

#[tokio::test]
async fn search_reads_query_string() {
    let (status, body) = send(
        app(Some(TOKEN)),
        authorized(Method::GET, "/api/search?q=rust&limit=5", None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "query": "rust", "limit": 5 }));

    let (status, body) = send(
        app(Some(TOKEN)),
        authorized(Method::GET, "/api/search?q=rust&limit=0", None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"], "validation error: limit must be between 1 and 100");
}
