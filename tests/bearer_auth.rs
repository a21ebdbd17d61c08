use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use api_wrapper::handlers::{HandlerWrapper, HttpContext};
use api_wrapper::interceptors::ApiError;
use api_wrapper::middleware::BearerAuth;
use api_wrapper::utils::Validator;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    middleware,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

const EXPIRED_TOKEN: i64 = 1001;

fn app(calls: Arc<AtomicUsize>) -> Router {
    let auth = BearerAuth::from_verifier(|token: &str| -> anyhow::Result<()> {
        match token {
            "goodtoken" => Ok(()),
            "stale" => Err(ApiError::new(EXPIRED_TOKEN, "token expired").into()),
            _ => anyhow::bail!("unknown token"),
        }
    });

    let wrap = HandlerWrapper::new(Arc::new(Validator::new()));
    Router::new()
        .route(
            "/secret",
            get(wrap.simple(move |ctx: HttpContext| {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    anyhow::Ok(json!({ "token": ctx.bearer_token() }))
                }
            })),
        )
        .route_layer(middleware::from_fn_with_state(auth, BearerAuth::process))
}

async fn call(app: Router, authorization: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri("/secret");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn missing_header_is_unauthorized() {
    let calls = Arc::new(AtomicUsize::new(0));

    let (status, body) = call(app(calls.clone()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "success": false, "code": -1, "data": "no token" }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_header_is_treated_as_missing() {
    let calls = Arc::new(AtomicUsize::new(0));

    let (status, body) = call(app(calls.clone()), Some("")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "success": false, "code": -1, "data": "no token" }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_headers_are_unauthorized() {
    let calls = Arc::new(AtomicUsize::new(0));

    for value in ["Token abc", "Bearer", "Bearer "] {
        let (status, body) = call(app(calls.clone()), Some(value)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "header {value:?}");
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], -1);
        assert_eq!(body["data"], "invalid token format");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn rejected_token_never_reaches_handler() {
    let calls = Arc::new(AtomicUsize::new(0));

    let (status, body) = call(app(calls.clone()), Some("Bearer stale")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({ "success": false, "code": EXPIRED_TOKEN, "data": "token expired" })
    );

    let (status, body) = call(app(calls.clone()), Some("Bearer forged")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "success": false, "code": -1, "data": "unknown token" }));

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn good_token_reaches_handler() {
    let calls = Arc::new(AtomicUsize::new(0));

    let (status, body) = call(app(calls.clone()), Some("Bearer goodtoken")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "code": 200, "data": { "token": "goodtoken" } })
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
