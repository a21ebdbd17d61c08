use axum::{
    extract::{OriginalUri, Request},
    http::{header::AsHeaderName, request::Parts, HeaderMap, Method, StatusCode, Uri},
    response::Response,
};
use serde::Serialize;

use crate::interceptors::{json_response, ApiResponse, AppError};
use crate::middleware::BearerToken;

/// Request handle passed to business functions.
///
/// Owns the request head (method, URI, headers, extensions) for the lifetime
/// of one request and builds enveloped JSON responses.
#[derive(Debug)]
pub struct HttpContext {
    parts: Parts,
}

impl HttpContext {
    pub fn new(parts: Parts) -> Self {
        Self { parts }
    }

    /// Split a request into its context and body.
    pub fn from_request(request: Request) -> (Self, axum::body::Body) {
        let (parts, body) = request.into_parts();
        (Self::new(parts), body)
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    /// Path as seen by this router; `nest` strips its prefix from it.
    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    /// URI the client requested, before any `nest` prefix was stripped.
    pub fn original_uri(&self) -> &Uri {
        self.extension::<OriginalUri>()
            .map(|uri| &uri.0)
            .unwrap_or(&self.parts.uri)
    }

    pub fn original_path(&self) -> &str {
        self.original_uri().path()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// Header value as text; `None` when absent or not visible ASCII.
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.parts.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn extension<T: Clone + Send + Sync + 'static>(&self) -> Option<&T> {
        self.parts.extensions.get::<T>()
    }

    /// Token accepted by the bearer middleware, if it ran.
    pub fn bearer_token(&self) -> Option<&str> {
        self.extension::<BearerToken>().map(|token| token.0.as_str())
    }

    pub fn send_json<T: Serialize + ?Sized>(&self, status: StatusCode, data: &T) -> Response {
        json_response(status, data)
    }

    pub fn send_success<T: Serialize>(&self, data: T) -> Response {
        self.send_json(StatusCode::OK, &ApiResponse::success(data))
    }

    pub fn send_error(&self, status: StatusCode, code: i64, message: impl Into<String>) -> Response {
        self.send_json(status, &ApiResponse::failure(code, message))
    }

    /// Log and render a request that was turned away before reaching
    /// business code.
    pub fn send_rejection(&self, err: AppError) -> Response {
        let status = err.status_code();
        tracing::warn!(
            method = %self.method(),
            path = self.original_path(),
            status = status.as_u16(),
            "Request rejected: {}",
            err
        );
        self.send_error(status, err.error_code(), err.to_string())
    }
}
