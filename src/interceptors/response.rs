use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::error::GENERIC_ERROR_CODE;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Envelope code of every successful response.
pub const SUCCESS_CODE: i64 = 200;

/// Standard API response envelope, used for success and failure alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: i64,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a business result
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: SUCCESS_CODE,
            data,
        }
    }

    /// Render the envelope with the given status.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        json_response(status, &self)
    }
}

impl ApiResponse<String> {
    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            data: message.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = if self.success {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        };
        self.into_response_with(status)
    }
}

/// Encode `body` as JSON and build a response with `status`.
///
/// A body that cannot be encoded turns into a 500 envelope instead.
pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => build(status, bytes),
        Err(e) => {
            tracing::warn!("Failed to encode response: {}", e);
            let fallback = ApiResponse::failure(GENERIC_ERROR_CODE, "failed to encode response");
            // A String envelope always encodes.
            let bytes = serde_json::to_vec(&fallback).unwrap_or_default();
            build(StatusCode::INTERNAL_SERVER_ERROR, bytes)
        }
    }
}

fn build(status: StatusCode, bytes: Vec<u8>) -> Response {
    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(JSON_CONTENT_TYPE),
    );
    response
}

// Helper macro for creating success responses
#[macro_export]
macro_rules! success_response {
    ($data:expr) => {
        $crate::interceptors::ApiResponse::success($data)
    };
}

// Helper macro for creating error responses
#[macro_export]
macro_rules! error_response {
    ($message:expr) => {
        $crate::interceptors::ApiResponse::failure(
            $crate::interceptors::GENERIC_ERROR_CODE,
            $message,
        )
    };
    ($code:expr, $message:expr) => {
        $crate::interceptors::ApiResponse::failure($code, $message)
    };
}
