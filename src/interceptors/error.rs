use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::response::ApiResponse;

/// Envelope code used for every error that is not an [`ApiError`].
pub const GENERIC_ERROR_CODE: i64 = -1;

/// Caller-facing error with a stable numeric code and a message that is safe
/// to show to clients.
///
/// Business functions return it inside an `anyhow::Error`; wrappers and the
/// auth middleware find it again by walking the error chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: i64,
    pub message: String,
}

impl ApiError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Finds the first `ApiError` in the chain of `err`.
    pub fn find(err: &anyhow::Error) -> Option<&ApiError> {
        err.chain().find_map(|cause| cause.downcast_ref::<ApiError>())
    }
}

/// Every way a wrapped request can be rejected
#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing request body")]
    MissingBody,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("{message}")]
    Business { code: i64, message: String },

    #[error("{message}")]
    Unauthorized { code: i64, message: String },

    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    /// Classifies an error returned by a business function.
    pub fn from_business(err: anyhow::Error) -> Self {
        let (code, message) = classify(&err);
        AppError::Business { code, message }
    }

    /// Classifies an error returned by a token verifier.
    pub fn from_verifier(err: anyhow::Error) -> Self {
        let (code, message) = classify(&err);
        AppError::Unauthorized { code, message }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Unauthorized {
            code: GENERIC_ERROR_CODE,
            message: message.into(),
        }
    }

    /// Code carried in the envelope's `code` field.
    pub fn error_code(&self) -> i64 {
        match self {
            AppError::Business { code, .. } | AppError::Unauthorized { code, .. } => *code,
            AppError::MissingBody
            | AppError::BadRequest(_)
            | AppError::ValidationError(_)
            | AppError::InternalError(_) => GENERIC_ERROR_CODE,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingBody => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Business { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_envelope(&self) -> ApiResponse<String> {
        ApiResponse::failure(self.error_code(), self.to_string())
    }
}

fn classify(err: &anyhow::Error) -> (i64, String) {
    match ApiError::find(err) {
        Some(api_error) => (api_error.code, api_error.message.clone()),
        None => (GENERIC_ERROR_CODE, err.to_string()),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "Application error: {}", self);
        } else {
            tracing::warn!(
                status = status.as_u16(),
                code = self.error_code(),
                "Request rejected: {}",
                self
            );
        }

        self.to_envelope().into_response_with(status)
    }
}
