//! Adapters that turn business functions into axum handlers.
//!
//! Every wrapper decodes and validates its input first, calls the business
//! function at most once, and answers with an [`ApiResponse`] envelope:
//!
//! | outcome                              | status | `code`          |
//! |--------------------------------------|--------|-----------------|
//! | `Ok(value)`                          | 200    | 200             |
//! | `ApiError` from business code        | 400    | `ApiError.code` |
//! | other business error                 | 400    | -1              |
//! | missing body, bad JSON or query      | 400    | -1              |
//! | validation failure                   | 400    | -1              |

use std::{future::Future, pin::Pin, sync::Arc};

use axum::{
    body::{Body, HttpBody},
    extract::{Query, Request},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

use super::context::HttpContext;
use crate::interceptors::{ApiResponse, AppError};
use crate::utils::{Validator, WireNames};

/// Largest request body the JSON wrapper will read, in bytes.
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Future returned by every wrapped handler.
pub type WrappedFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// Builds wrapped handlers sharing one [`Validator`].
#[derive(Debug, Clone)]
pub struct HandlerWrapper {
    validator: Arc<Validator>,
    body_limit: usize,
}

impl HandlerWrapper {
    pub fn new(validator: Arc<Validator>) -> Self {
        Self {
            validator,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    /// Call `api_fn` with the request context only.
    pub fn simple<F, Fut, R>(
        &self,
        api_fn: F,
    ) -> impl Fn(Request) -> WrappedFuture + Clone + Send + Sync + 'static
    where
        F: Fn(HttpContext) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
        R: Serialize + Send + 'static,
    {
        move |request: Request| {
            let api_fn = api_fn.clone();
            Box::pin(async move {
                let (ctx, _body) = HttpContext::from_request(request);
                render(api_fn(ctx).await)
            }) as WrappedFuture
        }
    }

    /// Decode the JSON body into `T`, validate it, then call `api_fn`.
    ///
    /// Requests without a body are rejected before anything is read.
    pub fn json_body<T, F, Fut, R>(
        &self,
        api_fn: F,
    ) -> impl Fn(Request) -> WrappedFuture + Clone + Send + Sync + 'static
    where
        T: DeserializeOwned + Validate + WireNames + Send + 'static,
        F: Fn(T, HttpContext) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
        R: Serialize + Send + 'static,
    {
        let validator = self.validator.clone();
        let body_limit = self.body_limit;

        move |request: Request| {
            let api_fn = api_fn.clone();
            let validator = validator.clone();
            Box::pin(async move {
                let has_body = declared_length(&request).is_some_and(|len| len > 0);
                let (ctx, body) = HttpContext::from_request(request);
                if !has_body {
                    return ctx.send_rejection(AppError::MissingBody);
                }

                let value = match decode_body::<T>(&validator, body, body_limit).await {
                    Ok(value) => value,
                    Err(err) => return ctx.send_rejection(err),
                };

                render(api_fn(value, ctx).await)
            }) as WrappedFuture
        }
    }

    /// Decode the query string into `T` by field name, validate it, then
    /// call `api_fn`.
    pub fn query<T, F, Fut, R>(
        &self,
        api_fn: F,
    ) -> impl Fn(Request) -> WrappedFuture + Clone + Send + Sync + 'static
    where
        T: DeserializeOwned + Validate + WireNames + Send + 'static,
        F: Fn(T, HttpContext) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
        R: Serialize + Send + 'static,
    {
        let validator = self.validator.clone();

        move |request: Request| {
            let api_fn = api_fn.clone();
            let validator = validator.clone();
            Box::pin(async move {
                let (ctx, _body) = HttpContext::from_request(request);

                let value = match decode_query::<T>(&validator, &ctx) {
                    Ok(value) => value,
                    Err(err) => return ctx.send_rejection(err),
                };

                render(api_fn(value, ctx).await)
            }) as WrappedFuture
        }
    }
}

/// Body length from `Content-Length`, or the exact size of an in-memory body.
/// Streamed bodies of unknown length count as missing.
fn declared_length(request: &Request) -> Option<u64> {
    match request.headers().get(header::CONTENT_LENGTH) {
        Some(value) => value.to_str().ok()?.trim().parse().ok(),
        None => request.body().size_hint().exact(),
    }
}

async fn decode_body<T>(validator: &Validator, body: Body, body_limit: usize) -> Result<T, AppError>
where
    T: DeserializeOwned + Validate + WireNames,
{
    let bytes = axum::body::to_bytes(body, body_limit)
        .await
        .map_err(|e| AppError::BadRequest(format!("failed to read request body: {e}")))?;

    let value: T = serde_json::from_slice(&bytes).map_err(|e| AppError::BadRequest(e.to_string()))?;
    validator.validate_struct(&value)?;
    Ok(value)
}

fn decode_query<T>(validator: &Validator, ctx: &HttpContext) -> Result<T, AppError>
where
    T: DeserializeOwned + Validate + WireNames,
{
    let Query(value) = Query::<T>::try_from_uri(ctx.uri()).map_err(|e| AppError::BadRequest(e.body_text()))?;
    validator.validate_struct(&value)?;
    Ok(value)
}

fn render<R: Serialize>(outcome: anyhow::Result<R>) -> Response {
    match outcome {
        Ok(value) => ApiResponse::success(value).into_response_with(StatusCode::OK),
        Err(err) => AppError::from_business(err).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(builder: axum::http::request::Builder, body: Body) -> Request {
        builder.body(body).unwrap()
    }

    #[test]
    fn content_length_header_wins() {
        let req = request(
            Request::builder().header(header::CONTENT_LENGTH, "0"),
            Body::from("{\"a\":1}"),
        );
        assert_eq!(declared_length(&req), Some(0));
    }

    #[test]
    fn in_memory_body_reports_its_size() {
        let req = request(Request::builder(), Body::from("{}"));
        assert_eq!(declared_length(&req), Some(2));

        let req = request(Request::builder(), Body::empty());
        assert_eq!(declared_length(&req), Some(0));
    }

    #[test]
    fn malformed_content_length_is_unknown() {
        let req = request(
            Request::builder().header(header::CONTENT_LENGTH, "lots"),
            Body::from("{}"),
        );
        assert_eq!(declared_length(&req), None);
    }
}
