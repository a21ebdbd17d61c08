use std::{fmt, sync::Arc};

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::interceptors::AppError;

/// Decides whether a bearer token is acceptable.
///
/// Returning an [`ApiError`](crate::interceptors::ApiError) puts its code in
/// the 401 envelope; any other error is reported with the generic code.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> anyhow::Result<()>;
}

#[async_trait]
impl<F> TokenVerifier for F
where
    F: Fn(&str) -> anyhow::Result<()> + Send + Sync,
{
    async fn verify(&self, token: &str) -> anyhow::Result<()> {
        self(token)
    }
}

/// Token of the current request, inserted once it has been verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

/// Bearer authentication middleware
#[derive(Clone)]
pub struct BearerAuth {
    verifier: Arc<dyn TokenVerifier>,
}

impl fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth").finish_non_exhaustive()
    }
}

impl BearerAuth {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }

    pub fn from_verifier(verifier: impl TokenVerifier + 'static) -> Self {
        Self::new(Arc::new(verifier))
    }

    /// Use with `axum::middleware::from_fn_with_state(auth, BearerAuth::process)`.
    pub async fn process(
        State(auth): State<BearerAuth>,
        mut request: Request,
        next: Next,
    ) -> Result<Response, AppError> {
        let token = auth.authenticate(request.headers().get(header::AUTHORIZATION)).await?;

        request.extensions_mut().insert(BearerToken(token));

        Ok(next.run(request).await)
    }

    /// Checks an `Authorization` header value and returns the verified token.
    pub async fn authenticate(
        &self,
        header_value: Option<&header::HeaderValue>,
    ) -> Result<String, AppError> {
        // An empty header counts as no header at all.
        let header_value = header_value
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::unauthorized("no token"))?;
        let header_value = header_value
            .to_str()
            .map_err(|_| AppError::unauthorized("invalid token format"))?;
        let token = parse_bearer(header_value)
            .ok_or_else(|| AppError::unauthorized("invalid token format"))?;

        self.verifier
            .verify(token)
            .await
            .map_err(AppError::from_verifier)?;

        Ok(token.to_string())
    }
}

/// Splits `Bearer <token>` on the first space.
fn parse_bearer(header_value: &str) -> Option<&str> {
    match header_value.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() => Some(token),
        _ => None,
    }
}
