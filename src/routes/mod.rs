use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::config::AppState;
use crate::handlers::{greet, health_check, search, whoami, HandlerWrapper};
use crate::interceptors::ApiError;
use crate::middleware::BearerAuth;

/// Code returned when a bearer token does not match the configured one.
pub const INVALID_TOKEN: i64 = 4010;

/// Verifier accepting only the configured `API_TOKEN`.
pub fn static_token_auth(expected: Option<String>) -> BearerAuth {
    BearerAuth::from_verifier(move |token: &str| -> anyhow::Result<()> {
        match expected.as_deref() {
            Some(expected) if expected == token => Ok(()),
            Some(_) => Err(ApiError::new(INVALID_TOKEN, "invalid token").into()),
            None => anyhow::bail!("no API token configured"),
        }
    })
}

/// Create API router
pub fn create_router(state: AppState) -> Router {
    let wrap = HandlerWrapper::new(state.validator.clone());
    let auth = static_token_auth(state.config.api_token.clone());

    // Health check route (outside /api)
    let health_routes = Router::new()
        .route("/health", get(wrap.simple(health_check)));

    // Protected API routes (authentication required)
    let protected_routes = Router::new()
        .route("/greet", post(wrap.json_body(greet)))
        .route("/search", get(wrap.query(search)))
        .route("/whoami", get(wrap.simple(whoami)))
        .route_layer(middleware::from_fn_with_state(auth, BearerAuth::process));

    Router::new()
        .merge(health_routes)
        .nest("/api", protected_routes)
}
