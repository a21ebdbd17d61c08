use api_wrapper::config::{AppConfig, AppState};
use api_wrapper::middleware::setup_logging;
use api_wrapper::routes::create_router;
use api_wrapper::utils::Validator;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let app_config = AppConfig::from_env()?;

    // Setup logging
    setup_logging(&app_config.log)?;

    tracing::info!("Loaded configuration for environment: {}", app_config.environment);
    if app_config.api_token.is_none() {
        tracing::warn!("API_TOKEN is not set; every protected route will answer 401");
    }

    // Create AppState
    let app_state = AppState::new(Validator::new(), app_config.clone());

    // Create router
    let app = create_router(app_state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Create server address
    let addr = app_config.server_address();

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        "{} v{} is running on {}",
        app_config.app_name,
        app_config.app_version,
        addr
    );

    axum::serve(listener, app).await?;

    Ok(())
}
