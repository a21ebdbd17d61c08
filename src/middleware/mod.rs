pub mod auth;
pub mod logging;

pub use auth::{BearerAuth, BearerToken, TokenVerifier};
pub use logging::{file_appender, file_layer, setup_logging, LoggingError};
