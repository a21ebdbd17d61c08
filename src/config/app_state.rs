use std::sync::Arc;

use crate::config::AppConfig;
use crate::utils::Validator;

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Constraint checker handed to the handler wrappers
    pub validator: Arc<Validator>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(validator: Validator, config: AppConfig) -> Self {
        Self {
            validator: Arc::new(validator),
            config: Arc::new(config),
        }
    }
}
