use serde_json::{json, Value};

use crate::handlers::HttpContext;

/// Health check endpoint
pub async fn health_check(_ctx: HttpContext) -> anyhow::Result<Value> {
    Ok(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
