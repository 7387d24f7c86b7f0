//! Gateway health endpoint.

use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// Handler for `GET /api/health`.
pub async fn get_health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "snapsolve",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let Json(body) = get_health().await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "snapsolve");
    }
}
