use axum::{Json, http::StatusCode};
use serde_json::{Value, json};

/// Живость сервиса; SNMP здесь не трогается
pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "UTC_time": chrono::Utc::now().to_rfc2822(),
        })),
    )
}
