use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use super::AppState;
use crate::collector::{PollError, SnmpCollector};
use crate::config::PrinterProfile;
use crate::formatter::JsonFormatter;
use crate::snmp::Connector;

fn status_for(err: &PollError) -> StatusCode {
    match err {
        PollError::Connectivity { .. } => StatusCode::BAD_GATEWAY,
        PollError::Auth { .. } => StatusCode::UNAUTHORIZED,
        PollError::InvalidEndpoint { .. } => StatusCode::BAD_REQUEST,
    }
}

/// Один цикл опроса для цели из тела запроса
pub async fn poll<C: Connector + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Json(profile): Json<PrinterProfile>,
) -> Response {
    let endpoint = match profile.to_endpoint(&state.settings.community) {
        Ok(endpoint) => endpoint,
        Err(err) => {
            debug!(error = %err, "цель опроса отклонена");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid_endpoint", "message": err.to_string() })),
            )
                .into_response();
        }
    };

    match SnmpCollector::poll_once(&state.connector, &endpoint, state.settings.call_policy()).await {
        Ok(snapshot) => Json(JsonFormatter::format_snapshot(&snapshot)).into_response(),
        Err(err) => (status_for(&err), Json(JsonFormatter::format_failure(&err))).into_response(),
    }
}
