use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Deserialize;

use super::AppState;
use crate::discovery::DiscoveryOutcome;
use crate::snmp::Connector;

#[derive(Debug, Deserialize)]
pub struct DiscoverRequest {
    pub host: String,
}

/// Адрес от внешнего discovery: проба и дедупликация
pub async fn discover<C: Connector + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Json(request): Json<DiscoverRequest>,
) -> Json<DiscoveryOutcome> {
    Json(state.discovery.handle(&request.host).await)
}
