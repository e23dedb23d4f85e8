use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{AppState, discover, health, poll};
use crate::snmp::Connector;

pub fn create_router<C>(state: Arc<AppState<C>>) -> Router
where
    C: Connector + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/poll", post(poll::<C>))
        .route("/discover", post(discover::<C>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
