use axum::{Router, routing::get};

use crate::handlers::{forecast_handler, health_handler};
use crate::middleware::trace_layer;
use crate::state::AppState;

/// - `GET /forecast/{zip_code}` - daily forecast for a US zip code
/// - `GET /health`              - liveness and configuration check
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/forecast/{zip_code}", get(forecast_handler))
        .route("/health", get(health_handler))
        .layer(trace_layer())
        .with_state(state)
}
