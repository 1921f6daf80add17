//! Route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use forecast_core::{ForecastError, ForecastResult, provider::openweather::UPSTREAM_TIMEOUT};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Daily forecast for a US zip code.
///
/// # Endpoint
///
/// `GET /forecast/{zip_code}`
///
/// # Response Codes
///
/// - **200 OK**: up to 10 daily summaries, earliest first
/// - **400 Bad Request**: not a 5-digit zip code
/// - **404 Not Found**: upstream does not know the zip code
/// - **500 Internal Server Error**: API key missing or rejected upstream
/// - **503 Service Unavailable**: upstream timed out, failed or unreachable
#[tracing::instrument(name = "forecast", skip(state))]
pub async fn forecast_handler(
    State(state): State<AppState>,
    Path(zip_code): Path<String>,
) -> Result<Json<ForecastResult>, ApiError> {
    tracing::info!("Forecast request received");

    match state.service.get_forecast(&zip_code, state.api_key()).await {
        Ok(result) => {
            tracing::info!(
                location = %result.location,
                country = %result.country,
                forecast_days = result.forecast.len(),
                "Successfully retrieved forecast"
            );
            Ok(Json(result))
        }
        Err(err) => {
            log_failure(&err);
            Err(ApiError(err))
        }
    }
}

fn log_failure(err: &ForecastError) {
    let error_type = err.kind();
    let http_status_code = err.upstream_status();

    match err {
        ForecastError::Validation { .. } => {
            tracing::warn!(error_type, "Invalid zip code format");
        }
        ForecastError::UpstreamNotFound { .. } => {
            tracing::warn!(error_type, ?http_status_code, "Zip code not found upstream");
        }
        ForecastError::Configuration { .. } => {
            tracing::error!(error_type, "Weather API key not configured");
        }
        ForecastError::UpstreamAuth { .. } => {
            tracing::error!(error_type, ?http_status_code, "Upstream rejected the API key");
        }
        ForecastError::UpstreamTimeout { .. } => {
            tracing::error!(
                error_type,
                timeout_seconds = UPSTREAM_TIMEOUT.as_secs(),
                "Timeout calling upstream forecast API"
            );
        }
        ForecastError::UpstreamUnavailable { .. } => {
            tracing::error!(error_type, ?http_status_code, "Upstream forecast API unavailable");
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub api_key_configured: bool,
}

/// `GET /health`: liveness plus whether forecasts can be served at all.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        api_key_configured: state.api_key().is_some(),
    })
}
