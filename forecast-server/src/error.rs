use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use forecast_core::ForecastError;
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

/// HTTP rendering of a [`ForecastError`].
#[derive(Debug)]
pub struct ApiError(pub ForecastError);

impl From<ForecastError> for ApiError {
    fn from(err: ForecastError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = ErrorBody {
            error: self.0.to_string(),
            code: self.0.kind(),
        };

        (status, Json(body)).into_response()
    }
}
