#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{Local, TimeZone};
use forecast_core::{ForecastService, provider::openweather::OpenWeatherProvider};
use forecast_server::{AppState, app_router};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const FORECAST_PATH: &str = "/data/2.5/forecast";

/// Test server whose provider points at `upstream`.
pub fn create_test_server(upstream: &MockServer, api_key: Option<&str>) -> TestServer {
    let provider =
        OpenWeatherProvider::with_url(format!("{}{}", upstream.uri(), FORECAST_PATH)).unwrap();
    let state = AppState::new(ForecastService::new(Box::new(provider)), api_key);

    TestServer::new(app_router(state)).unwrap()
}

/// Upstream payload with 8 entries per day for `days` days, starting at
/// local midnight on 2024-07-04.
pub fn upstream_payload(days: i64) -> Value {
    let start = Local
        .with_ymd_and_hms(2024, 7, 4, 0, 0, 0)
        .single()
        .expect("unambiguous local midnight")
        .timestamp();

    let list: Vec<Value> = (0..days * 8)
        .map(|i| {
            json!({
                "dt": start + i * 3 * 3600,
                "main": {"temp": 60.0 + i as f64, "humidity": 50},
                "weather": [{"main": "Clear", "description": "clear sky"}],
                "wind": {"speed": 4.0}
            })
        })
        .collect();

    json!({
        "cod": "200",
        "city": {"name": "Beverly Hills", "country": "US"},
        "list": list
    })
}
