use chrono::NaiveDate;
use serde::Serialize;

use crate::zip::ZipCode;

/// One upstream 3-hour forecast record, already in imperial units.
///
/// Optional readings stay `None` when upstream omits them; aggregation decides
/// how to treat the gap.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    /// Start of the window, seconds since the Unix epoch.
    pub timestamp: i64,
    /// Degrees Fahrenheit.
    pub temperature: Option<f64>,
    /// Relative humidity, percent.
    pub humidity: Option<f64>,
    /// Miles per hour; 0 when upstream omits it.
    pub wind_speed: f64,
    pub description: String,
    /// Coarse condition category, e.g. "Rain" or "Clouds".
    pub condition: String,
}

/// What a provider hands back on success.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamForecast {
    pub location: String,
    pub country: String,
    pub samples: Vec<RawSample>,
}

/// One calendar day reduced from its 3-hour samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub temperature_high: f64,
    pub temperature_low: f64,
    pub temperature_avg: f64,
    pub description: String,
    pub condition: String,
    pub humidity: f64,
    pub wind_speed: f64,
}

/// Success payload for a forecast request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    pub zip_code: ZipCode,
    pub location: String,
    pub country: String,
    pub forecast: Vec<DailySummary>,
}
