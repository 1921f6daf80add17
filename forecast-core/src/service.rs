use crate::{
    aggregate::aggregate,
    error::ForecastError,
    model::ForecastResult,
    provider::ForecastProvider,
    zip::ZipCode,
};

/// How many calendar days a forecast covers at most.
pub const FORECAST_DAYS: usize = 10;

/// Validate, fetch, aggregate, assemble.
///
/// Holds no mutable state, so one instance can serve concurrent requests.
#[derive(Debug)]
pub struct ForecastService {
    provider: Box<dyn ForecastProvider>,
}

impl ForecastService {
    pub fn new(provider: Box<dyn ForecastProvider>) -> Self {
        Self { provider }
    }

    /// Produce the daily forecast for `raw_zip`.
    ///
    /// Errors from validation or the provider are returned as-is.
    pub async fn get_forecast(
        &self,
        raw_zip: &str,
        api_key: Option<&str>,
    ) -> Result<ForecastResult, ForecastError> {
        let zip = ZipCode::parse(raw_zip)?;
        let upstream = self.provider.fetch(&zip, api_key).await?;
        let forecast = aggregate(&upstream.samples, FORECAST_DAYS);

        Ok(ForecastResult {
            zip_code: zip,
            location: upstream.location,
            country: upstream.country,
            forecast,
        })
    }
}
