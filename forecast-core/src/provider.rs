use crate::{Config, ForecastError, UpstreamForecast, ZipCode, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of raw 3-hourly forecast data for a zip code.
///
/// Implementations make at most one upstream call per `fetch` and never retry.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Fetch raw samples and location metadata for `zip`.
    ///
    /// A missing or blank `api_key` fails with [`ForecastError::Configuration`]
    /// before any network traffic.
    async fn fetch(
        &self,
        zip: &ZipCode,
        api_key: Option<&str>,
    ) -> Result<UpstreamForecast, ForecastError>;
}

/// Construct the upstream provider described by `config`.
///
/// The API key is not required here; its absence is reported per request.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let provider = OpenWeatherProvider::with_url(config.upstream_url.as_str())?;
    Ok(Box::new(provider))
}
