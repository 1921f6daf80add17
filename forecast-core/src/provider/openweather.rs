use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::{
    error::ForecastError,
    model::{RawSample, UpstreamForecast},
    zip::ZipCode,
};

use super::ForecastProvider;

/// OpenWeatherMap 5-day / 3-hour forecast endpoint.
pub const DEFAULT_FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Hard cutoff for one upstream call.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

const COUNTRY_SUFFIX: &str = "us";
const DEFAULT_LOCATION: &str = "Unknown";
const DEFAULT_COUNTRY: &str = "US";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new() -> reqwest::Result<Self> {
        Self::with_url(DEFAULT_FORECAST_URL)
    }

    /// Point the provider at a different forecast endpoint (proxies, mocks).
    pub fn with_url(url: impl Into<String>) -> reqwest::Result<Self> {
        Self::build(url.into(), UPSTREAM_TIMEOUT)
    }

    #[cfg(test)]
    fn with_timeout(url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        Self::build(url.into(), timeout)
    }

    fn build(url: String, timeout: Duration) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { url, http })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    async fn fetch(
        &self,
        zip: &ZipCode,
        api_key: Option<&str>,
    ) -> Result<UpstreamForecast, ForecastError> {
        let api_key = match api_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => {
                return Err(ForecastError::Configuration { zip_code: zip.to_string() });
            }
        };

        let zip_param = format!("{zip},{COUNTRY_SUFFIX}");

        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("zip", zip_param.as_str()),
                ("appid", api_key),
                ("units", "imperial"),
            ])
            .send()
            .await
            .map_err(|e| classify_transport(&e, zip))?;

        let status = res.status();
        if !status.is_success() {
            return Err(classify_status(status, zip));
        }

        let body = res.text().await.map_err(|e| classify_transport(&e, zip))?;

        let parsed: OwForecastResponse = serde_json::from_str(&body).map_err(|_| {
            ForecastError::UpstreamUnavailable { zip_code: zip.to_string(), status: None }
        })?;

        Ok(parsed.into_forecast())
    }
}

fn classify_status(status: StatusCode, zip: &ZipCode) -> ForecastError {
    let zip_code = zip.to_string();
    match status {
        StatusCode::UNAUTHORIZED => ForecastError::UpstreamAuth { zip_code, status: status.as_u16() },
        StatusCode::NOT_FOUND => {
            ForecastError::UpstreamNotFound { zip_code, status: status.as_u16() }
        }
        other => ForecastError::UpstreamUnavailable { zip_code, status: Some(other.as_u16()) },
    }
}

fn classify_transport(err: &reqwest::Error, zip: &ZipCode) -> ForecastError {
    let zip_code = zip.to_string();
    if err.is_timeout() {
        ForecastError::UpstreamTimeout { zip_code }
    } else {
        ForecastError::UpstreamUnavailable { zip_code, status: err.status().map(|s| s.as_u16()) }
    }
}

// Wire format. Everything but `dt` is optional upstream.

#[derive(Debug, Default, Deserialize)]
struct OwMain {
    temp: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: Option<String>,
    main: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: Option<OwMain>,
    weather: Option<Vec<OwWeather>>,
    wind: Option<OwWind>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: Option<OwCity>,
    list: Option<Vec<OwForecastEntry>>,
}

impl OwForecastEntry {
    fn into_sample(self) -> RawSample {
        let main = self.main.unwrap_or_default();
        let weather = self.weather.and_then(|w| w.into_iter().next());
        let (description, condition) = match weather {
            Some(w) => (w.description.unwrap_or_default(), w.main.unwrap_or_default()),
            None => (String::new(), String::new()),
        };

        RawSample {
            timestamp: self.dt,
            temperature: main.temp,
            humidity: main.humidity,
            wind_speed: self.wind.and_then(|w| w.speed).unwrap_or(0.0),
            description,
            condition,
        }
    }
}

impl OwForecastResponse {
    fn into_forecast(self) -> UpstreamForecast {
        let (name, country) = match self.city {
            Some(city) => (city.name, city.country),
            None => (None, None),
        };

        UpstreamForecast {
            location: name.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            country: country.unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            samples: self
                .list
                .unwrap_or_default()
                .into_iter()
                .map(OwForecastEntry::into_sample)
                .collect(),
        }
    }
}
