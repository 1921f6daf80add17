//! Core library for the zip-code forecast service.
//!
//! This crate defines:
//! - Zip code validation
//! - The upstream forecast provider abstraction and its OpenWeatherMap client
//! - Aggregation of 3-hourly samples into daily summaries
//! - The service that ties them together, plus configuration handling
//!
//! It has no HTTP-server or logging dependency; `forecast-server` renders
//! results and instruments them.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;
pub mod zip;

pub use aggregate::{aggregate, aggregate_in};
pub use config::Config;
pub use error::ForecastError;
pub use model::{DailySummary, ForecastResult, RawSample, UpstreamForecast};
pub use provider::{ForecastProvider, provider_from_config};
pub use service::{FORECAST_DAYS, ForecastService};
pub use zip::ZipCode;
