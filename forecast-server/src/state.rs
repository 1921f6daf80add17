use std::sync::Arc;

use forecast_core::{Config, ForecastService, provider_from_config};

/// Shared, read-only request state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<ForecastService>,
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(service: ForecastService, api_key: Option<&str>) -> Self {
        Self {
            service: Arc::new(service),
            api_key: api_key.map(Arc::from),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider = provider_from_config(config)?;
        Ok(Self::new(ForecastService::new(provider), config.api_key()))
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}
