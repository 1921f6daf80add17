use thiserror::Error;

/// Every way a forecast request can fail.
///
/// The set is closed: the HTTP layer matches it exhaustively through
/// [`ForecastError::status_code`] and [`ForecastError::kind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForecastError {
    /// The caller supplied something that is not a 5-digit zip code.
    #[error("Invalid zip code format. Please provide a 5-digit US zip code.")]
    Validation { input: String },

    /// No upstream API key is configured for this deployment.
    #[error(
        "Weather API key is not configured. Please set OPENWEATHERMAP_API_KEY environment variable."
    )]
    Configuration { zip_code: String },

    /// Upstream did not answer within the 10-second cutoff.
    #[error("Weather service request timed out. Please try again later.")]
    UpstreamTimeout { zip_code: String },

    /// Upstream rejected our credentials (HTTP 401).
    #[error("Invalid weather API key configuration.")]
    UpstreamAuth { zip_code: String, status: u16 },

    /// Upstream does not know this zip code (HTTP 404).
    #[error("Weather data not found for zip code: {zip_code}")]
    UpstreamNotFound { zip_code: String, status: u16 },

    /// Any other non-2xx status, a connection failure, or an undecodable body.
    /// `status` is `None` when no HTTP response was received.
    #[error("{}", unavailable_message(.status))]
    UpstreamUnavailable {
        zip_code: String,
        status: Option<u16>,
    },
}

fn unavailable_message(status: &Option<u16>) -> &'static str {
    match status {
        Some(_) => "Weather service is currently unavailable. Please try again later.",
        None => "Unable to connect to weather service. Please try again later.",
    }
}

impl ForecastError {
    /// HTTP status the caller should see for this outcome.
    pub fn status_code(&self) -> u16 {
        match self {
            ForecastError::Validation { .. } => 400,
            ForecastError::Configuration { .. } => 500,
            ForecastError::UpstreamAuth { .. } => 500,
            ForecastError::UpstreamNotFound { .. } => 404,
            ForecastError::UpstreamTimeout { .. } => 503,
            ForecastError::UpstreamUnavailable { .. } => 503,
        }
    }

    /// Short machine-readable tag, used as the `code` of error bodies and
    /// the `error_type` of log records.
    pub fn kind(&self) -> &'static str {
        match self {
            ForecastError::Validation { .. } => "validation_error",
            ForecastError::Configuration { .. } => "configuration_error",
            ForecastError::UpstreamTimeout { .. } => "timeout",
            ForecastError::UpstreamAuth { .. } => "authentication_error",
            ForecastError::UpstreamNotFound { .. } => "not_found",
            ForecastError::UpstreamUnavailable { .. } => "upstream_unavailable",
        }
    }

    /// The zip code (or raw input, for validation failures) the error refers to.
    pub fn zip_code(&self) -> &str {
        match self {
            ForecastError::Validation { input } => input,
            ForecastError::Configuration { zip_code }
            | ForecastError::UpstreamTimeout { zip_code }
            | ForecastError::UpstreamAuth { zip_code, .. }
            | ForecastError::UpstreamNotFound { zip_code, .. }
            | ForecastError::UpstreamUnavailable { zip_code, .. } => zip_code,
        }
    }

    /// Upstream HTTP status, when one was received.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ForecastError::UpstreamAuth { status, .. }
            | ForecastError::UpstreamNotFound { status, .. } => Some(*status),
            ForecastError::UpstreamUnavailable { status, .. } => *status,
            _ => None,
        }
    }
}
