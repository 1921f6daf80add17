//! HTTP surface for the zip-code forecast service.
//!
//! - [`routes`] - router and endpoint table
//! - [`handlers`] - forecast and health handlers
//! - [`error`] - [`forecast_core::ForecastError`] to HTTP response mapping
//! - [`server`] - listener and graceful shutdown
//! - [`logging`] - `tracing` subscriber setup

pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::app_router;
pub use state::AppState;
