use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{Config, ForecastResult, ForecastService, config, provider_from_config};
use forecast_server::{logging, server};
use inquire::{Password, PasswordDisplayMode};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Zip-code weather forecast service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve {
        /// Address to bind; overrides config and HOST.
        #[arg(long)]
        host: Option<String>,

        /// Port to bind; overrides config and PORT.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Store the OpenWeatherMap API key in the config file.
    Configure,

    /// Print the forecast for a zip code.
    Show {
        /// 5-digit US zip code.
        zip_code: String,

        /// Print the raw JSON result instead of a table.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { host, port } => {
                let mut cfg = config::load()?;
                if let Some(host) = host {
                    cfg.host = host;
                }
                if let Some(port) = port {
                    cfg.port = port;
                }
                cfg.validate()?;

                logging::init(&cfg.log_format);
                server::run(cfg).await?;
            }
            Command::Configure => configure()?,
            Command::Show { zip_code, json } => {
                let cfg = config::load()?;
                logging::init(&cfg.log_format);

                let service = ForecastService::new(provider_from_config(&cfg)?);
                let result = service.get_forecast(&zip_code, cfg.api_key()).await?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    print_table(&result);
                }
            }
        }

        Ok(())
    }
}

fn configure() -> anyhow::Result<()> {
    // File values only; environment overrides must not leak into the saved file.
    let mut cfg = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Get one at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    cfg.set_api_key(api_key);
    cfg.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

fn print_table(result: &ForecastResult) {
    println!("{} ({}) - {}", result.location, result.country, result.zip_code);

    if result.forecast.is_empty() {
        println!("No forecast data available.");
        return;
    }

    println!(
        "{:<15} {:>6} {:>6} {:>6} {:>6} {:>6}  {}",
        "Date", "High", "Low", "Avg", "Hum%", "Wind", "Conditions"
    );
    for day in &result.forecast {
        println!(
            "{:<15} {:>6.1} {:>6.1} {:>6.1} {:>6.1} {:>6.1}  {} ({})",
            day.date.format("%a %Y-%m-%d").to_string(),
            day.temperature_high,
            day.temperature_low,
            day.temperature_avg,
            day.humidity,
            day.wind_speed,
            day.description,
            day.condition,
        );
    }
}
