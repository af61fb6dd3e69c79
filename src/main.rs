use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use weatherdash::api::AppState;
use weatherdash::{
    Coordinate, CoordinateStore, DashboardConfig, DashboardError, FjallStore, ForecastService,
    OpenMeteoClient, SystemClock, telemetry, web,
};

/// Weather dashboard backend
#[derive(Parser)]
#[command(name = "weatherdash")]
#[command(author, version, about = "Weather dashboard backend for Open-Meteo forecasts", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, env = "WEATHERDASH_CONFIG")]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard API (default)
    Serve {
        /// Port to listen on, overrides the config
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Fetch and print one normalized forecast as JSON
    Forecast,

    /// Show or change the saved coordinates
    Coordinates {
        #[command(subcommand)]
        action: CoordinateAction,
    },
}

#[derive(Subcommand)]
enum CoordinateAction {
    /// Print the saved coordinates
    Show,
    /// Save new coordinates and refresh the forecast
    Set {
        #[arg(allow_hyphen_values = true)]
        latitude: f64,
        #[arg(allow_hyphen_values = true)]
        longitude: f64,
    },
}

fn build_service(config: &DashboardConfig) -> Result<ForecastService> {
    let store = FjallStore::open(&config.storage.location).with_context(|| {
        format!("Failed to open storage at {}", config.storage.location)
    })?;
    let coordinates = CoordinateStore::with_fallback(
        Arc::new(store),
        Coordinate::new(config.defaults.latitude, config.defaults.longitude),
    );
    let source = OpenMeteoClient::new(config.weather.clone())?;
    let clock = SystemClock::new(config.clock_timezone()?);

    Ok(ForecastService::new(
        coordinates,
        Arc::new(source),
        Arc::new(clock),
    ))
}

/// Human-facing text for failures that carry a [`DashboardError`]
fn user_facing_message(err: &anyhow::Error) -> Option<String> {
    err.downcast_ref::<DashboardError>()
        .map(DashboardError::user_message)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = run(cli).await;
    if let Some(message) = result.as_ref().err().and_then(user_facing_message) {
        eprintln!("{message}");
    }
    result
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = DashboardConfig::load_from_path(cli.config.clone())?;
    telemetry::init(&config.logging, cli.verbose)?;
    tracing::info!("WeatherDash v{} starting", weatherdash::VERSION);

    let service = build_service(&config)?;

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let state = AppState {
                service: Arc::new(service),
            };
            // warm up so the first page load has data
            let _ = state.service.refresh().await;
            web::run(&config.server, state).await?;
        }
        Commands::Forecast => {
            let forecast = service.orchestrate().await?;
            println!("{}", serde_json::to_string_pretty(&forecast)?);
        }
        Commands::Coordinates { action } => match action {
            CoordinateAction::Show => {
                let coordinate = service.coordinates().await?;
                println!("{}", coordinate.format_coordinates());
            }
            CoordinateAction::Set {
                latitude,
                longitude,
            } => {
                let coordinate = Coordinate::new(latitude, longitude);
                match service.save_coordinates(coordinate).await? {
                    Some(forecast) => println!(
                        "Saved {}; current temperature {}",
                        coordinate.format_coordinates(),
                        weatherdash::dashboard::format_value(forecast.current.temperature)
                    ),
                    None => println!(
                        "Saved {}; forecast could not be refreshed",
                        coordinate.format_coordinates()
                    ),
                }
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_message_through_context() {
        let err = anyhow::Error::from(DashboardError::storage("lock held"))
            .context("Failed to open storage at /tmp/x");
        let message = user_facing_message(&err).unwrap();
        assert!(message.contains("storage directory"));
    }

    #[test]
    fn test_user_facing_message_for_other_errors() {
        let err = anyhow::anyhow!("plain failure");
        assert!(user_facing_message(&err).is_none());
    }
}
