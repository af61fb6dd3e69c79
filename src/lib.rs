//! `WeatherDash` - backend for a single-page weather dashboard
//!
//! Fetches Open-Meteo forecasts for a saved coordinate pair, normalizes the
//! hour-indexed response into a current-hour snapshot plus an hourly series,
//! and serves both as JSON together with ready-to-render dashboard cards.

pub mod api;
pub mod config;
pub mod coordinates;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod normalize;
pub mod service;
pub mod storage;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::DashboardConfig;
pub use coordinates::CoordinateStore;
pub use dashboard::{DashboardCards, WeatherCard};
pub use error::DashboardError;
pub use models::{Coordinate, HourSnapshot, NormalizedForecast, RawForecast};
pub use normalize::normalize;
pub use service::{Clock, FixedClock, ForecastService, SystemClock};
pub use storage::{FjallStore, KeyValueStore, MemoryStore};
pub use weather::{ForecastSource, OpenMeteoClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DashboardError>;
