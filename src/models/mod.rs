//! Data models for the weather dashboard
//!
//! This module contains the core domain models organized by concern:
//! - Coordinate: the persisted forecast location
//! - Forecast: raw Open-Meteo response structures
//! - Snapshot: the normalized forecast handed to the dashboard

pub mod coordinate;
pub mod forecast;
pub mod snapshot;

// Re-export all public types for convenient access
pub use coordinate::Coordinate;
pub use forecast::{CurrentData, DailyData, HourlyData, RawForecast};
pub use snapshot::{DailySummary, HourSnapshot, NormalizedForecast};
