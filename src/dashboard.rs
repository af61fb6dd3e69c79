//! Dashboard cards built from the current-hour snapshot
//!
//! Values are rounded to whole numbers. Anything missing or non-finite shows
//! the placeholder instead of a number.

use serde::{Deserialize, Serialize};

use crate::models::{HourSnapshot, NormalizedForecast};
use crate::weather::weather_code_to_description;

/// Shown in place of a value that is missing or not a number
pub const PLACEHOLDER: &str = "--";

/// A single metric card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeatherCard {
    pub icon: String,
    pub value: String,
    pub unit: String,
    pub label: String,
}

/// Card layout: one large card, a row of two, a grid of six
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardCards {
    /// Time of the snapshot the cards were built from
    pub time: Option<String>,
    /// Condition text from the WMO weather code, when one was returned
    pub condition: Option<String>,
    pub top: WeatherCard,
    pub row: Vec<WeatherCard>,
    pub grid: Vec<WeatherCard>,
}

impl DashboardCards {
    /// Cards for the forecast's current hour, all placeholders without one
    #[must_use]
    pub fn from_forecast(forecast: Option<&NormalizedForecast>) -> Self {
        let empty = HourSnapshot::default();
        Self::from_snapshot(forecast.map_or(&empty, |f| &f.current))
    }

    #[must_use]
    pub fn from_snapshot(now: &HourSnapshot) -> Self {
        Self {
            time: now.time.clone(),
            condition: now
                .weather_code
                .and_then(wmo_code)
                .map(|code| weather_code_to_description(code).to_string()),
            top: card("🌡️", now.temperature, "°c", "Temperature"),
            row: vec![
                card("💧", now.humidity, "%", "Humidity"),
                card("💨", now.wind_speed, "km/h", "Wind Speed"),
            ],
            grid: vec![
                card("👁️", now.visibility.map(|m| m / 1000.0), "km", "Visibility"),
                card("🔽", now.pressure, "hPa", "Pressure"),
                card("☁️", now.cloud_cover, "%", "Cloud Cover"),
                card("☀️", now.uv_index, "", "UV Index"),
                card("🌧️", now.precipitation_probability, "%", "Rain Chance"),
                card("🌬️", now.apparent_temperature, "°c", "Feels Like"),
            ],
        }
    }
}

fn card(icon: &str, value: Option<f64>, unit: &str, label: &str) -> WeatherCard {
    WeatherCard {
        icon: icon.to_string(),
        value: format_value(value),
        unit: unit.to_string(),
        label: label.to_string(),
    }
}

/// Whole-number display value or [`PLACEHOLDER`]
#[must_use]
pub fn format_value(value: Option<f64>) -> String {
    match value {
        // + 0.0 turns -0 into 0
        Some(v) if v.is_finite() => format!("{:.0}", v.round() + 0.0),
        _ => PLACEHOLDER.to_string(),
    }
}

fn wmo_code(code: f64) -> Option<u8> {
    if code.is_finite() && (0.0..=255.0).contains(&code) {
        Some(code as u8)
    } else {
        None
    }
}
