//! Normalized forecast returned to the dashboard

use serde::{Deserialize, Serialize};

/// Weather metrics for a single hour.
///
/// The same record describes the current hour and every hourly entry. A
/// metric the provider did not return (or returned as `null`) stays `None`
/// and is left out of the JSON output.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HourSnapshot {
    /// Local ISO-8601 timestamp as given by the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Air temperature at 2 m in °C
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Rain in mm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain: Option<f64>,
    /// Cloud cover in %
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_cover: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uv_index: Option<f64>,
    /// Direct solar radiation in W/m²
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_radiation: Option<f64>,
    /// Snowfall in cm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snowfall: Option<f64>,
    /// Perceived temperature in °C
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apparent_temperature: Option<f64>,
    /// Relative humidity at 2 m in %
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    /// Surface pressure in hPa
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Wind speed at 10 m in km/h
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    /// Visibility in meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation_probability: Option<f64>,
    /// WMO weather interpretation code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_code: Option<f64>,
}

/// Daily summary, filled only when daily metrics were requested
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DailySummary {
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunrise: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uv_index_max: Option<f64>,
}

/// Current-hour snapshot plus the hourly series after it
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct NormalizedForecast {
    pub current: HourSnapshot,
    pub hourly: Vec<HourSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub daily: Vec<DailySummary>,
}
