//! Open-Meteo forecast response structures
//!
//! These mirror the wire format of `GET /v1/forecast`. Hourly and daily blocks
//! are parallel arrays indexed by time step. Every metric is optional because
//! only the requested ones come back, and every value is optional because the
//! API reports gaps as `null`.

use serde::{Deserialize, Serialize};

/// One metric column of a parallel-array block
pub type Series = Option<Vec<Option<f64>>>;

/// Value of `series` at `index`, absent when the column is missing, too short,
/// or holds `null` there
#[must_use]
pub fn value_at(series: &Series, index: usize) -> Option<f64> {
    series.as_ref()?.get(index).copied().flatten()
}

/// Forecast response from the Open-Meteo API
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RawForecast {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    pub utc_offset_seconds: Option<i32>,
    pub hourly: Option<HourlyData>,
    pub current: Option<CurrentData>,
    pub daily: Option<DailyData>,
}

/// Hour-indexed weather data
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct HourlyData {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m")]
    pub temperature: Series,
    pub rain: Series,
    pub cloud_cover: Series,
    pub uv_index: Series,
    pub direct_radiation: Series,
    pub snowfall: Series,
    pub apparent_temperature: Series,
    #[serde(rename = "relative_humidity_2m")]
    pub humidity: Series,
    #[serde(rename = "surface_pressure", alias = "pressure_msl")]
    pub pressure: Series,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: Series,
    pub visibility: Series,
    pub precipitation: Series,
    pub precipitation_probability: Series,
    pub weather_code: Series,
}

impl HourlyData {
    /// Number of hours, as given by the `time` column
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Conditions for the current moment, present when `current=` was requested
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CurrentData {
    pub time: Option<String>,
    #[serde(rename = "temperature_2m")]
    pub temperature: Option<f64>,
    pub rain: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub uv_index: Option<f64>,
    pub direct_radiation: Option<f64>,
    pub snowfall: Option<f64>,
    pub apparent_temperature: Option<f64>,
    #[serde(rename = "relative_humidity_2m")]
    pub humidity: Option<f64>,
    #[serde(rename = "surface_pressure", alias = "pressure_msl")]
    pub pressure: Option<f64>,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: Option<f64>,
    pub visibility: Option<f64>,
    pub precipitation: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub weather_code: Option<f64>,
}

/// Day-indexed weather data
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DailyData {
    #[serde(default)]
    pub time: Vec<String>,
    pub sunrise: Option<Vec<Option<String>>>,
    pub sunset: Option<Vec<Option<String>>>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Series,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Series,
    pub uv_index_max: Series,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_at_handles_gaps() {
        let series: Series = Some(vec![Some(1.5), None]);
        assert_eq!(value_at(&series, 0), Some(1.5));
        assert_eq!(value_at(&series, 1), None);
        assert_eq!(value_at(&series, 2), None);
        assert_eq!(value_at(&None, 0), None);
    }

    #[test]
    fn test_parse_open_meteo_hourly_response() {
        let body = r#"{
            "latitude": 55.6,
            "longitude": 13.0,
            "generationtime_ms": 0.05,
            "utc_offset_seconds": 3600,
            "timezone": "Europe/Stockholm",
            "hourly_units": { "time": "iso8601", "temperature_2m": "°C" },
            "hourly": {
                "time": ["2024-01-01T00:00", "2024-01-01T01:00"],
                "temperature_2m": [1.2, null],
                "rain": [0.0, 0.1],
                "surface_pressure": [1012.5, 1012.0]
            }
        }"#;

        let raw: RawForecast = serde_json::from_str(body).unwrap();
        let hourly = raw.hourly.unwrap();
        assert_eq!(hourly.len(), 2);
        assert_eq!(value_at(&hourly.temperature, 1), None);
        assert_eq!(value_at(&hourly.pressure, 0), Some(1012.5));
        assert!(hourly.snowfall.is_none());
        assert!(raw.current.is_none());
        assert_eq!(raw.timezone.as_deref(), Some("Europe/Stockholm"));
    }

    #[test]
    fn test_parse_current_and_daily_blocks() {
        let body = r#"{
            "current": { "time": "2024-01-01T10:15", "interval": 900, "temperature_2m": 3.4, "weather_code": 61 },
            "daily": {
                "time": ["2024-01-01"],
                "sunrise": ["2024-01-01T08:36"],
                "sunset": ["2024-01-01T15:45"],
                "temperature_2m_max": [4.0]
            }
        }"#;

        let raw: RawForecast = serde_json::from_str(body).unwrap();
        let current = raw.current.unwrap();
        assert_eq!(current.temperature, Some(3.4));
        assert_eq!(current.weather_code, Some(61.0));
        let daily = raw.daily.unwrap();
        assert_eq!(daily.time, vec!["2024-01-01"]);
        assert!(daily.temperature_min.is_none());
    }
}
