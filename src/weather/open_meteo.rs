//! Open-Meteo forecast client
//!
//! No API key is required. Transient failures are retried only when
//! `weather.max_retries` is above zero.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::ForecastSource;
use crate::config::WeatherConfig;
use crate::models::{Coordinate, RawForecast};
use crate::{DashboardError, Result};

/// Error body Open-Meteo sends with 4xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    reason: String,
}

/// HTTP client for the Open-Meteo forecast endpoint
pub struct OpenMeteoClient {
    client: ClientWithMiddleware,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new client
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("weatherdash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DashboardError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { client, config })
    }

    /// Request URL for `coordinate`.
    ///
    /// Coordinates are written with `Display`, so a NaN component reaches the
    /// provider as the literal `NaN`.
    #[must_use]
    pub fn build_forecast_url(&self, coordinate: Coordinate) -> String {
        let mut url = format!(
            "{}/forecast?latitude={}&longitude={}",
            self.config.base_url.trim_end_matches('/'),
            coordinate.latitude,
            coordinate.longitude
        );

        for (name, metrics) in [
            ("hourly", &self.config.hourly),
            ("current", &self.config.current),
            ("daily", &self.config.daily),
        ] {
            if !metrics.is_empty() {
                url.push_str(&format!("&{name}={}", metrics.join(",")));
            }
        }

        if let Some(timezone) = &self.config.timezone {
            url.push_str(&format!("&timezone={}", urlencoding::encode(timezone)));
        }
        if let Some(days) = self.config.forecast_days {
            url.push_str(&format!("&forecast_days={days}"));
        }
        url
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn fetch_raw(&self, coordinate: Coordinate) -> Result<RawForecast> {
        let url = self.build_forecast_url(coordinate);
        debug!("Open-Meteo request URL: {}", url);
        let start_time = Instant::now();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DashboardError::api(format!("Forecast request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.reason)
                .unwrap_or(body);
            warn!(%status, "Open-Meteo rejected forecast request: {}", reason);
            return Err(DashboardError::api(format!("{status}: {reason}")));
        }

        let raw: RawForecast = response
            .json()
            .await
            .map_err(|e| DashboardError::parse(format!("Invalid Open-Meteo response: {e}")))?;

        let total_duration = start_time.elapsed();
        info!(
            "Retrieved forecast for {} in {:.3}s",
            coordinate,
            total_duration.as_secs_f64()
        );
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow API response detected: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(config: WeatherConfig) -> OpenMeteoClient {
        OpenMeteoClient::new(config).unwrap()
    }

    #[test]
    fn test_default_url() {
        let url = client(WeatherConfig::default()).build_forecast_url(Coordinate::new(55.6, 13.0));
        assert_eq!(
            url,
            "https://api.open-meteo.com/v1/forecast?latitude=55.6&longitude=13\
             &hourly=temperature_2m,rain,cloud_cover,uv_index,direct_radiation,snowfall,apparent_temperature\
             &timezone=auto"
        );
    }

    #[test]
    fn test_url_with_all_blocks() {
        let config = WeatherConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            hourly: vec!["temperature_2m".to_string()],
            current: vec!["temperature_2m".to_string(), "weather_code".to_string()],
            daily: vec!["sunrise".to_string(), "sunset".to_string()],
            timezone: Some("Europe/Stockholm".to_string()),
            forecast_days: Some(3),
            ..Default::default()
        };

        let url = client(config).build_forecast_url(Coordinate::new(59.33, 18.07));
        assert_eq!(
            url,
            "http://localhost:8080/v1/forecast?latitude=59.33&longitude=18.07\
             &hourly=temperature_2m&current=temperature_2m,weather_code&daily=sunrise,sunset\
             &timezone=Europe%2FStockholm&forecast_days=3"
        );
    }

    #[test]
    fn test_url_without_timezone_and_nan_coordinate() {
        let config = WeatherConfig {
            timezone: None,
            hourly: vec!["rain".to_string()],
            ..Default::default()
        };

        let url = client(config).build_forecast_url(Coordinate::new(f64::NAN, 200.0));
        assert!(url.contains("latitude=NaN&longitude=200&hourly=rain"));
        assert!(!url.contains("timezone"));
    }
}
