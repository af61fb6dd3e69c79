//! Forecast orchestration
//!
//! One refresh is a read → fetch → normalize cycle. The last successful
//! result is published on a watch channel so renderers can follow updates;
//! a failed refresh leaves the published state alone.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use chrono_tz::Tz;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::coordinates::CoordinateStore;
use crate::models::{Coordinate, NormalizedForecast};
use crate::normalize::normalize;
use crate::weather::ForecastSource;

/// Wall-clock time the current hour is matched against
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Real time, in `timezone` when given and host local time otherwise
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    timezone: Option<Tz>,
}

impl SystemClock {
    #[must_use]
    pub fn new(timezone: Option<Tz>) -> Self {
        Self { timezone }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        match self.timezone {
            Some(tz) => Utc::now().with_timezone(&tz).naive_local(),
            None => Local::now().naive_local(),
        }
    }
}

/// Clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// What the dashboard currently shows
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Coordinate the forecast was fetched for
    pub coordinate: Option<Coordinate>,
    /// Latest normalized forecast, `None` until the first successful refresh
    pub forecast: Option<Arc<NormalizedForecast>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Number of the refresh that produced this state, 0 before the first
    pub generation: u64,
}

/// Runs the forecast pipeline and tracks the latest result
pub struct ForecastService {
    coordinates: CoordinateStore,
    source: Arc<dyn ForecastSource>,
    clock: Arc<dyn Clock>,
    state: watch::Sender<DashboardState>,
    generation: AtomicU64,
}

impl ForecastService {
    pub fn new(
        coordinates: CoordinateStore,
        source: Arc<dyn ForecastSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self {
            coordinates,
            source,
            clock,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Read coordinates, fetch, normalize. Publishes nothing.
    #[instrument(skip(self))]
    pub async fn orchestrate(&self) -> Result<NormalizedForecast> {
        self.fetch_normalized().await.map(|(_, forecast)| forecast)
    }

    async fn fetch_normalized(&self) -> Result<(Coordinate, NormalizedForecast)> {
        let coordinate = self.coordinates.read().await?;
        let raw = self.source.fetch_raw(coordinate).await?;
        let forecast = normalize(&raw, self.clock.now());
        debug!(
            hours = forecast.hourly.len(),
            "Normalized forecast for {}", coordinate
        );
        Ok((coordinate, forecast))
    }

    /// Run the pipeline and publish the result.
    ///
    /// On failure the error is logged and returned, and the previously
    /// published state stays in place. A refresh that finishes after a newer
    /// one has started is returned to its caller but not published.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Arc<NormalizedForecast>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let (coordinate, forecast) = match self.fetch_normalized().await {
            Ok(result) => result,
            Err(e) => {
                warn!("Forecast refresh failed, keeping previous state: {}", e);
                return Err(e);
            }
        };
        let forecast = Arc::new(forecast);

        // Checked under the channel lock so a newer refresh cannot publish in
        // between the check and the write.
        let published = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation
                || state.generation > generation
            {
                return false;
            }
            *state = DashboardState {
                coordinate: Some(coordinate),
                forecast: Some(Arc::clone(&forecast)),
                updated_at: Some(Utc::now()),
                generation,
            };
            true
        });
        if !published {
            debug!("Refresh superseded by a newer one, not publishing");
        }
        Ok(forecast)
    }

    /// Persist new coordinates and re-run the pipeline for them.
    ///
    /// Returns `Ok(None)` when the coordinates were saved but the refresh
    /// failed; the failure is already logged by [`Self::refresh`].
    #[instrument(skip(self))]
    pub async fn save_coordinates(
        &self,
        coordinate: Coordinate,
    ) -> Result<Option<Arc<NormalizedForecast>>> {
        self.coordinates.write(coordinate).await?;
        info!("Coordinates changed to {}, refreshing forecast", coordinate);
        Ok(self.refresh().await.ok())
    }

    pub async fn coordinates(&self) -> Result<Coordinate> {
        self.coordinates.read().await
    }

    /// Last published forecast
    #[must_use]
    pub fn latest(&self) -> Option<Arc<NormalizedForecast>> {
        self.state.borrow().forecast.clone()
    }

    /// Follow published state changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }
}
