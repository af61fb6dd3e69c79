//! Persisted forecast coordinates
//!
//! Latitude and longitude are kept as two text entries so the stored values
//! look exactly like what the user typed. Nothing is validated: text that is
//! not a number reads back as NaN rather than falling back to the default.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::models::Coordinate;
use crate::storage::KeyValueStore;

/// Storage key for the latitude text
pub const LATITUDE_KEY: &str = "Latitude";
/// Storage key for the longitude text
pub const LONGITUDE_KEY: &str = "Longitude";

/// Reads and writes the user's coordinates through a [`KeyValueStore`]
#[derive(Clone)]
pub struct CoordinateStore {
    store: Arc<dyn KeyValueStore>,
    fallback: Coordinate,
}

impl CoordinateStore {
    /// Store falling back to (55.60, 13.00) for missing entries
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_fallback(store, Coordinate::default())
    }

    pub fn with_fallback(store: Arc<dyn KeyValueStore>, fallback: Coordinate) -> Self {
        Self { store, fallback }
    }

    /// Saved coordinate, with each missing component replaced by the fallback
    #[instrument(skip(self))]
    pub async fn read(&self) -> Result<Coordinate> {
        let latitude = self.store.get(LATITUDE_KEY).await?;
        let longitude = self.store.get(LONGITUDE_KEY).await?;

        let coordinate = Coordinate::new(
            latitude.map_or(self.fallback.latitude, |text| parse_degrees(&text)),
            longitude.map_or(self.fallback.longitude, |text| parse_degrees(&text)),
        );
        if coordinate.is_numeric() {
            debug!("Read coordinates {}", coordinate);
        } else {
            warn!("Saved coordinates are not numeric: {}", coordinate);
        }
        Ok(coordinate)
    }

    /// Overwrite both saved components
    #[instrument(skip(self))]
    pub async fn write(&self, coordinate: Coordinate) -> Result<()> {
        self.store
            .put(LATITUDE_KEY, coordinate.latitude.to_string())
            .await?;
        self.store
            .put(LONGITUDE_KEY, coordinate.longitude.to_string())
            .await?;
        info!("Saved coordinates {}", coordinate);
        Ok(())
    }
}

/// Decimal degrees from stored text; anything unparsable becomes NaN
#[must_use]
pub fn parse_degrees(text: &str) -> f64 {
    text.trim().parse().unwrap_or(f64::NAN)
}
