//! Coordinate model for the forecast location

use std::fmt;

use serde::{Deserialize, Serialize};

/// Latitude used until the user saves their own coordinates
pub const DEFAULT_LATITUDE: f64 = 55.60;
/// Longitude used until the user saves their own coordinates
pub const DEFAULT_LONGITUDE: f64 = 13.00;

/// Forecast location in decimal degrees.
///
/// No range validation happens here. Values outside -90..=90 / -180..=180 and
/// NaN are carried through as-is and handed to the forecast provider.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite numbers
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Format coordinate as a short display string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
