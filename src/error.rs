//! Error types and handling for the weather dashboard

use thiserror::Error;

/// Main error type for the weather dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream forecast API errors (transport, status, upstream reason)
    #[error("API error: {message}")]
    Api { message: String },

    /// Response bodies that could not be decoded
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Persisted key-value storage errors
    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DashboardError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Whether the error came from talking to the forecast provider
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Parse { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            DashboardError::Api { .. } => {
                "Unable to reach the weather service. Please check your internet connection."
                    .to_string()
            }
            DashboardError::Parse { .. } => {
                "The weather service returned data that could not be read.".to_string()
            }
            DashboardError::Storage { .. } => {
                "Saved coordinates could not be accessed. Please check the storage directory."
                    .to_string()
            }
        }
    }
}
