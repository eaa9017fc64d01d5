//! Error types for weather requests

use thiserror::Error;

/// Weather bot errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The API answered with a non-success status
    #[error("HTTP error: {0}")]
    Status(u16),

    /// Network failure or timeout
    #[error("Request error: {0}")]
    Request(String),

    /// Body is not the expected JSON shape
    #[error("Payload error: {0}")]
    Payload(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for weather operations
pub type Result<T> = std::result::Result<T, WeatherError>;

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            WeatherError::Payload(err.to_string())
        } else {
            WeatherError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Payload(err.to_string())
    }
}

impl From<bot_utils::EnvError> for WeatherError {
    fn from(err: bot_utils::EnvError) -> Self {
        WeatherError::Config(err.to_string())
    }
}
