//! Error types for bond screening operations

use thiserror::Error;

/// Bond screener errors
#[derive(Debug, Error)]
pub enum ScreenerError {
    /// Network failure, timeout, non-2xx status or undecodable body
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Response is valid JSON but lacks the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for screener operations
pub type Result<T> = std::result::Result<T, ScreenerError>;

impl From<reqwest::Error> for ScreenerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScreenerError::Fetch(format!("request timed out: {err}"))
        } else {
            ScreenerError::Fetch(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ScreenerError {
    fn from(err: serde_json::Error) -> Self {
        ScreenerError::Fetch(format!("malformed JSON: {err}"))
    }
}

impl From<bot_utils::EnvError> for ScreenerError {
    fn from(err: bot_utils::EnvError) -> Self {
        ScreenerError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScreenerError::Parse("missing 'securities' block".to_string());
        assert_eq!(err.to_string(), "Parse error: missing 'securities' block");

        let err = ScreenerError::Fetch("HTTP 503".to_string());
        assert_eq!(err.to_string(), "Fetch error: HTTP 503");
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ScreenerError = json_err.into();

        match err {
            ScreenerError::Fetch(msg) => assert!(msg.contains("malformed JSON")),
            other => panic!("Expected Fetch variant, got {other:?}"),
        }
    }
}
