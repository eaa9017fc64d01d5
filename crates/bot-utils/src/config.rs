//! Environment configuration helpers

use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// A required variable is not set
    #[error("{0} not set")]
    Missing(String),

    /// A variable is set but does not parse
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: String, value: String },
}

/// Load variables from a `.env` file if one exists
///
/// Returns the path that was loaded, if any.
pub fn load_dotenv() -> Option<std::path::PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(_) => None,
    }
}

/// Read a required variable
pub fn required_env(key: &str) -> Result<String, EnvError> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(EnvError::Missing(key.to_string())),
    }
}

/// Read an optional variable, treating blank values as unset
pub fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Read and parse a variable, falling back to `default` when it is unset
pub fn env_or<T: FromStr>(key: &str, default: T) -> Result<T, EnvError> {
    match optional_env(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, EnvError> {
    raw.trim().parse().map_err(|_| EnvError::Invalid {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value::<usize>("TOP_N", " 15 "), Ok(15));
        assert_eq!(parse_value::<f64>("LAT", "55.75"), Ok(55.75));
    }

    #[test]
    fn test_parse_value_invalid() {
        let err = parse_value::<u64>("TIMEOUT", "ten").unwrap_err();
        assert_eq!(err.to_string(), "TIMEOUT has invalid value \"ten\"");
    }

    #[test]
    fn test_missing_variable() {
        let err = required_env("BOT_UTILS_TEST_SURELY_UNSET_VARIABLE").unwrap_err();
        assert_eq!(err, EnvError::Missing("BOT_UTILS_TEST_SURELY_UNSET_VARIABLE".to_string()));
        assert_eq!(
            env_or("BOT_UTILS_TEST_SURELY_UNSET_VARIABLE", 7_u32),
            Ok(7)
        );
    }
}
