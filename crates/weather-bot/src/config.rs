//! Location and endpoint configuration

use crate::error::{Result, WeatherError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public Open-Meteo forecast endpoint
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

pub const MOSCOW_LATITUDE: f64 = 55.7558;
pub const MOSCOW_LONGITUDE: f64 = 37.6173;

/// Configuration for weather requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub forecast_url: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Place name in the prepositional case, as in "Погода в Москве"
    pub place: String,
    pub request_timeout: Duration,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            latitude: MOSCOW_LATITUDE,
            longitude: MOSCOW_LONGITUDE,
            place: "Москве".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl WeatherConfig {
    /// Defaults overridden by `WEATHER_*` and `HTTP_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            forecast_url: bot_utils::optional_env("OPEN_METEO_URL")
                .unwrap_or(defaults.forecast_url),
            latitude: bot_utils::env_or("WEATHER_LATITUDE", defaults.latitude)?,
            longitude: bot_utils::env_or("WEATHER_LONGITUDE", defaults.longitude)?,
            place: bot_utils::optional_env("WEATHER_PLACE").unwrap_or(defaults.place),
            request_timeout: Duration::from_secs(bot_utils::env_or(
                "HTTP_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.forecast_url).map_err(|e| {
            WeatherError::Config(format!("invalid forecast URL '{}': {e}", self.forecast_url))
        })?;

        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(WeatherError::Config(format!(
                "latitude {} out of range",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(WeatherError::Config(format!(
                "longitude {} out of range",
                self.longitude
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(WeatherError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
