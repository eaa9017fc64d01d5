//! Open-Meteo API client

use crate::config::WeatherConfig;
use crate::error::{Result, WeatherError};
use crate::model::{CurrentWeather, Daily, ForecastResponse, Hourly};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use std::num::NonZeroU32;
use std::sync::Arc;

const DAILY_SERIES: &str =
    "temperature_2m_max,temperature_2m_min,weathercode,precipitation_sum,windspeed_10m_max";
const HOURLY_SERIES: &str = "temperature_2m,relative_humidity_2m,cloudcover";
const REQUESTS_PER_SECOND: u32 = 5;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Source of weather data for one configured location
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self) -> Result<CurrentWeather>;
    async fn forecast(&self) -> Result<Daily>;
    async fn detailed(&self) -> Result<(CurrentWeather, Hourly)>;
}

/// Open-Meteo forecast endpoint client
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
    rate_limiter: SharedRateLimiter,
}

impl OpenMeteoClient {
    pub fn new(config: WeatherConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| WeatherError::Config(format!("HTTP client: {e}")))?;
        let quota = Quota::per_second(NonZeroU32::new(REQUESTS_PER_SECOND).unwrap_or(NonZeroU32::MIN));

        Ok(Self {
            client,
            config,
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(WeatherConfig::from_env()?)
    }

    fn base_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", self.config.latitude.to_string()),
            ("longitude", self.config.longitude.to_string()),
            ("timezone", "auto".to_string()),
            ("windspeed_unit", "ms".to_string()),
        ]
    }

    async fn fetch(&self, extra: &[(&'static str, &str)]) -> Result<ForecastResponse> {
        self.rate_limiter.until_ready().await;

        let mut query = self.base_query();
        query.extend(extra.iter().map(|(k, v)| (*k, (*v).to_string())));
        tracing::debug!("GET {} {:?}", self.config.forecast_url, query);

        let response = self
            .client
            .get(&self.config.forecast_url)
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn require<T>(block: Option<T>, name: &str) -> Result<T> {
    block.ok_or_else(|| WeatherError::Payload(format!("missing '{name}' block")))
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    async fn current(&self) -> Result<CurrentWeather> {
        let response = self.fetch(&[("current_weather", "true")]).await?;
        require(response.current_weather, "current_weather")
    }

    async fn forecast(&self) -> Result<Daily> {
        let response = self
            .fetch(&[("daily", DAILY_SERIES), ("forecast_days", "3")])
            .await?;
        require(response.daily, "daily")
    }

    async fn detailed(&self) -> Result<(CurrentWeather, Hourly)> {
        let response = self
            .fetch(&[("current_weather", "true"), ("hourly", HOURLY_SERIES)])
            .await?;
        Ok((
            require(response.current_weather, "current_weather")?,
            require(response.hourly, "hourly")?,
        ))
    }
}
