//! Configuration for bond screening operations

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Public MOEX ISS endpoint
pub const DEFAULT_ISS_URL: &str = "https://iss.moex.com/iss";

/// Board traded for government bonds
pub const DEFAULT_BOARD: &str = "TQOB";

/// Largest list that still fits one Telegram message
pub const MAX_TOP_N: usize = 30;

/// Which eligibility predicates apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScreeningProfile {
    /// Ruble bonds with an issue size of at least the configured minimum
    #[default]
    Domestic,
    /// No currency or issue size requirement
    Simple,
}

impl FromStr for ScreeningProfile {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "domestic" | "rub" => Ok(Self::Domestic),
            "simple" | "all" => Ok(Self::Simple),
            other => Err(ScreenerError::Config(format!(
                "unknown screening profile '{other}' (expected 'domestic' or 'simple')"
            ))),
        }
    }
}

impl std::fmt::Display for ScreeningProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreeningProfile::Domestic => write!(f, "domestic"),
            ScreeningProfile::Simple => write!(f, "simple"),
        }
    }
}

/// Configuration for bond screening operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerConfig {
    /// Base URL of the ISS API
    pub iss_base_url: String,

    /// Trading board to list
    pub board: String,

    /// Number of bonds kept after ranking
    pub top_n: usize,

    /// Active predicate set
    pub profile: ScreeningProfile,

    /// Minimum issue size in the domestic profile
    pub min_issue_size: f64,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Outbound requests allowed per second
    pub requests_per_second: u32,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            iss_base_url: DEFAULT_ISS_URL.to_string(),
            board: DEFAULT_BOARD.to_string(),
            top_n: 10,
            profile: ScreeningProfile::Domestic,
            min_issue_size: 1_000_000_000.0,
            request_timeout: Duration::from_secs(10),
            requests_per_second: 5,
        }
    }
}

impl ScreenerConfig {
    /// Create a new configuration builder
    pub fn builder() -> ScreenerConfigBuilder {
        ScreenerConfigBuilder::default()
    }

    /// Load configuration from environment variables, using defaults for unset ones
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env()?.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.iss_base_url).map_err(|e| {
            ScreenerError::Config(format!("invalid ISS URL '{}': {e}", self.iss_base_url))
        })?;

        if self.top_n > MAX_TOP_N {
            return Err(ScreenerError::Config(format!(
                "top_n must be at most {MAX_TOP_N}, got {}",
                self.top_n
            )));
        }

        if self.board.trim().is_empty() {
            return Err(ScreenerError::Config("board must not be empty".to_string()));
        }

        if self.request_timeout.is_zero() {
            return Err(ScreenerError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.requests_per_second == 0 {
            return Err(ScreenerError::Config(
                "requests_per_second must be greater than 0".to_string(),
            ));
        }

        if !self.min_issue_size.is_finite() || self.min_issue_size < 0.0 {
            return Err(ScreenerError::Config(
                "min_issue_size must be a non-negative number".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for ScreenerConfig
#[derive(Debug, Default)]
pub struct ScreenerConfigBuilder {
    iss_base_url: Option<String>,
    board: Option<String>,
    top_n: Option<usize>,
    profile: Option<ScreeningProfile>,
    min_issue_size: Option<f64>,
    request_timeout: Option<Duration>,
    requests_per_second: Option<u32>,
}

impl ScreenerConfigBuilder {
    /// Set the ISS base URL
    pub fn iss_base_url(mut self, url: impl Into<String>) -> Self {
        self.iss_base_url = Some(url.into());
        self
    }

    /// Set the trading board
    pub fn board(mut self, board: impl Into<String>) -> Self {
        self.board = Some(board.into());
        self
    }

    /// Set the number of bonds to keep
    pub fn top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }

    /// Set the screening profile
    pub fn profile(mut self, profile: ScreeningProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Set the minimum issue size for the domestic profile
    pub fn min_issue_size(mut self, size: f64) -> Self {
        self.min_issue_size = Some(size);
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the outbound rate limit
    pub fn requests_per_second(mut self, rps: u32) -> Self {
        self.requests_per_second = Some(rps);
        self
    }

    /// Override fields from environment variables that are set
    pub fn with_env(mut self) -> Result<Self> {
        if let Some(url) = bot_utils::optional_env("MOEX_ISS_URL") {
            self.iss_base_url = Some(url);
        }
        if let Some(board) = bot_utils::optional_env("MOEX_BOARD") {
            self.board = Some(board);
        }
        if let Some(profile) = bot_utils::optional_env("BOND_SCREENER_PROFILE") {
            self.profile = Some(profile.parse()?);
        }

        let defaults = ScreenerConfig::default();
        self.top_n = Some(bot_utils::env_or(
            "BOND_TOP_N",
            self.top_n.unwrap_or(defaults.top_n),
        )?);
        self.min_issue_size = Some(bot_utils::env_or(
            "BOND_MIN_ISSUE_SIZE",
            self.min_issue_size.unwrap_or(defaults.min_issue_size),
        )?);
        let timeout_secs = bot_utils::env_or(
            "HTTP_TIMEOUT_SECS",
            self.request_timeout
                .unwrap_or(defaults.request_timeout)
                .as_secs(),
        )?;
        self.request_timeout = Some(Duration::from_secs(timeout_secs));

        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<ScreenerConfig> {
        let defaults = ScreenerConfig::default();

        let config = ScreenerConfig {
            iss_base_url: self.iss_base_url.unwrap_or(defaults.iss_base_url),
            board: self.board.unwrap_or(defaults.board),
            top_n: self.top_n.unwrap_or(defaults.top_n),
            profile: self.profile.unwrap_or(defaults.profile),
            min_issue_size: self.min_issue_size.unwrap_or(defaults.min_issue_size),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            requests_per_second: self
                .requests_per_second
                .unwrap_or(defaults.requests_per_second),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScreenerConfig::default();
        assert_eq!(config.top_n, 10);
        assert_eq!(config.profile, ScreeningProfile::Domestic);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ScreenerConfig::builder()
            .top_n(5)
            .profile(ScreeningProfile::Simple)
            .request_timeout(Duration::from_secs(3))
            .build()
            .unwrap();

        assert_eq!(config.top_n, 5);
        assert_eq!(config.profile, ScreeningProfile::Simple);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.board, "TQOB");
    }

    #[test]
    fn test_zero_top_n_is_allowed() {
        let config = ScreenerConfig::builder().top_n(0).build().unwrap();
        assert_eq!(config.top_n, 0);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(
            ScreenerConfig::builder()
                .request_timeout(Duration::ZERO)
                .build()
                .is_err()
        );
        assert!(ScreenerConfig::builder().iss_base_url("not a url").build().is_err());
        assert!(ScreenerConfig::builder().min_issue_size(-1.0).build().is_err());
        assert!(ScreenerConfig::builder().requests_per_second(0).build().is_err());
        assert!(ScreenerConfig::builder().top_n(MAX_TOP_N + 1).build().is_err());
        assert!(ScreenerConfig::builder().top_n(MAX_TOP_N).build().is_ok());
    }

    #[test]
    fn test_profile_parsing() {
        assert_eq!("Domestic".parse::<ScreeningProfile>().unwrap(), ScreeningProfile::Domestic);
        assert_eq!(" simple ".parse::<ScreeningProfile>().unwrap(), ScreeningProfile::Simple);
        assert!("foreign".parse::<ScreeningProfile>().is_err());
        assert_eq!(ScreeningProfile::Simple.to_string(), "simple");
    }
}
