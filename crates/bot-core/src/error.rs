//! Error types for bot-core

use thiserror::Error;

/// Result type alias for bot-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for platform plumbing
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Telegram API request failed
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// A button carried a URL that does not parse
    #[error("Invalid button URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}

impl From<bot_utils::EnvError> for Error {
    fn from(err: bot_utils::EnvError) -> Self {
        Error::Config(err.to_string())
    }
}
