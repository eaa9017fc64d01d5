//! Core abstractions shared by the chat bots
//!
//! This crate defines the platform-neutral outbound message surface
//! ([`FormattedMessage`] with its keyboards) and the adapter that turns it
//! into Telegram requests.

pub mod error;
pub mod message;
pub mod telegram;

pub use error::{Error, Result};
pub use message::{Button, ButtonKind, FormattedMessage, Keyboard, ParseMode, escape_html, truncate_chars};
pub use telegram::TelegramConfig;
