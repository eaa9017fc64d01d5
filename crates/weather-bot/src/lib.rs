//! Weather reports from Open-Meteo
//!
//! Current conditions, a three-day forecast and an approximate humidity
//! report for one configured location, rendered as Russian chat messages.

pub mod bot;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod wmo;

pub use bot::{Command, WeatherBot};
pub use client::{OpenMeteoClient, WeatherSource};
pub use config::WeatherConfig;
pub use error::{Result, WeatherError};
