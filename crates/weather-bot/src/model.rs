//! Open-Meteo response shapes
//!
//! Blocks are optional because each request asks for a different subset.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current_weather: Option<CurrentWeather>,
    #[serde(default)]
    pub daily: Option<Daily>,
    #[serde(default)]
    pub hourly: Option<Hourly>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
    pub winddirection: f64,
    pub weathercode: i32,
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Daily {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub weathercode: Vec<i32>,
    #[serde(default)]
    pub precipitation_sum: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub windspeed_10m_max: Option<Vec<Option<f64>>>,
}

impl Daily {
    /// Number of days with every required series present
    pub fn days(&self) -> usize {
        self.time
            .len()
            .min(self.temperature_2m_max.len())
            .min(self.temperature_2m_min.len())
            .min(self.weathercode.len())
    }

    pub fn precipitation(&self, day: usize) -> f64 {
        series_value(self.precipitation_sum.as_deref(), day)
    }

    pub fn wind_max(&self, day: usize) -> f64 {
        series_value(self.windspeed_10m_max.as_deref(), day)
    }
}

fn series_value(series: Option<&[Option<f64>]>, index: usize) -> f64 {
    series
        .and_then(|s| s.get(index).copied().flatten())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hourly {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub cloudcover: Vec<Option<f64>>,
}

impl Hourly {
    /// First humidity reading, used as an approximation for "now"
    pub fn first_humidity(&self) -> Option<f64> {
        self.relative_humidity_2m.first().copied().flatten()
    }

    pub fn first_cloud_cover(&self) -> Option<f64> {
        self.cloudcover.first().copied().flatten()
    }
}
