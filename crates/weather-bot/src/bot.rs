//! Weather bot command handling

use crate::client::WeatherSource;
use crate::error::WeatherError;
use crate::format;
use bot_core::FormattedMessage;

/// Parsed slash command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Current,
    Forecast,
    Detailed,
}

impl Command {
    /// Parse a chat message; `None` for plain text and unknown commands
    pub fn parse(input: &str) -> Option<Self> {
        let name = input.split_whitespace().next()?.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);

        match name.to_lowercase().as_str() {
            "start" => Some(Command::Start),
            "help" => Some(Command::Help),
            "weather" | "weather_now" => Some(Command::Current),
            "forecast" => Some(Command::Forecast),
            "detailed" => Some(Command::Detailed),
            _ => None,
        }
    }

    /// Reply shown for a failed request, by failure kind
    fn failure_text(self, err: &WeatherError) -> &'static str {
        match (self, err) {
            (Command::Current, WeatherError::Status(_)) => {
                "❌ Не удалось получить данные о погоде. Попробуйте позже."
            }
            (Command::Forecast, WeatherError::Status(_)) => "❌ Не удалось получить прогноз.",
            (_, WeatherError::Status(_)) => "❌ Не удалось получить данные.",
            (Command::Current, WeatherError::Payload(_)) => "⚠️ Ошибка обработки данных погоды.",
            (Command::Forecast, WeatherError::Payload(_)) => "⚠️ Ошибка обработки прогноза.",
            (_, WeatherError::Payload(_)) => "⚠️ Ошибка обработки данных.",
            (Command::Current, _) => "⚠️ Произошла ошибка при получении погоды.",
            (Command::Forecast, _) => "⚠️ Ошибка при получении прогноза.",
            (_, _) => "⚠️ Ошибка при получении данных.",
        }
    }
}

/// Chat-platform-neutral weather bot
pub struct WeatherBot<S> {
    source: S,
    place: String,
}

impl<S: WeatherSource> WeatherBot<S> {
    pub fn new(source: S, place: impl Into<String>) -> Self {
        Self {
            source,
            place: place.into(),
        }
    }

    pub async fn handle(&self, command: Command) -> FormattedMessage {
        let result = match command {
            Command::Start => return format::render_start(),
            Command::Help => return format::render_help(),
            Command::Current => self
                .source
                .current()
                .await
                .map(|current| format::render_current(&current, &self.place)),
            Command::Forecast => self.source.forecast().await.map(|daily| format::render_forecast(&daily)),
            Command::Detailed => self
                .source
                .detailed()
                .await
                .map(|(current, hourly)| format::render_detailed(&current, &hourly, &self.place)),
        };

        result.unwrap_or_else(|e| {
            tracing::warn!("{:?} failed: {}", command, e);
            FormattedMessage::plain(command.failure_text(&e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockWeatherSource;
    use crate::model::{CurrentWeather, Daily, Hourly};

    fn current() -> CurrentWeather {
        CurrentWeather {
            temperature: -3.0,
            windspeed: 2.5,
            winddirection: 90.0,
            weathercode: 71,
            time: None,
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse("/weather"), Some(Command::Current));
        assert_eq!(Command::parse("/weather_now"), Some(Command::Current));
        assert_eq!(Command::parse("/forecast@WeatherBot"), Some(Command::Forecast));
        assert_eq!(Command::parse("/detailed"), Some(Command::Detailed));
        assert_eq!(Command::parse("погода"), None);
        assert_eq!(Command::parse("/bonds"), None);
    }

    #[tokio::test]
    async fn test_current_weather() {
        let mut source = MockWeatherSource::new();
        source.expect_current().times(1).returning(|| Ok(current()));
        let bot = WeatherBot::new(source, "Москве");

        let msg = bot.handle(Command::Current).await;
        assert!(msg.text.starts_with("❄️ <b>Погода в Москве сейчас</b>"));
        assert!(msg.text.contains("-3.0°C"));
        assert!(msg.text.contains("2.5 м/с В"));
        assert!(msg.text.contains("Небольшой снег"));
    }

    #[tokio::test]
    async fn test_forecast_and_detailed() {
        let mut source = MockWeatherSource::new();
        source.expect_forecast().returning(|| {
            Ok(Daily {
                time: vec!["2026-10-16".to_string()],
                temperature_2m_max: vec![5.0],
                temperature_2m_min: vec![-1.0],
                weathercode: vec![95],
                ..Daily::default()
            })
        });
        source
            .expect_detailed()
            .returning(|| Ok((current(), Hourly::default())));
        let bot = WeatherBot::new(source, "Москве");

        let msg = bot.handle(Command::Forecast).await;
        assert!(msg.text.contains("⛈️ Гроза"));

        let msg = bot.handle(Command::Detailed).await;
        assert!(msg.text.contains("~50%"));
    }

    #[tokio::test]
    async fn test_failures_map_to_fixed_replies() {
        let mut source = MockWeatherSource::new();
        source
            .expect_current()
            .returning(|| Err(WeatherError::Status(500)));
        source
            .expect_forecast()
            .returning(|| Err(WeatherError::Request("timed out".to_string())));
        source
            .expect_detailed()
            .returning(|| Err(WeatherError::Payload("missing 'hourly' block".to_string())));
        let bot = WeatherBot::new(source, "Москве");

        assert_eq!(
            bot.handle(Command::Current).await.text,
            "❌ Не удалось получить данные о погоде. Попробуйте позже."
        );
        assert_eq!(
            bot.handle(Command::Forecast).await.text,
            "⚠️ Ошибка при получении прогноза."
        );
        assert_eq!(
            bot.handle(Command::Detailed).await.text,
            "⚠️ Ошибка обработки данных."
        );
    }

    #[tokio::test]
    async fn test_static_commands_do_not_fetch() {
        let bot = WeatherBot::new(MockWeatherSource::new(), "Москве");
        assert!(bot.handle(Command::Start).await.text.contains("/forecast"));
        assert!(bot.handle(Command::Help).await.text.contains("/detailed"));
    }
}
