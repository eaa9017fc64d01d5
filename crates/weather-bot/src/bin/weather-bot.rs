//! Weather bot for Telegram
//!
//! # Usage
//!
//! ```bash
//! export TELEGRAM_BOT_TOKEN="123456:ABC..."
//! export WEATHER_LATITUDE=59.9386 WEATHER_LONGITUDE=30.3141 WEATHER_PLACE="Санкт-Петербурге"
//! cargo run --bin weather-bot -p weather-bot
//! ```

use bot_core::TelegramConfig;
use bot_core::telegram::send;
use std::sync::Arc;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use weather_bot::{Command, OpenMeteoClient, WeatherBot, WeatherConfig};

type State = Arc<WeatherBot<OpenMeteoClient>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bot_utils::load_dotenv();
    bot_utils::init_tracing();

    let telegram = TelegramConfig::from_env()?;
    let config = WeatherConfig::from_env()?;
    tracing::info!(
        "Starting weather bot (token {}, location {}, {})",
        telegram.masked_token(),
        config.latitude,
        config.longitude
    );

    let place = config.place.clone();
    let state: State = Arc::new(WeatherBot::new(OpenMeteoClient::new(config)?, place));

    let handler = Update::filter_message().endpoint(on_message);

    Dispatcher::builder(telegram.bot(), handler)
        .dependencies(dptree::deps![state])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error while handling an update",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn on_message(bot: Bot, msg: Message, state: State) -> bot_core::Result<()> {
    let Some(command) = msg.text().and_then(Command::parse) else {
        return Ok(());
    };
    tracing::debug!("Chat {} command {:?}", msg.chat.id.0, command);

    let reply = state.handle(command).await;
    send(&bot, msg.chat.id, &reply).await?;
    Ok(())
}
