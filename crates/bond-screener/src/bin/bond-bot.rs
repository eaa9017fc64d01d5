//! MOEX bond bot for Telegram
//!
//! # Usage
//!
//! ```bash
//! export TELEGRAM_BOT_TOKEN="123456:ABC..."
//! export BOND_SCREENER_PROFILE=domestic   # or simple
//! cargo run --bin bond-bot -p bond-screener
//! ```

use bond_screener::bot::placeholder;
use bond_screener::{BondAction, BondBot, Command, MoexClient, ScreenerConfig};
use bot_core::telegram::{edit, send};
use bot_core::{FormattedMessage, TelegramConfig};
use std::sync::Arc;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::BotCommand;

type State = Arc<BondBot<MoexClient>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = bot_utils::load_dotenv();
    bot_utils::init_tracing();
    if let Some(path) = dotenv {
        tracing::info!("Loaded environment from {}", path.display());
    }

    let telegram = TelegramConfig::from_env()?;
    let config = ScreenerConfig::from_env()?;
    tracing::info!(
        "Starting bond bot (token {}, profile {}, top {})",
        telegram.masked_token(),
        config.profile,
        config.top_n
    );

    let state: State = Arc::new(BondBot::new(MoexClient::new(&config)?, &config));
    let bot = telegram.bot();

    let menu = Command::ALL
        .iter()
        .map(|command| BotCommand::new(command.name(), command.description()));
    if let Err(e) = bot.set_my_commands(menu).await {
        tracing::warn!("Failed to set the command menu: {}", e);
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error while handling an update",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!("Bond bot stopped");
    Ok(())
}

async fn on_message(bot: Bot, msg: Message, state: State) -> bot_core::Result<()> {
    let Some(command) = msg.text().and_then(Command::parse) else {
        return Ok(());
    };
    let chat_id = msg.chat.id;
    let session = chat_id.0.to_string();
    tracing::debug!("Chat {} command {:?}", chat_id.0, command);

    match command.action() {
        Some(action) => {
            let loading = placeholder(&action).unwrap_or_default();
            let sent = send(&bot, chat_id, &FormattedMessage::plain(loading)).await?;
            let reply = state.handle(&session, action).await;
            edit(&bot, chat_id, sent.id, &reply).await
        }
        None => {
            let reply = state.handle_command(&session, command).await;
            send(&bot, chat_id, &reply).await.map(|_| ())
        }
    }
}

async fn on_callback(bot: Bot, q: CallbackQuery, state: State) -> bot_core::Result<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(action) = q.data.as_deref().and_then(BondAction::parse) else {
        tracing::debug!("Ignoring callback data {:?}", q.data);
        return Ok(());
    };
    let Some(message) = q.message.as_ref() else {
        return Ok(());
    };
    let chat_id = message.chat().id;
    let message_id = message.id();
    let session = chat_id.0.to_string();

    if let Some(loading) = placeholder(&action) {
        edit(&bot, chat_id, message_id, &FormattedMessage::plain(loading)).await?;
    }
    let reply = state.handle(&session, action).await;
    edit(&bot, chat_id, message_id, &reply).await
}
