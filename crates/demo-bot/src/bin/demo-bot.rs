//! Keyboard demo bot for Telegram
//!
//! ```bash
//! export TELEGRAM_BOT_TOKEN="123456:ABC..."
//! cargo run --bin demo-bot -p demo-bot
//! ```

use bot_core::TelegramConfig;
use bot_core::telegram::{edit, send};
use demo_bot::{CallbackReply, DemoAction, Inbound, on_action, reply};
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bot_utils::load_dotenv();
    bot_utils::init_tracing();

    let telegram = TelegramConfig::from_env()?;
    tracing::info!("Starting demo bot (token {})", telegram.masked_token());

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    Dispatcher::builder(telegram.bot(), handler)
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error while handling an update",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn on_message(bot: Bot, msg: Message) -> bot_core::Result<()> {
    let Some(inbound) = msg.text().and_then(Inbound::parse) else {
        return Ok(());
    };
    let first_name = msg
        .from
        .as_ref()
        .map(|user| user.first_name.clone())
        .unwrap_or_default();

    send(&bot, msg.chat.id, &reply(inbound, &first_name)).await?;
    Ok(())
}

async fn on_callback(bot: Bot, q: CallbackQuery) -> bot_core::Result<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(action) = q.data.as_deref().and_then(DemoAction::parse) else {
        return Ok(());
    };
    let Some(message) = q.message.as_ref() else {
        return Ok(());
    };
    let chat_id = message.chat().id;
    tracing::debug!("Chat {} callback {:?}", chat_id.0, action);

    match on_action(action) {
        CallbackReply::Edit(reply) => edit(&bot, chat_id, message.id(), &reply).await,
        CallbackReply::Send(reply) => send(&bot, chat_id, &reply).await.map(|_| ()),
    }
}
