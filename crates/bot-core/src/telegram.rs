//! Telegram adapter
//!
//! Converts [`FormattedMessage`] values into teloxide requests. Handlers stay
//! platform-neutral; only the binaries touch this module.

use crate::error::{Error, Result};
use crate::message::{Button, ButtonKind, FormattedMessage, Keyboard, ParseMode};
use teloxide::prelude::*;
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, MessageId,
    ParseMode as TelegramParseMode, ReplyMarkup,
};
use teloxide::{ApiError, RequestError};

/// Telegram bot configuration
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token from BotFather
    pub token: String,
}

impl TelegramConfig {
    /// Create config from the `TELEGRAM_BOT_TOKEN` environment variable
    pub fn from_env() -> Result<Self> {
        let token = bot_utils::required_env("TELEGRAM_BOT_TOKEN")?;
        Ok(Self { token })
    }

    /// Token with the middle masked, for logs
    pub fn masked_token(&self) -> String {
        let chars: Vec<char> = self.token.chars().collect();
        if chars.len() <= 10 {
            return "*****".to_string();
        }
        let head: String = chars[..5].iter().collect();
        let tail: String = chars[chars.len() - 5..].iter().collect();
        format!("{head}...{tail}")
    }

    /// Build a teloxide client
    pub fn bot(&self) -> Bot {
        Bot::new(&self.token)
    }
}

fn inline_button(button: &Button) -> Result<InlineKeyboardButton> {
    match &button.kind {
        ButtonKind::Callback(action) => Ok(InlineKeyboardButton::callback(
            button.label.clone(),
            action.clone(),
        )),
        ButtonKind::Url(raw) => {
            let url = url::Url::parse(raw).map_err(|source| Error::InvalidUrl {
                url: raw.clone(),
                source,
            })?;
            Ok(InlineKeyboardButton::url(button.label.clone(), url))
        }
    }
}

/// Inline markup for a keyboard, if it is an inline one
pub fn inline_markup(keyboard: &Keyboard) -> Result<Option<InlineKeyboardMarkup>> {
    match keyboard {
        Keyboard::Inline(rows) => {
            let rows = rows
                .iter()
                .map(|row| row.iter().map(inline_button).collect::<Result<Vec<_>>>())
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(InlineKeyboardMarkup::new(rows)))
        }
        _ => Ok(None),
    }
}

/// Any markup for a keyboard
pub fn reply_markup(keyboard: &Keyboard) -> Result<Option<ReplyMarkup>> {
    match keyboard {
        Keyboard::None => Ok(None),
        Keyboard::Inline(_) => Ok(inline_markup(keyboard)?.map(ReplyMarkup::InlineKeyboard)),
        Keyboard::Reply(rows) => {
            let rows = rows
                .iter()
                .map(|row| row.iter().map(KeyboardButton::new).collect::<Vec<_>>());
            Ok(Some(ReplyMarkup::Keyboard(
                KeyboardMarkup::new(rows).resize_keyboard(),
            )))
        }
    }
}

fn telegram_parse_mode(mode: ParseMode) -> Option<TelegramParseMode> {
    match mode {
        ParseMode::Plain => None,
        ParseMode::Html => Some(TelegramParseMode::Html),
    }
}

/// Send `message` as a new chat message
pub async fn send(bot: &Bot, chat_id: ChatId, message: &FormattedMessage) -> Result<Message> {
    let mut request = bot.send_message(chat_id, message.text.clone());
    if let Some(mode) = telegram_parse_mode(message.parse_mode) {
        request = request.parse_mode(mode);
    }
    if let Some(markup) = reply_markup(&message.keyboard)? {
        request = request.reply_markup(markup);
    }
    Ok(request.await?)
}

/// Replace the content of an existing message with `message`
///
/// Reply keyboards cannot be attached to edited messages and are dropped.
pub async fn edit(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    message: &FormattedMessage,
) -> Result<()> {
    let mut request = bot.edit_message_text(chat_id, message_id, message.text.clone());
    if let Some(mode) = telegram_parse_mode(message.parse_mode) {
        request = request.parse_mode(mode);
    }
    if let Some(markup) = inline_markup(&message.keyboard)? {
        request = request.reply_markup(markup);
    }

    match request.await {
        Ok(_) => Ok(()),
        Err(RequestError::Api(ApiError::MessageNotModified)) => {
            tracing::debug!("Message {} in chat {} not modified", message_id.0, chat_id.0);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_token() {
        let config = TelegramConfig {
            token: "123456789:ABCDEFGHIJKLMNOP".to_string(),
        };
        assert_eq!(config.masked_token(), "12345...LMNOP");

        let short = TelegramConfig {
            token: "abc".to_string(),
        };
        assert_eq!(short.masked_token(), "*****");
    }

    #[test]
    fn test_inline_markup_rows() {
        let msg = FormattedMessage::html("x")
            .with_action("A", "a")
            .with_row(vec![Button::callback("B", "b"), Button::url("C", "https://ria.ru/")]);

        let markup = inline_markup(&msg.keyboard).unwrap().unwrap();
        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard[1].len(), 2);
        assert_eq!(markup.inline_keyboard[1][0].text, "B");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let msg = FormattedMessage::plain("x").with_link("bad", "not a url");
        let err = inline_markup(&msg.keyboard).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }

    #[test]
    fn test_reply_keyboard_markup() {
        let keyboard = Keyboard::Reply(vec![vec!["Привет".to_string()], vec!["Пока".to_string()]]);
        assert!(matches!(
            reply_markup(&keyboard).unwrap(),
            Some(ReplyMarkup::Keyboard(_))
        ));
        assert!(inline_markup(&keyboard).unwrap().is_none());
        assert!(reply_markup(&Keyboard::None).unwrap().is_none());
    }
}
