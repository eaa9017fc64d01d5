//! Outbound message surface
//!
//! A [`FormattedMessage`] is what every bot handler produces: a text payload
//! with a parse mode plus an optional keyboard. Platform adapters decide how
//! to deliver it.

use serde::{Deserialize, Serialize};

/// How the message text should be interpreted by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParseMode {
    /// Plain text, no markup
    #[default]
    Plain,

    /// Telegram-flavoured HTML (`<b>`, `<i>`, ...)
    Html,
}

/// What pressing a button does
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonKind {
    /// Sends the action id back to the bot
    Callback(String),

    /// Opens an external link
    Url(String),
}

/// A single selectable button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// Label shown to the user
    pub label: String,

    /// Action behind the label
    pub kind: ButtonKind,
}

impl Button {
    /// Button that reports `action` back to the bot
    pub fn callback(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ButtonKind::Callback(action.into()),
        }
    }

    /// Button that opens `url`
    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ButtonKind::Url(url.into()),
        }
    }

    /// Action id for callback buttons
    pub fn action_id(&self) -> Option<&str> {
        match &self.kind {
            ButtonKind::Callback(action) => Some(action),
            ButtonKind::Url(_) => None,
        }
    }
}

/// Keyboard attached to a message
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Keyboard {
    /// No keyboard
    #[default]
    None,

    /// Buttons attached under the message, grouped into rows
    Inline(Vec<Vec<Button>>),

    /// Text buttons replacing the client's input keyboard
    Reply(Vec<Vec<String>>),
}

/// Formatted bot reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedMessage {
    /// Message content
    pub text: String,

    /// How `text` is to be rendered
    pub parse_mode: ParseMode,

    /// Attached keyboard
    pub keyboard: Keyboard,
}

impl FormattedMessage {
    /// Create a plain text message
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: ParseMode::Plain,
            keyboard: Keyboard::None,
        }
    }

    /// Create an HTML message
    pub fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: ParseMode::Html,
            keyboard: Keyboard::None,
        }
    }

    /// Add a row holding a single callback button
    pub fn with_action(self, label: impl Into<String>, action: impl Into<String>) -> Self {
        self.with_row(vec![Button::callback(label, action)])
    }

    /// Add a row holding a single URL button
    pub fn with_link(self, label: impl Into<String>, url: impl Into<String>) -> Self {
        self.with_row(vec![Button::url(label, url)])
    }

    /// Append a row of inline buttons
    ///
    /// A reply keyboard set earlier is replaced.
    pub fn with_row(mut self, row: Vec<Button>) -> Self {
        match &mut self.keyboard {
            Keyboard::Inline(rows) => rows.push(row),
            _ => self.keyboard = Keyboard::Inline(vec![row]),
        }
        self
    }

    /// Attach a reply keyboard, one row per entry
    pub fn with_reply_keyboard(mut self, rows: Vec<Vec<String>>) -> Self {
        self.keyboard = Keyboard::Reply(rows);
        self
    }

    /// `(label, action_id)` pairs of all callback buttons, in row order
    pub fn actions(&self) -> Vec<(&str, &str)> {
        match &self.keyboard {
            Keyboard::Inline(rows) => rows
                .iter()
                .flatten()
                .filter_map(|b| b.action_id().map(|a| (b.label.as_str(), a)))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Escape text for inclusion in an HTML message
pub fn escape_html(text: &str) -> String {
    teloxide::utils::html::escape(text)
}

/// Shorten `text` to `max_chars` characters, appending `...` when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
