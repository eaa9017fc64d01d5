//! Replies of the demo bot

use crate::keyboards::{self, ACTION_OPTION_1, ACTION_OPTION_2, ACTION_SHOW_MORE, BYE, HELLO};
use bot_core::{FormattedMessage, escape_html};

/// A chat message the demo bot reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbound {
    Start,
    Help,
    Links,
    More,
    Hello,
    Bye,
}

impl Inbound {
    /// Recognise a command or a reply keyboard button
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        match text {
            HELLO => return Some(Inbound::Hello),
            BYE => return Some(Inbound::Bye),
            _ => {}
        }

        let name = text.split_whitespace().next()?.strip_prefix('/')?;
        match name.split('@').next().unwrap_or(name) {
            "start" => Some(Inbound::Start),
            "help" => Some(Inbound::Help),
            "link" | "links" => Some(Inbound::Links),
            "dynamic" | "more" => Some(Inbound::More),
            _ => None,
        }
    }
}

/// Callback from one of the inline buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoAction {
    ShowMore,
    Option(u8),
}

impl DemoAction {
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            ACTION_SHOW_MORE => Some(DemoAction::ShowMore),
            ACTION_OPTION_1 => Some(DemoAction::Option(1)),
            ACTION_OPTION_2 => Some(DemoAction::Option(2)),
            _ => None,
        }
    }
}

/// How a callback reply is delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackReply {
    /// Replace the message that carried the button
    Edit(FormattedMessage),
    /// Post a new message
    Send(FormattedMessage),
}

const HELP_TEXT: &str = "Этот бот умеет выполнять команды:\n/start\n/help\n/links\n/more";

/// Reply to a chat message from a user called `first_name`
pub fn reply(inbound: Inbound, first_name: &str) -> FormattedMessage {
    let name = escape_html(first_name);
    match inbound {
        Inbound::Start => keyboards::with_main(FormattedMessage::plain(format!(
            "Привет, я бот!\n\n{HELP_TEXT}"
        ))),
        Inbound::Help => FormattedMessage::plain(HELP_TEXT),
        Inbound::Links => {
            keyboards::with_links(FormattedMessage::plain(format!("Что желаете, {name}?")))
        }
        Inbound::More => keyboards::with_show_more(FormattedMessage::plain("Нажмите кнопку ниже:")),
        Inbound::Hello => FormattedMessage::plain(format!("Привет, {name}")),
        Inbound::Bye => FormattedMessage::plain(format!("До свидания, {name}")),
    }
}

pub fn on_action(action: DemoAction) -> CallbackReply {
    match action {
        DemoAction::ShowMore => {
            CallbackReply::Edit(keyboards::with_options(FormattedMessage::plain("Выберите опцию:")))
        }
        DemoAction::Option(n) => CallbackReply::Send(FormattedMessage::plain(format!(
            "Вы выбрали: Опция {n}"
        ))),
    }
}
