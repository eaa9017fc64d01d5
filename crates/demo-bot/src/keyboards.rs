//! Keyboards shown by the demo bot

use bot_core::{Button, FormattedMessage};

pub const HELLO: &str = "Привет";
pub const BYE: &str = "Пока";

pub const ACTION_SHOW_MORE: &str = "show_more";
pub const ACTION_OPTION_1: &str = "option_1";
pub const ACTION_OPTION_2: &str = "option_2";

pub const LINKS: [(&str, &str); 3] = [
    ("Новости", "https://ria.ru/"),
    ("Музыка", "https://music.yandex.ru/"),
    ("Видео", "https://www.1tv.ru/news"),
];

/// Attach the `[Привет] [Пока]` reply keyboard
pub fn with_main(message: FormattedMessage) -> FormattedMessage {
    message.with_reply_keyboard(vec![vec![HELLO.to_string()], vec![BYE.to_string()]])
}

/// Attach one URL button per row
pub fn with_links(message: FormattedMessage) -> FormattedMessage {
    LINKS
        .iter()
        .fold(message, |msg, (label, url)| msg.with_link(*label, *url))
}

pub fn with_show_more(message: FormattedMessage) -> FormattedMessage {
    message.with_row(vec![Button::callback("Показать больше", ACTION_SHOW_MORE)])
}

pub fn with_options(message: FormattedMessage) -> FormattedMessage {
    message
        .with_action("Опция 1", ACTION_OPTION_1)
        .with_action("Опция 2", ACTION_OPTION_2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bot_core::Keyboard;

    #[test]
    fn test_main_keyboard() {
        let msg = with_main(FormattedMessage::plain("x"));
        assert_eq!(
            msg.keyboard,
            Keyboard::Reply(vec![vec!["Привет".to_string()], vec!["Пока".to_string()]])
        );
    }

    #[test]
    fn test_links_have_no_actions() {
        let msg = with_links(FormattedMessage::plain("x"));
        assert!(msg.actions().is_empty());
        match msg.keyboard {
            Keyboard::Inline(rows) => assert_eq!(rows.len(), 3),
            other => panic!("Expected inline keyboard, got {other:?}"),
        }
    }

    #[test]
    fn test_options() {
        let msg = with_options(FormattedMessage::plain("x"));
        assert_eq!(
            msg.actions(),
            vec![("Опция 1", "option_1"), ("Опция 2", "option_2")]
        );
    }
}
