//! Inbound text commands and button actions

use crate::interface::formatter::{ACTION_BACK, ACTION_REFRESH, ACTION_SELECT_PREFIX};

/// Parsed slash command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Welcome text
    Start,
    /// Command list
    Help,
    /// Show the ranked list
    Bonds,
}

impl Command {
    /// Commands advertised in the chat menu, in menu order
    pub const ALL: [Command; 3] = [Command::Bonds, Command::Help, Command::Start];

    /// Parse a chat message; `None` for plain text and unknown commands
    ///
    /// Accepts the `/cmd@BotName` form Telegram uses in group chats.
    pub fn parse(input: &str) -> Option<Self> {
        let word = input.split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);

        match name.to_lowercase().as_str() {
            "start" => Some(Command::Start),
            "help" | "h" => Some(Command::Help),
            "bonds" | "top" => Some(Command::Bonds),
            _ => None,
        }
    }

    /// The list action this command triggers, if any
    pub fn action(self) -> Option<BondAction> {
        match self {
            Command::Bonds => Some(BondAction::ShowList),
            Command::Start | Command::Help => None,
        }
    }

    /// Canonical name, without the leading slash
    pub fn name(self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::Bonds => "bonds",
        }
    }

    /// Menu entry text
    pub fn description(self) -> &'static str {
        match self {
            Command::Start => "Приветствие и описание",
            Command::Help => "Список команд",
            Command::Bonds => "Топ надёжных облигаций",
        }
    }
}

/// A user action on the list/detail flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BondAction {
    ShowList,
    SelectInstrument(String),
    Refresh,
    Back,
}

impl BondAction {
    /// Decode callback data from an inline button
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            ACTION_REFRESH => Some(BondAction::Refresh),
            ACTION_BACK => Some(BondAction::Back),
            other => other
                .strip_prefix(ACTION_SELECT_PREFIX)
                .filter(|id| !id.is_empty())
                .map(|id| BondAction::SelectInstrument(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("  /HELP  "), Some(Command::Help));
        assert_eq!(Command::parse("/bonds@MoexBondsBot"), Some(Command::Bonds));
        assert_eq!(Command::parse("/bonds extra args"), Some(Command::Bonds));
    }

    #[test]
    fn test_parse_non_commands() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("bonds"), None);
        assert_eq!(Command::parse("/unknown"), None);
        assert_eq!(Command::parse("/"), None);
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(BondAction::parse("refresh"), Some(BondAction::Refresh));
        assert_eq!(BondAction::parse("back_to_list"), Some(BondAction::Back));
        assert_eq!(
            BondAction::parse("bond_SU26219RMFS6"),
            Some(BondAction::SelectInstrument("SU26219RMFS6".to_string()))
        );
        assert_eq!(BondAction::parse("bond_"), None);
        assert_eq!(BondAction::parse("show_more"), None);
    }

    #[test]
    fn test_menu_names_parse_back() {
        for command in Command::ALL {
            assert_eq!(Command::parse(&format!("/{}", command.name())), Some(command));
            assert!(!command.description().is_empty());
        }
    }

    #[test]
    fn test_command_to_action() {
        assert_eq!(Command::Bonds.action(), Some(BondAction::ShowList));
        assert_eq!(Command::Start.action(), None);
    }
}
