//! Bond bot
//!
//! [`BondBot`] turns commands and button actions into rendered messages. It
//! owns the per-chat sessions and knows nothing about Telegram; the
//! `bond-bot` binary wires it to teloxide.
//!
//! # Example
//!
//! ```rust,ignore
//! use bond_screener::{BondAction, BondBot, MoexClient, ScreenerConfig};
//!
//! let config = ScreenerConfig::from_env()?;
//! let bot = BondBot::new(MoexClient::new(&config)?, &config);
//! let reply = bot.handle("chat-1", BondAction::ShowList).await;
//! println!("{}", reply.text);
//! ```

pub mod commands;

use crate::api::BondSource;
use crate::config::ScreenerConfig;
use crate::error::Result;
use crate::interface::formatter::{self, FETCH_FAILED, NOT_IN_LIST, STALE_LIST};
use crate::interface::{SessionManager, SessionState};
use crate::model::RankedBond;
use crate::screener::Screener;
use bot_core::FormattedMessage;

pub use commands::{BondAction, Command};

/// Chat-platform-neutral bond bot
pub struct BondBot<S> {
    source: S,
    screener: Screener,
    top_n: usize,
    sessions: SessionManager,
}

impl<S: BondSource> BondBot<S> {
    pub fn new(source: S, config: &ScreenerConfig) -> Self {
        Self {
            source,
            screener: Screener::from_config(config),
            top_n: config.top_n,
            sessions: SessionManager::new(),
        }
    }

    /// Current state of a chat session
    pub fn state(&self, session_id: &str) -> SessionState {
        self.sessions.load(session_id).state
    }

    /// Cached list of a chat session
    pub fn cached(&self, session_id: &str) -> Vec<RankedBond> {
        self.sessions.load(session_id).cached
    }

    /// Reply to a slash command
    pub async fn handle_command(&self, session_id: &str, command: Command) -> FormattedMessage {
        match command.action() {
            Some(action) => self.handle(session_id, action).await,
            None if command == Command::Start => formatter::render_welcome(self.top_n),
            None => formatter::render_help(),
        }
    }

    /// Apply one action to a session and render the reply
    ///
    /// Upstream failures become a fixed apology; the session is then left
    /// exactly as it was.
    pub async fn handle(&self, session_id: &str, action: BondAction) -> FormattedMessage {
        tracing::debug!("Session {} action {:?}", session_id, action);

        let result = match action {
            BondAction::ShowList | BondAction::Refresh => self.show_list(session_id).await,
            BondAction::SelectInstrument(id) => self.select_instrument(session_id, &id).await,
            BondAction::Back => Ok(self.back(session_id)),
        };

        result.unwrap_or_else(|e| {
            tracing::warn!("Session {} action failed: {}", session_id, e);
            formatter::render_error(FETCH_FAILED)
        })
    }

    async fn show_list(&self, session_id: &str) -> Result<FormattedMessage> {
        let records = self.source.fetch_all_bonds().await?;
        let ranked = self.screener.filter_and_rank(&records, self.top_n);
        tracing::info!(
            "Session {}: {} of {} bonds passed screening",
            session_id,
            ranked.len(),
            records.len()
        );

        let reply = formatter::render_summary(&ranked);
        let mut session = self.sessions.load(session_id);
        session.show_list(ranked);
        self.sessions.save(session);
        Ok(reply)
    }

    async fn select_instrument(&self, session_id: &str, id: &str) -> Result<FormattedMessage> {
        let session = self.sessions.load(session_id);
        if session.cached.is_empty() {
            return Ok(formatter::render_error(STALE_LIST));
        }
        let Some(bond) = session.find(id).cloned() else {
            tracing::debug!("Session {}: {} not in cached list", session_id, id);
            return Ok(formatter::render_error(NOT_IN_LIST));
        };

        let detail = self.source.fetch_bond_detail(id).await?;
        let reply = formatter::render_detail(&bond, &detail);

        // Reload: the session may have been saved while the detail was in flight
        let mut session = self.sessions.load(session_id);
        session.show_detail(id);
        self.sessions.save(session);
        Ok(reply)
    }

    fn back(&self, session_id: &str) -> FormattedMessage {
        let mut session = self.sessions.load(session_id);
        if session.cached.is_empty() {
            return formatter::render_error(STALE_LIST);
        }

        tracing::debug!("Session {}: re-rendering cached list", session_id);
        let reply = formatter::render_summary(&session.cached);
        session.back_to_list();
        self.sessions.save(session);
        reply
    }
}

/// Text shown while an action is in flight, if it needs one
pub fn placeholder(action: &BondAction) -> Option<String> {
    match action {
        BondAction::ShowList => Some(formatter::LOADING_LIST.to_string()),
        BondAction::Refresh => Some(formatter::REFRESHING_LIST.to_string()),
        BondAction::SelectInstrument(id) => Some(formatter::loading_detail(id)),
        BondAction::Back => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockBondSource;
    use crate::error::ScreenerError;
    use crate::model::{BondDetail, BondRecord};
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    const CHAT: &str = "100500";

    fn record(id: &str, short: &str, issuer: &str, coupon: f64) -> BondRecord {
        BondRecord {
            listing_level: Some(1),
            currency: Some("RUB".to_string()),
            coupon_percent: Some(coupon),
            coupon_period_days: Some(182),
            issue_size: Some(5e10),
            face_value: Some(1000.0),
            maturity_date: NaiveDate::from_ymd_opt(2099, 1, 1),
            ..BondRecord::new(id, short, issuer)
        }
    }

    fn listing() -> Vec<BondRecord> {
        vec![
            record("RU000A0JX0J2", "РЖД 1Р-01R", "ОАО РЖД", 8.5),
            record("SU26219RMFS6", "ОФЗ 26219", "ОФЗ-ПД 26219", 7.7),
            record("RU000A0ZZ000", "Ромашка 1", "ООО Ромашка оферта", 20.0),
        ]
    }

    fn detail() -> BondDetail {
        let mut detail = BondDetail::default();
        detail.insert("ISIN", "RU000A0JWM07");
        detail
    }

    fn bot(source: MockBondSource) -> BondBot<MockBondSource> {
        BondBot::new(source, &ScreenerConfig::default())
    }

    #[tokio::test]
    async fn test_show_select_back_reuses_cache() {
        let mut source = MockBondSource::new();
        source
            .expect_fetch_all_bonds()
            .times(1)
            .returning(|| Ok(listing()));
        source
            .expect_fetch_bond_detail()
            .with(eq("SU26219RMFS6"))
            .times(1)
            .returning(|_| Ok(detail()));
        let bot = bot(source);

        let first = bot.handle(CHAT, BondAction::ShowList).await;
        assert_eq!(bot.state(CHAT), SessionState::ListShown);
        assert_eq!(
            first.actions()[0],
            ("1. SU26219RMFS6 (7.7%)", "bond_SU26219RMFS6")
        );
        assert_eq!(bot.cached(CHAT).len(), 2);

        let card = bot
            .handle(CHAT, BondAction::SelectInstrument("SU26219RMFS6".to_string()))
            .await;
        assert!(card.text.contains("RU000A0JWM07"));
        assert_eq!(
            bot.state(CHAT),
            SessionState::DetailShown {
                id: "SU26219RMFS6".to_string()
            }
        );

        let back = bot.handle(CHAT, BondAction::Back).await;
        assert_eq!(back, first);
        assert_eq!(bot.state(CHAT), SessionState::ListShown);
    }

    #[tokio::test]
    async fn test_refresh_fetches_again() {
        let mut source = MockBondSource::new();
        source
            .expect_fetch_all_bonds()
            .times(2)
            .returning(|| Ok(listing()));
        let bot = bot(source);

        let first = bot.handle(CHAT, BondAction::ShowList).await;
        let refreshed = bot.handle(CHAT, BondAction::Refresh).await;
        assert_eq!(first, refreshed);
    }

    #[tokio::test]
    async fn test_select_without_list_is_stale() {
        let bot = bot(MockBondSource::new());

        let reply = bot
            .handle(CHAT, BondAction::SelectInstrument("SU26219RMFS6".to_string()))
            .await;
        assert_eq!(reply.text, STALE_LIST);
        assert_eq!(bot.state(CHAT), SessionState::Idle);

        let reply = bot.handle(CHAT, BondAction::Back).await;
        assert_eq!(reply.text, STALE_LIST);
    }

    #[tokio::test]
    async fn test_select_unknown_id() {
        let mut source = MockBondSource::new();
        source
            .expect_fetch_all_bonds()
            .returning(|| Ok(listing()));
        source.expect_fetch_bond_detail().never();
        let bot = bot(source);

        bot.handle(CHAT, BondAction::ShowList).await;
        let reply = bot
            .handle(CHAT, BondAction::SelectInstrument("RU000A0ZZ000".to_string()))
            .await;
        assert_eq!(reply.text, NOT_IN_LIST);
        assert_eq!(bot.state(CHAT), SessionState::ListShown);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_session_untouched() {
        let mut source = MockBondSource::new();
        let mut calls = 0;
        source.expect_fetch_all_bonds().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(listing())
            } else {
                Err(ScreenerError::Fetch("HTTP error: 503".to_string()))
            }
        });
        let bot = bot(source);

        bot.handle(CHAT, BondAction::ShowList).await;
        let cached = bot.cached(CHAT);

        let reply = bot.handle(CHAT, BondAction::Refresh).await;
        assert_eq!(reply.text, FETCH_FAILED);
        assert!(reply.actions().is_empty());
        assert_eq!(bot.state(CHAT), SessionState::ListShown);
        assert_eq!(bot.cached(CHAT), cached);
    }

    #[tokio::test]
    async fn test_detail_failure_keeps_list_state() {
        let mut source = MockBondSource::new();
        source
            .expect_fetch_all_bonds()
            .returning(|| Ok(listing()));
        source
            .expect_fetch_bond_detail()
            .returning(|_| Err(ScreenerError::Parse("missing 'description' block".to_string())));
        let bot = bot(source);

        bot.handle(CHAT, BondAction::ShowList).await;
        let reply = bot
            .handle(CHAT, BondAction::SelectInstrument("SU26219RMFS6".to_string()))
            .await;
        assert_eq!(reply.text, FETCH_FAILED);
        assert_eq!(bot.state(CHAT), SessionState::ListShown);
    }

    #[tokio::test]
    async fn test_empty_result_is_not_an_error() {
        let mut source = MockBondSource::new();
        source.expect_fetch_all_bonds().returning(|| Ok(Vec::new()));
        let bot = bot(source);

        let reply = bot.handle(CHAT, BondAction::ShowList).await;
        assert_eq!(reply.text, formatter::NO_MATCHES);
        assert_eq!(bot.state(CHAT), SessionState::ListShown);

        let reply = bot.handle(CHAT, BondAction::Back).await;
        assert_eq!(reply.text, STALE_LIST);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let mut source = MockBondSource::new();
        source
            .expect_fetch_all_bonds()
            .returning(|| Ok(listing()));
        let bot = bot(source);

        bot.handle("a", BondAction::ShowList).await;
        assert_eq!(bot.state("a"), SessionState::ListShown);
        assert_eq!(bot.state("b"), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_commands() {
        let mut source = MockBondSource::new();
        source
            .expect_fetch_all_bonds()
            .times(1)
            .returning(|| Ok(listing()));
        let bot = bot(source);

        let welcome = bot.handle_command(CHAT, Command::Start).await;
        assert!(welcome.text.contains("/bonds"));
        let help = bot.handle_command(CHAT, Command::Help).await;
        assert!(help.text.contains("/help"));
        assert_eq!(bot.state(CHAT), SessionState::Idle);

        bot.handle_command(CHAT, Command::Bonds).await;
        assert_eq!(bot.state(CHAT), SessionState::ListShown);
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            placeholder(&BondAction::ShowList).as_deref(),
            Some(formatter::LOADING_LIST)
        );
        assert_eq!(
            placeholder(&BondAction::SelectInstrument("X".to_string())).as_deref(),
            Some("⏳ Загружаю информацию о X...")
        );
        assert_eq!(placeholder(&BondAction::Back), None);
    }
}
