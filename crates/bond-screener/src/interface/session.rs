//! Per-chat session state

use crate::model::RankedBond;
use std::collections::HashMap;
use std::sync::RwLock;

/// Where a chat currently is in the list/detail flow
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    ListShown,
    DetailShown { id: String },
}

/// Cached list and state for one chat
#[derive(Debug, Clone, PartialEq)]
pub struct UserSession {
    pub session_id: String,
    pub state: SessionState,
    /// Last ranked list shown; overwritten, never merged
    pub cached: Vec<RankedBond>,
}

impl UserSession {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            state: SessionState::Idle,
            cached: Vec::new(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&RankedBond> {
        self.cached.iter().find(|b| b.id() == id)
    }

    pub fn show_list(&mut self, bonds: Vec<RankedBond>) {
        self.cached = bonds;
        self.state = SessionState::ListShown;
    }

    pub fn show_detail(&mut self, id: impl Into<String>) {
        self.state = SessionState::DetailShown { id: id.into() };
    }

    pub fn back_to_list(&mut self) {
        self.state = SessionState::ListShown;
    }
}

/// Sessions in a process-local map, keyed by chat id
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: RwLock<HashMap<String, UserSession>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing session or a fresh idle one; not stored until [`Self::save`]
    pub fn load(&self, session_id: &str) -> UserSession {
        self.sessions
            .read()
            .ok()
            .and_then(|sessions| sessions.get(session_id).cloned())
            .unwrap_or_else(|| UserSession::new(session_id))
    }

    pub fn save(&self, session: UserSession) {
        match self.sessions.write() {
            Ok(mut sessions) => {
                sessions.insert(session.session_id.clone(), session);
            }
            Err(e) => tracing::warn!("Session lock poisoned: {}", e),
        }
    }
}
