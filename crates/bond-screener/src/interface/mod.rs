//! Chat-facing rendering and session state

pub mod formatter;
pub mod session;

pub use formatter::{render_detail, render_summary};
pub use session::{SessionManager, SessionState, UserSession};
