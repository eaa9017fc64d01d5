//! Keyboard navigation demo
//!
//! Shows the three keyboard kinds a Telegram bot can attach: a reply
//! keyboard, inline URL buttons, and inline callback buttons that edit the
//! message they sit on.

pub mod handlers;
pub mod keyboards;

pub use handlers::{CallbackReply, DemoAction, Inbound, on_action, reply};
