//! Shared utilities for the chat bots
//!
//! This crate provides logging setup and environment-driven configuration
//! helpers used by every bot binary in the workspace.

pub mod config;
pub mod logging;

pub use config::{EnvError, env_or, load_dotenv, optional_env, required_env};
pub use logging::{init_tracing, init_tracing_with_default};
