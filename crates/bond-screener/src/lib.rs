//! MOEX bond screener
//!
//! Finds the most reliable ruble bonds on the Moscow Exchange and serves them
//! through a chat bot:
//!
//! - Listing and per-bond descriptions from the MOEX ISS API ([`MoexClient`])
//! - Offer/amortization exclusion, liquidity and size filters ([`Screener`])
//! - Name-based rating tiers and `(tier, -coupon)` ranking
//! - HTML summary and detail cards with inline buttons ([`interface::formatter`])
//! - Per-chat list/detail navigation backed by a cached list ([`BondBot`])
//!
//! # Example
//!
//! ```rust,ignore
//! use bond_screener::{BondSource, MoexClient, ScreenerConfig, Screener};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ScreenerConfig::from_env()?;
//!     let client = MoexClient::new(&config)?;
//!
//!     let records = client.fetch_all_bonds().await?;
//!     for bond in Screener::from_config(&config).filter_and_rank(&records, config.top_n) {
//!         println!("{} {:.2}%", bond.id(), bond.coupon_percent());
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bot;
pub mod config;
pub mod error;
pub mod interface;
pub mod model;
pub mod screener;

pub use api::{BondSource, MoexClient};
pub use bot::{BondAction, BondBot, Command};
pub use config::{ScreenerConfig, ScreeningProfile};
pub use error::{Result, ScreenerError};
pub use model::{BondDetail, BondRecord, RankedBond, RatingTier};
pub use screener::Screener;
