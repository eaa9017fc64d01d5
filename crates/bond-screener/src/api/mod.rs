//! Exchange data sources
//!
//! [`BondSource`] is the seam between the bot and the network. The production
//! implementation is [`MoexClient`]; tests substitute a mock.

pub mod moex;

use crate::error::Result;
use crate::model::{BondDetail, BondRecord};
use async_trait::async_trait;

pub use moex::MoexClient;

/// Provider of bond listings and per-bond descriptions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BondSource: Send + Sync {
    /// Fetch every bond on the configured board
    async fn fetch_all_bonds(&self) -> Result<Vec<BondRecord>>;

    /// Fetch the description of a single bond
    async fn fetch_bond_detail(&self, id: &str) -> Result<BondDetail>;
}
