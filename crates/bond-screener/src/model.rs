//! Bond data types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One tradable bond as listed by the exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondRecord {
    /// Exchange ticker (`SECID`)
    pub id: String,
    /// Short display name (`SHORTNAME`)
    pub short_name: String,
    /// Full security / issuer name (`SECNAME`)
    pub issuer_name: String,
    /// Listing level, 1 is the most liquid
    pub listing_level: Option<u8>,
    /// Face value currency, `RUB` for rubles
    pub currency: Option<String>,
    /// Annual coupon rate in percent
    pub coupon_percent: Option<f64>,
    /// Days between coupon payments
    pub coupon_period_days: Option<u32>,
    /// Total issue size in currency units
    pub issue_size: Option<f64>,
    /// Nominal value per bond
    pub face_value: Option<f64>,
    /// Redemption date
    pub maturity_date: Option<NaiveDate>,
    /// Last close yield in percent
    pub yield_close: Option<f64>,
}

impl BondRecord {
    /// Record with only the identifying fields set
    pub fn new(id: impl Into<String>, short_name: impl Into<String>, issuer_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            short_name: short_name.into(),
            issuer_name: issuer_name.into(),
            listing_level: None,
            currency: None,
            coupon_percent: None,
            coupon_period_days: None,
            issue_size: None,
            face_value: None,
            maturity_date: None,
            yield_close: None,
        }
    }
}

/// Issuer reliability tier, most reliable first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RatingTier {
    /// Federal loan bonds
    Sovereign,
    /// State corporations
    StateCorporation,
    /// Systemically important banks
    SystemicBank,
    /// Large corporate issuers
    LargeCorporate,
    /// Everyone else
    Other,
}

impl RatingTier {
    /// Sort ordinal, 1 is the most reliable
    pub fn ordinal(self) -> u8 {
        match self {
            RatingTier::Sovereign => 1,
            RatingTier::StateCorporation => 2,
            RatingTier::SystemicBank => 3,
            RatingTier::LargeCorporate => 4,
            RatingTier::Other => 5,
        }
    }

    /// Full label shown on the detail card
    pub fn label(self) -> &'static str {
        match self {
            RatingTier::Sovereign => "🇷🇺 AAA (ОФЗ)",
            RatingTier::StateCorporation => "🏛️ AA (Госкорп.)",
            RatingTier::SystemicBank => "🏦 A+ (Системный банк)",
            RatingTier::LargeCorporate => "🏭 A (Крупная компания)",
            RatingTier::Other => "📊 BBB (Иные эмитенты)",
        }
    }

    /// Compact badge used in the summary table
    pub fn badge(self) -> &'static str {
        match self {
            RatingTier::Sovereign => "🇷🇺 AAA",
            RatingTier::StateCorporation => "🏛️ AA",
            RatingTier::SystemicBank => "🏦 A+",
            RatingTier::LargeCorporate => "🏭 A",
            RatingTier::Other => "📊 BBB",
        }
    }
}

/// A bond that passed screening, with derived fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedBond {
    pub record: BondRecord,
    pub rating: RatingTier,
    /// Coupon payments per year
    pub coupon_frequency: u32,
    /// Years until redemption, one decimal
    pub years_to_maturity: f64,
    /// Cash paid per coupon per bond
    pub coupon_cash_value: Option<f64>,
}

impl RankedBond {
    pub fn id(&self) -> &str {
        &self.record.id
    }

    /// Coupon rate; always present for screened bonds
    pub fn coupon_percent(&self) -> f64 {
        self.record.coupon_percent.unwrap_or_default()
    }
}

/// Key used for the next coupon date in [`BondDetail`]
pub const NEXT_COUPON_DATE: &str = "next_coupon_date";
/// Key used for the next coupon amount in [`BondDetail`]
pub const NEXT_COUPON_VALUE: &str = "next_coupon_value";

/// Flat description of a single bond
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondDetail {
    pub fields: BTreeMap<String, String>,
}

impl BondDetail {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Next coupon `(date, amount)` if the schedule was available
    pub fn next_coupon(&self) -> Option<(&str, &str)> {
        Some((self.get(NEXT_COUPON_DATE)?, self.get(NEXT_COUPON_VALUE)?))
    }
}
