//! Bond eligibility filtering and ranking
//!
//! [`Screener::filter_and_rank`] is a pure function over one fetched record
//! set. Predicates run in a fixed order, derived fields are computed for the
//! survivors, and the result is stably sorted by `(tier, -coupon)` and
//! truncated to the requested size.

pub mod rules;

use crate::config::{ScreenerConfig, ScreeningProfile};
use crate::model::{BondRecord, RankedBond};
use chrono::NaiveDate;

/// Currency code kept by the domestic profile
pub const DOMESTIC_CURRENCY: &str = "RUB";

const DAYS_PER_YEAR: f64 = 365.0;
const AVERAGE_DAYS_PER_YEAR: f64 = 365.25;

/// Applies the eligibility predicates for one profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Screener {
    profile: ScreeningProfile,
    min_issue_size: f64,
}

impl Default for Screener {
    fn default() -> Self {
        Self::from_config(&ScreenerConfig::default())
    }
}

impl Screener {
    pub fn new(profile: ScreeningProfile, min_issue_size: f64) -> Self {
        Self {
            profile,
            min_issue_size,
        }
    }

    pub fn from_config(config: &ScreenerConfig) -> Self {
        Self::new(config.profile, config.min_issue_size)
    }

    /// Filter and rank against today's local date
    pub fn filter_and_rank(&self, records: &[BondRecord], top_n: usize) -> Vec<RankedBond> {
        self.filter_and_rank_on(records, top_n, chrono::Local::now().date_naive())
    }

    /// Filter and rank against an explicit `today`
    pub fn filter_and_rank_on(
        &self,
        records: &[BondRecord],
        top_n: usize,
        today: NaiveDate,
    ) -> Vec<RankedBond> {
        if top_n == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<RankedBond> = records
            .iter()
            .filter(|r| self.is_eligible(r, today))
            .map(|r| derive(r.clone(), today))
            .collect();

        // sort_by is stable: equal keys keep fetch order
        ranked.sort_by(|a, b| {
            a.rating
                .cmp(&b.rating)
                .then_with(|| b.coupon_percent().total_cmp(&a.coupon_percent()))
        });
        ranked.truncate(top_n);

        tracing::debug!(
            "Screened {} records with {} profile, kept {}",
            records.len(),
            self.profile,
            ranked.len()
        );
        ranked
    }

    /// All predicates, in order
    pub fn is_eligible(&self, record: &BondRecord, today: NaiveDate) -> bool {
        let domestic = self.profile == ScreeningProfile::Domestic;

        !rules::has_offer(record)
            && !rules::has_amortization(record)
            && record.listing_level == Some(1)
            && (!domestic || record.currency.as_deref() == Some(DOMESTIC_CURRENCY))
            && record.coupon_percent.is_some_and(|c| c > 0.0)
            && record.maturity_date.is_some_and(|d| d > today)
            && (!domestic || record.issue_size.is_some_and(|s| s >= self.min_issue_size))
    }
}

fn derive(record: BondRecord, today: NaiveDate) -> RankedBond {
    let rating = rules::rate(&record);
    let coupon_frequency = coupon_frequency(record.coupon_period_days);
    let years_to_maturity = record
        .maturity_date
        .map(|d| years_between(today, d))
        .unwrap_or_default();
    let coupon_cash_value = coupon_cash_value(
        record.face_value,
        record.coupon_percent,
        record.coupon_period_days,
    );

    RankedBond {
        record,
        rating,
        coupon_frequency,
        years_to_maturity,
        coupon_cash_value,
    }
}

/// Coupon payments per year, 0 when the period is unknown
///
/// Halves round to even: a 146-day period gives 2, a 730-day period gives 0.
pub fn coupon_frequency(period_days: Option<u32>) -> u32 {
    match period_days {
        Some(days) if days > 0 => (DAYS_PER_YEAR / f64::from(days)).round_ties_even() as u32,
        _ => 0,
    }
}

/// Years from `from` to `to`, rounded to one decimal
pub fn years_between(from: NaiveDate, to: NaiveDate) -> f64 {
    let days = (to - from).num_days() as f64;
    (days / AVERAGE_DAYS_PER_YEAR * 10.0).round() / 10.0
}

/// Cash paid per coupon: face × rate/100 × period/365, rounded to kopecks
pub fn coupon_cash_value(
    face_value: Option<f64>,
    coupon_percent: Option<f64>,
    period_days: Option<u32>,
) -> Option<f64> {
    let face = face_value.filter(|v| *v > 0.0)?;
    let rate = coupon_percent.filter(|v| *v > 0.0)?;
    let days = period_days.filter(|d| *d > 0)?;

    let value = face * (rate / 100.0) * (f64::from(days) / DAYS_PER_YEAR);
    Some((value * 100.0).round() / 100.0)
}
