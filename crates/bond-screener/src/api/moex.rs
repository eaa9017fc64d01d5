//! MOEX ISS API client
//!
//! ISS answers with tabular blocks: `{"block": {"columns": [...], "data": [[...]]}}`.
//! Cells are looked up by column name, so column order in the response does
//! not matter.

use super::BondSource;
use crate::config::ScreenerConfig;
use crate::error::{Result, ScreenerError};
use crate::model::{BondDetail, BondRecord, NEXT_COUPON_DATE, NEXT_COUPON_VALUE};
use async_trait::async_trait;
use chrono::NaiveDate;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;

const SECURITIES_COLUMNS: &str =
    "SECID,SHORTNAME,SECNAME,ISSUESIZE,COUPONPERCENT,COUPONPERIOD,MATDATE,LISTLEVEL,FACEVALUE,FACEUNIT";
const MARKETDATA_COLUMNS: &str = "SECID,YIELDCLOSE";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// MOEX ISS API client
#[derive(Debug, Clone)]
pub struct MoexClient {
    client: Client,
    base_url: String,
    board: String,
    rate_limiter: SharedRateLimiter,
}

impl MoexClient {
    /// Create a client from a validated configuration
    pub fn new(config: &ScreenerConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN),
        );

        Ok(Self {
            client,
            base_url: config.iss_base_url.trim_end_matches('/').to_string(),
            board: config.board.clone(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// Create a client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(&ScreenerConfig::from_env()?)
    }

    fn securities_url(&self) -> String {
        format!(
            "{}/engines/stock/markets/bonds/boards/{}/securities.json",
            self.base_url, self.board
        )
    }

    fn description_url(&self, id: &str) -> String {
        format!("{}/securities/{id}.json", self.base_url)
    }

    fn coupons_url(&self, id: &str) -> String {
        format!(
            "{}/statistics/engines/stock/markets/bonds/boards/{}/securities/{id}.json",
            self.base_url, self.board
        )
    }

    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value> {
        self.rate_limiter.until_ready().await;

        tracing::debug!("GET {}", url);
        let response = self.client.get(url).query(query).send().await?;

        if !response.status().is_success() {
            return Err(ScreenerError::Fetch(format!(
                "HTTP error: {} for {url}",
                response.status()
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_next_coupon(&self, id: &str) -> Result<Option<(String, String)>> {
        let data = self
            .get_json(&self.coupons_url(id), &[("iss.meta", "off")])
            .await?;
        Ok(parse_next_coupon(&data, chrono::Local::now().date_naive()))
    }
}

#[async_trait]
impl BondSource for MoexClient {
    async fn fetch_all_bonds(&self) -> Result<Vec<BondRecord>> {
        let data = self
            .get_json(
                &self.securities_url(),
                &[
                    ("iss.meta", "off"),
                    ("securities.columns", SECURITIES_COLUMNS),
                    ("marketdata.columns", MARKETDATA_COLUMNS),
                ],
            )
            .await?;

        let records = parse_securities(&data)?;
        tracing::info!("Fetched {} bonds from board {}", records.len(), self.board);
        Ok(records)
    }

    async fn fetch_bond_detail(&self, id: &str) -> Result<BondDetail> {
        let data = self
            .get_json(&self.description_url(id), &[("iss.meta", "off")])
            .await?;
        let mut detail = parse_description(&data)?;

        match self.fetch_next_coupon(id).await {
            Ok(Some((date, value))) => {
                detail.insert(NEXT_COUPON_DATE, date);
                detail.insert(NEXT_COUPON_VALUE, value);
            }
            Ok(None) => tracing::debug!("No coupon schedule for {}", id),
            Err(e) => tracing::warn!("Coupon schedule for {} unavailable: {}", id, e),
        }

        Ok(detail)
    }
}

/// One ISS table with its column index
struct Table<'a> {
    columns: HashMap<&'a str, usize>,
    rows: Vec<&'a [Value]>,
}

impl<'a> Table<'a> {
    fn from_block(block: &'a Value) -> Option<Self> {
        let columns = block
            .get("columns")?
            .as_array()?
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_str().map(|name| (name, i)))
            .collect();
        let rows = block
            .get("data")?
            .as_array()?
            .iter()
            .filter_map(|row| row.as_array().map(Vec::as_slice))
            .collect();
        Some(Self { columns, rows })
    }

    fn index(&self, column: &str) -> Option<usize> {
        self.columns.get(column).copied()
    }

    fn cell<'r>(&self, row: &'r [Value], column: &str) -> Option<&'r Value> {
        row.get(self.index(column)?)
    }
}

fn block<'a>(data: &'a Value, name: &str) -> Option<Table<'a>> {
    data.get(name).and_then(Table::from_block)
}

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn cell_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|v: &f64| v.is_finite())
}

fn cell_non_negative(value: &Value) -> Option<f64> {
    cell_f64(value).filter(|v| *v >= 0.0)
}

fn cell_u32(value: &Value) -> Option<u32> {
    cell_non_negative(value)
        .filter(|v| *v <= f64::from(u32::MAX))
        .map(|v| v.round() as u32)
}

fn cell_date(value: &Value) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.as_str()?.trim(), "%Y-%m-%d").ok()
}

fn normalize_currency(code: String) -> String {
    match code.to_uppercase().as_str() {
        "SUR" | "RUR" => "RUB".to_string(),
        other => other.to_string(),
    }
}

/// Parse the `securities` block, joining yields from `marketdata` by id
pub fn parse_securities(data: &Value) -> Result<Vec<BondRecord>> {
    let securities = block(data, "securities")
        .ok_or_else(|| ScreenerError::Parse("missing 'securities' block".to_string()))?;
    if securities.index("SECID").is_none() {
        return Err(ScreenerError::Parse(
            "'securities' block has no SECID column".to_string(),
        ));
    }

    let yields: HashMap<String, f64> = block(data, "marketdata")
        .map(|md| {
            md.rows
                .iter()
                .filter_map(|&row| {
                    let id = md.cell(row, "SECID").and_then(cell_text)?;
                    let y = md.cell(row, "YIELDCLOSE").and_then(cell_f64)?;
                    Some((id, y))
                })
                .collect()
        })
        .unwrap_or_default();

    let text = |row: &[Value], column: &str| {
        securities
            .cell(row, column)
            .and_then(cell_text)
            .unwrap_or_default()
    };

    let records = securities
        .rows
        .iter()
        .filter_map(|&row| {
            let id = securities.cell(row, "SECID").and_then(cell_text)?;
            let yield_close = yields.get(&id).copied();

            Some(BondRecord {
                short_name: text(row, "SHORTNAME"),
                issuer_name: text(row, "SECNAME"),
                listing_level: securities
                    .cell(row, "LISTLEVEL")
                    .and_then(cell_u32)
                    .and_then(|v| u8::try_from(v).ok()),
                currency: securities
                    .cell(row, "FACEUNIT")
                    .and_then(cell_text)
                    .map(normalize_currency),
                coupon_percent: securities.cell(row, "COUPONPERCENT").and_then(cell_non_negative),
                coupon_period_days: securities.cell(row, "COUPONPERIOD").and_then(cell_u32),
                issue_size: securities.cell(row, "ISSUESIZE").and_then(cell_non_negative),
                face_value: securities.cell(row, "FACEVALUE").and_then(cell_non_negative),
                maturity_date: securities.cell(row, "MATDATE").and_then(cell_date),
                yield_close,
                id,
            })
        })
        .collect();

    Ok(records)
}

/// Parse the `description` block into a flat map
pub fn parse_description(data: &Value) -> Result<BondDetail> {
    let description = block(data, "description")
        .ok_or_else(|| ScreenerError::Parse("missing 'description' block".to_string()))?;

    let key_index = description.index("name").unwrap_or(0);
    let value_index = description.index("value").unwrap_or(1);

    let mut detail = BondDetail::default();
    for row in &description.rows {
        let key = row.get(key_index).and_then(cell_text);
        let value = row.get(value_index).and_then(cell_text);
        if let (Some(key), Some(value)) = (key, value) {
            detail.insert(key, value);
        }
    }
    Ok(detail)
}

/// First coupon dated `today` or later, else the first listed coupon
pub fn parse_next_coupon(data: &Value, today: NaiveDate) -> Option<(String, String)> {
    let coupons = block(data, "coupons")?;
    let date_index = coupons.index("coupondate").unwrap_or(0);
    let value_index = coupons.index("value").unwrap_or(1);

    let entries: Vec<(Option<NaiveDate>, String, String)> = coupons
        .rows
        .iter()
        .filter_map(|row| {
            let raw_date = row.get(date_index)?;
            let date = cell_text(raw_date)?;
            let value = row.get(value_index).and_then(cell_text)?;
            Some((cell_date(raw_date), date, value))
        })
        .collect();

    entries
        .iter()
        .find(|(date, _, _)| date.is_some_and(|d| d >= today))
        .or_else(|| entries.first())
        .map(|(_, date, value)| (date.clone(), value.clone()))
}
