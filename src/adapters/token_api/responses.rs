//! Token API Response Types
//!
//! Wire shapes of the `{"data": [...]}` envelopes returned by the Token API and
//! their conversion into domain types. Upstream fields are frequently missing
//! or typed inconsistently (numbers as strings), so every field is optional and
//! numeric fields accept both forms.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::{Holder, OhlcBar, PoolInfo, PoolToken, SwapEvent, TokenHolding};
use crate::ports::ApiError;

const DEFAULT_DECIMALS: u8 = 18;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Decode the rows of a `{"data": [...]}` envelope
pub fn decode_rows<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, ApiError> {
    serde_json::from_slice::<Envelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pull a human readable message out of an upstream error body
pub fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// The `error` field of a body produced by the gateway itself
pub fn relay_error(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get("error").and_then(Value::as_str).map(str::to_string)
}

#[derive(Debug, Deserialize)]
pub struct NativeBalanceRow {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: Option<f64>,
}

/// First row's value, `None` when upstream has no row
pub fn native_amount(rows: &[NativeBalanceRow]) -> Option<f64> {
    rows.first().map(|row| row.value.unwrap_or(0.0))
}

#[derive(Debug, Deserialize)]
pub struct TokenBalanceRow {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contract: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: Option<f64>,
    #[serde(default)]
    pub decimals: Option<u8>,
}

impl From<TokenBalanceRow> for TokenHolding {
    fn from(row: TokenBalanceRow) -> Self {
        Self {
            symbol: non_empty(row.symbol).unwrap_or_else(|| "???".to_string()),
            name: non_empty(row.name).unwrap_or_else(|| "Unknown".to_string()),
            contract_address: row.contract.unwrap_or_default(),
            amount: row.value.unwrap_or(0.0),
            decimals: row.decimals.unwrap_or(DEFAULT_DECIMALS),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HolderRow {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub amount: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: Option<f64>,
}

impl From<HolderRow> for Holder {
    fn from(row: HolderRow) -> Self {
        Self {
            address: row.address.unwrap_or_default(),
            amount: row.amount.unwrap_or_default(),
            symbol: row.symbol.unwrap_or_default(),
            usd_value: row.value.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TokenRefRow {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl From<TokenRefRow> for PoolToken {
    fn from(row: TokenRefRow) -> Self {
        Self {
            symbol: non_empty(row.symbol),
            address: non_empty(row.address),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PoolRow {
    #[serde(default)]
    pub pool: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub input_token: Option<TokenRefRow>,
    #[serde(default)]
    pub output_token: Option<TokenRefRow>,
}

impl From<PoolRow> for PoolInfo {
    fn from(row: PoolRow) -> Self {
        Self {
            pool_address: row.pool.unwrap_or_default(),
            protocol_raw: row.protocol.unwrap_or_default(),
            input_token: row.input_token.unwrap_or_default().into(),
            output_token: row.output_token.unwrap_or_default().into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OhlcRow {
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub open: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub high: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub low: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub close: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub volume: Option<f64>,
}

impl OhlcRow {
    /// Convert to a bar; rows without a parseable date are dropped
    pub fn into_bar(self) -> Option<OhlcBar> {
        let date = parse_date(self.datetime.as_deref()?)?;
        Some(OhlcBar {
            date,
            open: self.open.unwrap_or(0.0),
            high: self.high.unwrap_or(0.0),
            low: self.low.unwrap_or(0.0),
            close: self.close.unwrap_or(0.0),
            volume: self.volume.unwrap_or(0.0),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SwapRow {
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub input_token: Option<TokenRefRow>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub input_amount: Option<f64>,
    #[serde(default)]
    pub output_token: Option<TokenRefRow>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub output_amount: Option<f64>,
    #[serde(default)]
    pub transaction: Option<String>,
}

impl From<SwapRow> for SwapEvent {
    fn from(row: SwapRow) -> Self {
        let symbol = |token: Option<TokenRefRow>| {
            PoolToken::from(token.unwrap_or_default())
                .symbol_or_placeholder()
                .to_string()
        };
        Self {
            timestamp: row.datetime.as_deref().and_then(parse_timestamp),
            input_token: symbol(row.input_token),
            input_amount: row.input_amount.unwrap_or(0.0),
            output_token: symbol(row.output_token),
            output_amount: row.output_amount.unwrap_or(0.0),
            tx_hash: non_empty(row.transaction),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Date part of an upstream datetime ("2026-10-01 00:00:00" or RFC 3339)
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split([' ', 'T']).next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
