//! Result types produced by the scan and research pipelines

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;

use super::chain::ChainDescriptor;

/// Placeholder for a token symbol upstream did not provide
pub const UNKNOWN_SYMBOL: &str = "?";

/// Settlement state of a per-chain balance lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceState {
    Pending,
    Ready,
    Failed,
}

/// Native gas-token balance on one chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NativeBalance {
    pub chain: &'static ChainDescriptor,
    pub amount: f64,
    pub state: BalanceState,
    /// Failure reason, only set when `state` is `Failed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NativeBalance {
    pub fn pending(chain: &'static ChainDescriptor) -> Self {
        Self {
            chain,
            amount: 0.0,
            state: BalanceState::Pending,
            error: None,
        }
    }

    /// Settle a pending balance with the outcome of its lookup.
    ///
    /// A balance settles once: calling this on a `Ready` or `Failed` balance
    /// returns it unchanged.
    pub fn settle<E: fmt::Display>(self, outcome: Result<f64, E>) -> Self {
        if self.state != BalanceState::Pending {
            return self;
        }
        match outcome {
            Ok(amount) => Self {
                amount,
                state: BalanceState::Ready,
                ..self
            },
            Err(e) => Self {
                amount: 0.0,
                state: BalanceState::Failed,
                error: Some(e.to_string()),
                ..self
            },
        }
    }

    pub fn chain_id(&self) -> &'static str {
        self.chain.id
    }

    pub fn is_ready(&self) -> bool {
        self.state == BalanceState::Ready
    }

    pub fn is_failed(&self) -> bool {
        self.state == BalanceState::Failed
    }
}

/// ERC-20 balance held by a wallet on the selected chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenHolding {
    pub symbol: String,
    pub name: String,
    pub contract_address: String,
    pub amount: f64,
    pub decimals: u8,
}

/// Top holder of a token contract
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Holder {
    pub address: String,
    /// Raw balance as reported upstream
    pub amount: String,
    pub symbol: String,
    pub usd_value: f64,
}

/// Token side of a liquidity pool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PoolToken {
    pub symbol: Option<String>,
    pub address: Option<String>,
}

impl PoolToken {
    pub fn symbol_or_placeholder(&self) -> &str {
        self.symbol
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SYMBOL)
    }
}

/// Liquidity pool that trades the researched token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolInfo {
    pub pool_address: String,
    /// Protocol text exactly as upstream sent it
    pub protocol_raw: String,
    pub input_token: PoolToken,
    pub output_token: PoolToken,
}

impl PoolInfo {
    /// Pair label such as `USDT/WETH`, with `?` for unknown symbols
    pub fn pair_label(&self) -> String {
        format!(
            "{}/{}",
            self.input_token.symbol_or_placeholder(),
            self.output_token.symbol_or_placeholder()
        )
    }
}

/// Daily candle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OhlcBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Sort bars into ascending date order, as charting requires
pub fn sort_bars_ascending(bars: &mut [OhlcBar]) {
    bars.sort_by_key(|bar| bar.date);
}

/// Swap executed in a pool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapEvent {
    pub timestamp: Option<DateTime<Utc>>,
    pub input_token: String,
    pub input_amount: f64,
    pub output_token: String,
    pub output_amount: f64,
    pub tx_hash: Option<String>,
}

/// Date range requested for a pool's price history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OhlcWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Number of daily buckets requested
    pub buckets: u32,
}

impl OhlcWindow {
    /// Window of `days` daily buckets ending on `today`
    pub fn trailing_days(today: NaiveDate, days: u32) -> Self {
        Self {
            start: today - Duration::days(i64::from(days)),
            end: today,
            buckets: days,
        }
    }

    pub fn start_param(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}
