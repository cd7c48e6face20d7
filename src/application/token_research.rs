//! Token Research Pipeline
//!
//! Stage 1 fetches top holders and liquidity pools side by side. When a pool
//! exists, stage 2 fetches the primary pool's daily candles and recent swaps,
//! again side by side. Every branch degrades to empty on its own.

use serde::Serialize;

use crate::adapters::token_api::requests::{
    DAILY_INTERVAL, DEFAULT_HOLDERS_LIMIT, DEFAULT_POOLS_LIMIT, DEFAULT_SWAPS_LIMIT,
};
use crate::domain::{
    sort_bars_ascending, ChainDescriptor, Holder, OhlcBar, OhlcWindow, PoolInfo, SwapEvent,
};
use crate::ports::{
    ApiError, Clock, Credential, HoldersQuery, OhlcQuery, PoolsQuery, SwapsQuery, SystemClock,
    TokenDataPort,
};

use super::{require_chain, require_input, PipelineError};

/// Days of price history requested for the primary pool
pub const DEFAULT_OHLC_DAYS: u32 = 30;

/// Tunables for token research
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResearchOptions {
    pub holders_limit: u32,
    pub pools_limit: u32,
    pub swaps_limit: u32,
    pub ohlc_days: u32,
}

impl Default for ResearchOptions {
    fn default() -> Self {
        Self {
            holders_limit: DEFAULT_HOLDERS_LIMIT,
            pools_limit: DEFAULT_POOLS_LIMIT,
            swaps_limit: DEFAULT_SWAPS_LIMIT,
            ohlc_days: DEFAULT_OHLC_DAYS,
        }
    }
}

/// A research fetch that can degrade independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchBranch {
    Holders,
    Pools,
    PriceHistory,
    Swaps,
}

impl ResearchBranch {
    pub fn label(&self) -> &'static str {
        match self {
            ResearchBranch::Holders => "holders",
            ResearchBranch::Pools => "pools",
            ResearchBranch::PriceHistory => "price history",
            ResearchBranch::Swaps => "swaps",
        }
    }
}

/// Outcome of researching one token contract
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenResearch {
    pub chain: &'static ChainDescriptor,
    pub contract: String,
    /// Upstream order, largest holder first
    pub holders: Vec<Holder>,
    /// Upstream order; the first entry is the primary pool
    pub pools: Vec<PoolInfo>,
    /// Pair label of the primary pool, e.g. `USDT/WETH`
    pub ticker: Option<String>,
    /// Requested window, present only when stage 2 ran
    pub window: Option<OhlcWindow>,
    /// Ascending by date
    pub price_history: Vec<OhlcBar>,
    pub swaps: Vec<SwapEvent>,
    /// Branches that failed and were replaced by empty results
    pub degraded: Vec<ResearchBranch>,
}

impl TokenResearch {
    pub fn primary_pool(&self) -> Option<&PoolInfo> {
        self.pools.first()
    }

    pub fn is_degraded(&self, branch: ResearchBranch) -> bool {
        self.degraded.contains(&branch)
    }

    /// True when no branch produced any data
    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
            && self.pools.is_empty()
            && self.price_history.is_empty()
            && self.swaps.is_empty()
    }
}

/// Runs token research against a token data source
pub struct TokenResearcher<P, C = SystemClock> {
    data: P,
    clock: C,
    options: ResearchOptions,
}

impl<P: TokenDataPort> TokenResearcher<P> {
    pub fn new(data: P) -> Self {
        Self {
            data,
            clock: SystemClock,
            options: ResearchOptions::default(),
        }
    }
}

impl<P: TokenDataPort, C: Clock> TokenResearcher<P, C> {
    /// Replace the time source anchoring the price-history window
    pub fn with_clock<C2: Clock>(self, clock: C2) -> TokenResearcher<P, C2> {
        TokenResearcher {
            data: self.data,
            clock,
            options: self.options,
        }
    }

    pub fn with_options(mut self, options: ResearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn data(&self) -> &P {
        &self.data
    }

    /// Research `contract` on `chain`.
    ///
    /// Errors only on a blank contract or an unknown chain, before any request.
    pub async fn research(
        &self,
        credential: &Credential,
        chain: &str,
        contract: &str,
    ) -> Result<TokenResearch, PipelineError> {
        let contract = require_input(contract, "contract address")?;
        let chain = require_chain(chain)?;
        let mut degraded = Vec::new();

        tracing::info!(chain = chain.id, "Researching token {}", contract);

        // Stage 1: holders and pools
        let holders_query = HoldersQuery {
            network: chain.id.to_string(),
            contract: contract.clone(),
            limit: self.options.holders_limit,
        };
        let pools_query = PoolsQuery {
            network: chain.id.to_string(),
            input_token: contract.clone(),
            limit: self.options.pools_limit,
        };
        let (holders, pools) = tokio::join!(
            self.data.holders(credential, &holders_query),
            self.data.pools(credential, &pools_query)
        );
        let holders = absorb(holders, ResearchBranch::Holders, chain, &mut degraded);
        let pools = absorb(pools, ResearchBranch::Pools, chain, &mut degraded);

        let mut research = TokenResearch {
            chain,
            contract,
            holders,
            pools,
            ticker: None,
            window: None,
            price_history: Vec::new(),
            swaps: Vec::new(),
            degraded,
        };

        let Some((pool_address, ticker)) = research
            .pools
            .first()
            .map(|pool| (pool.pool_address.clone(), pool.pair_label()))
        else {
            tracing::info!(
                chain = chain.id,
                holders = research.holders.len(),
                "No pools found; skipping price history and swaps"
            );
            return Ok(research);
        };

        // Stage 2: candles and swaps for the primary pool
        let window = OhlcWindow::trailing_days(self.clock.today(), self.options.ohlc_days);
        research.ticker = Some(ticker);
        research.window = Some(window);

        let ohlc_query = OhlcQuery {
            network: chain.id.to_string(),
            pool: pool_address.clone(),
            interval: DAILY_INTERVAL.to_string(),
            window,
        };
        let swaps_query = SwapsQuery {
            network: chain.id.to_string(),
            pool: Some(pool_address.clone()),
            limit: self.options.swaps_limit,
        };
        let (bars, swaps) = tokio::join!(
            self.data.ohlc(credential, &ohlc_query),
            self.data.swaps(credential, &swaps_query)
        );

        let mut bars = absorb(bars, ResearchBranch::PriceHistory, chain, &mut research.degraded);
        sort_bars_ascending(&mut bars);
        research.price_history = bars;
        research.swaps = absorb(swaps, ResearchBranch::Swaps, chain, &mut research.degraded);

        tracing::info!(
            chain = chain.id,
            pool = %pool_address,
            holders = research.holders.len(),
            bars = research.price_history.len(),
            swaps = research.swaps.len(),
            degraded = research.degraded.len(),
            "Token research complete"
        );

        Ok(research)
    }
}

/// Settle one branch, replacing a failure with an empty result
fn absorb<T>(
    outcome: Result<Vec<T>, ApiError>,
    branch: ResearchBranch,
    chain: &ChainDescriptor,
    degraded: &mut Vec<ResearchBranch>,
) -> Vec<T> {
    match outcome {
        Ok(rows) => {
            tracing::debug!(chain = chain.id, ?branch, rows = rows.len(), "Branch settled");
            rows
        }
        Err(e) => {
            tracing::warn!(chain = chain.id, ?branch, error = %e, "Branch degraded to empty");
            degraded.push(branch);
            Vec::new()
        }
    }
}
