//! Token API Request Builders
//!
//! One builder per upstream endpoint. Each turns a typed query into the
//! upstream path and its ordered query parameters.

use crate::ports::{
    ApiRequest, HoldersQuery, NativeBalanceQuery, OhlcQuery, PoolsQuery, SwapsQuery,
    TokenBalancesQuery,
};

pub const NATIVE_BALANCE_PATH: &str = "/v1/evm/balances/native";
pub const TOKEN_BALANCES_PATH: &str = "/v1/evm/balances";
pub const HOLDERS_PATH: &str = "/v1/evm/holders";
pub const POOLS_PATH: &str = "/v1/evm/pools";
pub const OHLC_PATH: &str = "/v1/evm/pools/ohlc";
pub const SWAPS_PATH: &str = "/v1/evm/swaps";

/// Page sizes used when callers do not override them
pub const DEFAULT_TOKEN_LIMIT: u32 = 20;
pub const DEFAULT_HOLDERS_LIMIT: u32 = 10;
pub const DEFAULT_POOLS_LIMIT: u32 = 5;
pub const DEFAULT_SWAPS_LIMIT: u32 = 10;

/// Daily candles
pub const DAILY_INTERVAL: &str = "1d";

pub fn native_balance(query: &NativeBalanceQuery) -> ApiRequest {
    ApiRequest::new(NATIVE_BALANCE_PATH)
        .param("network", &query.network)
        .param("address", &query.address)
}

pub fn token_balances(query: &TokenBalancesQuery) -> ApiRequest {
    ApiRequest::new(TOKEN_BALANCES_PATH)
        .param("network", &query.network)
        .param("address", &query.address)
        .param("limit", query.limit.to_string())
}

pub fn holders(query: &HoldersQuery) -> ApiRequest {
    ApiRequest::new(HOLDERS_PATH)
        .param("network", &query.network)
        .param("contract", &query.contract)
        .param("limit", query.limit.to_string())
}

pub fn pools(query: &PoolsQuery) -> ApiRequest {
    ApiRequest::new(POOLS_PATH)
        .param("network", &query.network)
        .param("input_token", &query.input_token)
        .param("limit", query.limit.to_string())
}

pub fn ohlc(query: &OhlcQuery) -> ApiRequest {
    ApiRequest::new(OHLC_PATH)
        .param("network", &query.network)
        .param("pool", &query.pool)
        .param("interval", &query.interval)
        .param("start_time", query.window.start_param())
        .param("end_time", query.window.end_param())
        .param("limit", query.window.buckets.to_string())
}

pub fn swaps(query: &SwapsQuery) -> ApiRequest {
    let request = ApiRequest::new(SWAPS_PATH)
        .param("network", &query.network)
        .param("limit", query.limit.to_string());
    match &query.pool {
        Some(pool) => request.param("pool", pool),
        None => request,
    }
}
