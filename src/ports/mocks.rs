use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use async_trait::async_trait;

use crate::domain::{Holder, OhlcBar, PoolInfo, SwapEvent, TokenHolding};
use super::token_data::{
    ApiError, Credential, HoldersQuery, NativeBalanceQuery, OhlcQuery, PoolsQuery, SwapsQuery,
    TokenBalancesQuery, TokenDataPort,
};

fn not_configured() -> ApiError {
    ApiError::Transport("No response configured".to_string())
}

/// Mock token data port that records calls and serves canned responses
#[derive(Debug, Default)]
pub struct MockTokenData {
    calls: Arc<Mutex<Vec<String>>>,
    ohlc_queries: Arc<Mutex<Vec<OhlcQuery>>>,
    swaps_queries: Arc<Mutex<Vec<SwapsQuery>>>,
    in_flight: Arc<Mutex<Vec<String>>>,
    overlaps: Arc<Mutex<Vec<(String, String)>>>,
    completed: Arc<Mutex<Vec<String>>>,
    peak: Arc<Mutex<usize>>,
    latency: Duration,
    network_latency: HashMap<String, Duration>,
    native: HashMap<String, Result<Option<f64>, ApiError>>,
    token_balances: Option<Result<Vec<TokenHolding>, ApiError>>,
    holders: Option<Result<Vec<Holder>, ApiError>>,
    pools: Option<Result<Vec<PoolInfo>, ApiError>>,
    ohlc: Option<Result<Vec<OhlcBar>, ApiError>>,
    swaps: Option<Result<Vec<SwapEvent>, ApiError>>,
}

impl MockTokenData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_native(mut self, network: &str, response: Result<Option<f64>, ApiError>) -> Self {
        self.native.insert(network.to_string(), response);
        self
    }

    /// Delay every call by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Delay calls for one network, overriding the default latency
    pub fn with_network_latency(mut self, network: &str, latency: Duration) -> Self {
        self.network_latency.insert(network.to_string(), latency);
        self
    }

    pub fn with_token_balances(mut self, response: Result<Vec<TokenHolding>, ApiError>) -> Self {
        self.token_balances = Some(response);
        self
    }

    pub fn with_holders(mut self, response: Result<Vec<Holder>, ApiError>) -> Self {
        self.holders = Some(response);
        self
    }

    pub fn with_pools(mut self, response: Result<Vec<PoolInfo>, ApiError>) -> Self {
        self.pools = Some(response);
        self
    }

    pub fn with_ohlc(mut self, response: Result<Vec<OhlcBar>, ApiError>) -> Self {
        self.ohlc = Some(response);
        self
    }

    pub fn with_swaps(mut self, response: Result<Vec<SwapEvent>, ApiError>) -> Self {
        self.swaps = Some(response);
        self
    }

    /// All recorded calls as `endpoint:network`
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls to one endpoint
    pub fn count(&self, endpoint: &str) -> usize {
        let prefix = format!("{}:", endpoint);
        self.get_calls().iter().filter(|c| c.starts_with(&prefix)).count()
    }

    pub fn ohlc_queries(&self) -> Vec<OhlcQuery> {
        self.ohlc_queries.lock().unwrap().clone()
    }

    pub fn swaps_queries(&self) -> Vec<SwapsQuery> {
        self.swaps_queries.lock().unwrap().clone()
    }

    /// Most calls ever in flight at once
    pub fn peak_in_flight(&self) -> usize {
        *self.peak.lock().unwrap()
    }

    /// Whether calls to the two endpoints were ever in flight together
    pub fn overlapped(&self, a: &str, b: &str) -> bool {
        self.overlaps
            .lock()
            .unwrap()
            .iter()
            .any(|(x, y)| (x == a && y == b) || (x == b && y == a))
    }

    /// Calls as `endpoint:network` in the order they finished
    pub fn completion_order(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }

    /// Record the call, then hold it in flight for the configured latency
    async fn record(&self, endpoint: &str, network: &str) {
        let key = format!("{}:{}", endpoint, network);
        self.calls.lock().unwrap().push(key.clone());

        {
            let mut in_flight = self.in_flight.lock().unwrap();
            let mut overlaps = self.overlaps.lock().unwrap();
            for other in in_flight.iter() {
                let other_endpoint = other.split(':').next().unwrap_or_default();
                overlaps.push((other_endpoint.to_string(), endpoint.to_string()));
            }
            in_flight.push(key.clone());
            let mut peak = self.peak.lock().unwrap();
            *peak = (*peak).max(in_flight.len());
        }

        let delay = self
            .network_latency
            .get(network)
            .copied()
            .unwrap_or(self.latency);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        {
            let mut in_flight = self.in_flight.lock().unwrap();
            if let Some(pos) = in_flight.iter().position(|k| k == &key) {
                in_flight.remove(pos);
            }
        }
        self.completed.lock().unwrap().push(key);
    }

    fn canned<T: Clone>(response: &Option<Result<T, ApiError>>) -> Result<T, ApiError> {
        response.clone().unwrap_or_else(|| Err(not_configured()))
    }
}

#[async_trait]
impl TokenDataPort for MockTokenData {
    async fn native_balance(
        &self,
        _credential: &Credential,
        query: &NativeBalanceQuery,
    ) -> Result<Option<f64>, ApiError> {
        self.record("native_balance", &query.network).await;
        self.native
            .get(&query.network)
            .cloned()
            .unwrap_or_else(|| Err(not_configured()))
    }

    async fn token_balances(
        &self,
        _credential: &Credential,
        query: &TokenBalancesQuery,
    ) -> Result<Vec<TokenHolding>, ApiError> {
        self.record("token_balances", &query.network).await;
        Self::canned(&self.token_balances)
    }

    async fn holders(
        &self,
        _credential: &Credential,
        query: &HoldersQuery,
    ) -> Result<Vec<Holder>, ApiError> {
        self.record("holders", &query.network).await;
        Self::canned(&self.holders)
    }

    async fn pools(
        &self,
        _credential: &Credential,
        query: &PoolsQuery,
    ) -> Result<Vec<PoolInfo>, ApiError> {
        self.record("pools", &query.network).await;
        Self::canned(&self.pools)
    }

    async fn ohlc(
        &self,
        _credential: &Credential,
        query: &OhlcQuery,
    ) -> Result<Vec<OhlcBar>, ApiError> {
        self.record("ohlc", &query.network).await;
        self.ohlc_queries.lock().unwrap().push(query.clone());
        Self::canned(&self.ohlc)
    }

    async fn swaps(
        &self,
        _credential: &Credential,
        query: &SwapsQuery,
    ) -> Result<Vec<SwapEvent>, ApiError> {
        self.record("swaps", &query.network).await;
        self.swaps_queries.lock().unwrap().push(query.clone());
        Self::canned(&self.swaps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls() {
        let mock = MockTokenData::new().with_native("base", Ok(Some(1.25)));
        let credential = Credential::new("jwt").unwrap();

        let hit = mock
            .native_balance(
                &credential,
                &NativeBalanceQuery { network: "base".into(), address: "0xabc".into() },
            )
            .await;
        let miss = mock
            .native_balance(
                &credential,
                &NativeBalanceQuery { network: "bsc".into(), address: "0xabc".into() },
            )
            .await;

        assert_eq!(hit, Ok(Some(1.25)));
        assert_eq!(miss, Err(not_configured()));
        assert_eq!(mock.get_calls(), vec!["native_balance:base", "native_balance:bsc"]);
        assert_eq!(mock.count("native_balance"), 2);
        assert_eq!(mock.peak_in_flight(), 1);
        assert_eq!(mock.completion_order(), vec!["native_balance:base", "native_balance:bsc"]);
    }

    #[tokio::test]
    async fn test_mock_tracks_overlap() {
        let mock = MockTokenData::new()
            .with_latency(Duration::from_millis(20))
            .with_native("base", Ok(Some(1.0)))
            .with_holders(Ok(vec![]));
        let credential = Credential::new("jwt").unwrap();
        let native_query = NativeBalanceQuery { network: "base".into(), address: "0xabc".into() };
        let holders_query = HoldersQuery { network: "base".into(), contract: "0xdef".into(), limit: 1 };

        let _ = tokio::join!(
            mock.native_balance(&credential, &native_query),
            mock.holders(&credential, &holders_query)
        );

        assert_eq!(mock.peak_in_flight(), 2);
        assert!(mock.overlapped("native_balance", "holders"));
        assert!(!mock.overlapped("pools", "holders"));
    }
}
