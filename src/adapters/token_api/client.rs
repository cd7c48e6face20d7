//! Token API Client
//!
//! Typed access to the Token API through a gateway. Builds each request,
//! relays it with the caller's credential, and decodes the response envelope.

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Instant;

use crate::domain::{Holder, OhlcBar, PoolInfo, SwapEvent, TokenHolding};
use crate::ports::{
    ApiError, ApiRequest, Credential, GatewayPort, HoldersQuery, NativeBalanceQuery, OhlcQuery,
    PoolsQuery, RelayResponse, SwapsQuery, TokenBalancesQuery, TokenDataPort,
};

use super::requests;
use super::responses::{
    decode_rows, error_message, native_amount, HolderRow, NativeBalanceRow, OhlcRow, PoolRow,
    SwapRow, TokenBalanceRow,
};

/// Token API client over any gateway
#[derive(Debug, Clone)]
pub struct TokenApiClient<G> {
    gateway: G,
}

impl<G: GatewayPort> TokenApiClient<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Relay a request and return the body of a 2xx answer
    async fn fetch(&self, credential: &Credential, request: ApiRequest) -> Result<Bytes, ApiError> {
        let started = Instant::now();
        let response = self.gateway.send(credential, &request).await?;

        tracing::debug!(
            path = %request.path,
            network = request.get("network").unwrap_or("-"),
            status = response.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Token API response"
        );

        if !response.is_success() {
            return Err(status_error(&response));
        }
        Ok(response.body)
    }
}

fn status_error(response: &RelayResponse) -> ApiError {
    ApiError::Upstream {
        status: response.status,
        message: error_message(&response.body)
            .unwrap_or_else(|| format!("API error {}", response.status)),
    }
}

#[async_trait]
impl<G: GatewayPort> TokenDataPort for TokenApiClient<G> {
    async fn native_balance(
        &self,
        credential: &Credential,
        query: &NativeBalanceQuery,
    ) -> Result<Option<f64>, ApiError> {
        let body = self.fetch(credential, requests::native_balance(query)).await?;
        let rows: Vec<NativeBalanceRow> = decode_rows(&body)?;
        Ok(native_amount(&rows))
    }

    async fn token_balances(
        &self,
        credential: &Credential,
        query: &TokenBalancesQuery,
    ) -> Result<Vec<TokenHolding>, ApiError> {
        let body = self.fetch(credential, requests::token_balances(query)).await?;
        let rows: Vec<TokenBalanceRow> = decode_rows(&body)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn holders(
        &self,
        credential: &Credential,
        query: &HoldersQuery,
    ) -> Result<Vec<Holder>, ApiError> {
        let body = self.fetch(credential, requests::holders(query)).await?;
        let rows: Vec<HolderRow> = decode_rows(&body)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn pools(
        &self,
        credential: &Credential,
        query: &PoolsQuery,
    ) -> Result<Vec<PoolInfo>, ApiError> {
        let body = self.fetch(credential, requests::pools(query)).await?;
        let rows: Vec<PoolRow> = decode_rows(&body)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ohlc(
        &self,
        credential: &Credential,
        query: &OhlcQuery,
    ) -> Result<Vec<OhlcBar>, ApiError> {
        let body = self.fetch(credential, requests::ohlc(query)).await?;
        let rows: Vec<OhlcRow> = decode_rows(&body)?;
        Ok(rows.into_iter().filter_map(OhlcRow::into_bar).collect())
    }

    async fn swaps(
        &self,
        credential: &Credential,
        query: &SwapsQuery,
    ) -> Result<Vec<SwapEvent>, ApiError> {
        let body = self.fetch(credential, requests::swaps(query)).await?;
        let rows: Vec<SwapRow> = decode_rows(&body)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
