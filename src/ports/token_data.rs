//! Token data port
//!
//! The pipelines depend on this trait only. Every method takes the caller's
//! credential explicitly; nothing in the core keeps a "current token".

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::{Holder, OhlcBar, OhlcWindow, PoolInfo, SwapEvent, TokenHolding};

/// Errors surfaced by token data access
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Missing API credential")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Bearer credential for the Token API
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a credential, rejecting blank input
    pub fn new(token: impl Into<String>) -> Result<Self, ApiError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(ApiError::Unauthorized);
        }
        Ok(Self(token))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Native balance of an address on one network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeBalanceQuery {
    pub network: String,
    pub address: String,
}

/// ERC-20 balances of an address on one network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBalancesQuery {
    pub network: String,
    pub address: String,
    pub limit: u32,
}

/// Top holders of a token contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldersQuery {
    pub network: String,
    pub contract: String,
    pub limit: u32,
}

/// Pools that take a token as input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolsQuery {
    pub network: String,
    pub input_token: String,
    pub limit: u32,
}

/// Candles of a pool over a date window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OhlcQuery {
    pub network: String,
    pub pool: String,
    pub interval: String,
    pub window: OhlcWindow,
}

/// Most recent swaps, optionally for one pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapsQuery {
    pub network: String,
    pub pool: Option<String>,
    pub limit: u32,
}

/// Access to the Token API's typed endpoints
#[async_trait]
pub trait TokenDataPort: Send + Sync {
    /// Native balance; `Ok(None)` when upstream has no row for the address
    async fn native_balance(
        &self,
        credential: &Credential,
        query: &NativeBalanceQuery,
    ) -> Result<Option<f64>, ApiError>;

    async fn token_balances(
        &self,
        credential: &Credential,
        query: &TokenBalancesQuery,
    ) -> Result<Vec<TokenHolding>, ApiError>;

    async fn holders(
        &self,
        credential: &Credential,
        query: &HoldersQuery,
    ) -> Result<Vec<Holder>, ApiError>;

    async fn pools(
        &self,
        credential: &Credential,
        query: &PoolsQuery,
    ) -> Result<Vec<PoolInfo>, ApiError>;

    async fn ohlc(
        &self,
        credential: &Credential,
        query: &OhlcQuery,
    ) -> Result<Vec<OhlcBar>, ApiError>;

    async fn swaps(
        &self,
        credential: &Credential,
        query: &SwapsQuery,
    ) -> Result<Vec<SwapEvent>, ApiError>;
}

#[async_trait]
impl<T: TokenDataPort + ?Sized> TokenDataPort for Arc<T> {
    async fn native_balance(
        &self,
        credential: &Credential,
        query: &NativeBalanceQuery,
    ) -> Result<Option<f64>, ApiError> {
        (**self).native_balance(credential, query).await
    }

    async fn token_balances(
        &self,
        credential: &Credential,
        query: &TokenBalancesQuery,
    ) -> Result<Vec<TokenHolding>, ApiError> {
        (**self).token_balances(credential, query).await
    }

    async fn holders(
        &self,
        credential: &Credential,
        query: &HoldersQuery,
    ) -> Result<Vec<Holder>, ApiError> {
        (**self).holders(credential, query).await
    }

    async fn pools(
        &self,
        credential: &Credential,
        query: &PoolsQuery,
    ) -> Result<Vec<PoolInfo>, ApiError> {
        (**self).pools(credential, query).await
    }

    async fn ohlc(
        &self,
        credential: &Credential,
        query: &OhlcQuery,
    ) -> Result<Vec<OhlcBar>, ApiError> {
        (**self).ohlc(credential, query).await
    }

    async fn swaps(
        &self,
        credential: &Credential,
        query: &SwapsQuery,
    ) -> Result<Vec<SwapEvent>, ApiError> {
        (**self).swaps(credential, query).await
    }
}
