//! Wallet Scan Pipeline
//!
//! One native-balance lookup per registered chain, all in flight at once, next
//! to a best-effort ERC-20 holdings fetch for the selected chain. A failing
//! chain settles as `Failed` in its own slot and never affects the others.

use futures::future::join_all;
use serde::Serialize;

use crate::adapters::token_api::requests::DEFAULT_TOKEN_LIMIT;
use crate::domain::{ChainDescriptor, NativeBalance, TokenHolding, CHAINS};
use crate::ports::{Credential, NativeBalanceQuery, TokenBalancesQuery, TokenDataPort};

use super::{require_chain, require_input, PipelineError};

/// Tunables for a wallet scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Maximum ERC-20 holdings requested for the selected chain
    pub token_limit: u32,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            token_limit: DEFAULT_TOKEN_LIMIT,
        }
    }
}

/// Outcome of a wallet scan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletScan {
    pub address: String,
    pub selected_chain: &'static ChainDescriptor,
    /// One entry per registered chain, in registry order
    pub balances: Vec<NativeBalance>,
    /// ERC-20 holdings on `selected_chain`; empty when unavailable
    pub holdings: Vec<TokenHolding>,
}

impl WalletScan {
    /// All chains `Pending`, no holdings yet
    pub fn pending(address: impl Into<String>, selected_chain: &'static ChainDescriptor) -> Self {
        Self {
            address: address.into(),
            selected_chain,
            balances: CHAINS.iter().map(NativeBalance::pending).collect(),
            holdings: Vec::new(),
        }
    }

    pub fn ready_count(&self) -> usize {
        self.balances.iter().filter(|b| b.is_ready()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.balances.iter().filter(|b| b.is_failed()).count()
    }

    pub fn balance_for(&self, chain_id: &str) -> Option<&NativeBalance> {
        self.balances.iter().find(|b| b.chain_id() == chain_id)
    }
}

/// Runs wallet scans against a token data source
pub struct WalletScanner<P> {
    data: P,
    options: ScanOptions,
}

impl<P: TokenDataPort> WalletScanner<P> {
    pub fn new(data: P) -> Self {
        Self {
            data,
            options: ScanOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    pub fn data(&self) -> &P {
        &self.data
    }

    /// Scan `address` on every registered chain.
    ///
    /// Partial failure is never an error: each chain reports its own state.
    /// Errors are returned only for a blank address or an unknown selected chain.
    pub async fn scan(
        &self,
        credential: &Credential,
        address: &str,
        selected_chain: &str,
    ) -> Result<WalletScan, PipelineError> {
        let address = require_input(address, "address")?;
        let selected = require_chain(selected_chain)?;

        tracing::info!(
            chains = CHAINS.len(),
            selected = selected.id,
            "Scanning wallet {}",
            address
        );

        let balances = join_all(
            CHAINS
                .iter()
                .map(|chain| self.native_balance(credential, chain, &address)),
        );
        let holdings = self.holdings(credential, selected, &address);

        let (balances, holdings) = tokio::join!(balances, holdings);

        let scan = WalletScan {
            address,
            selected_chain: selected,
            balances,
            holdings,
        };

        tracing::info!(
            ready = scan.ready_count(),
            failed = scan.failed_count(),
            holdings = scan.holdings.len(),
            "Wallet scan complete"
        );

        Ok(scan)
    }

    async fn native_balance(
        &self,
        credential: &Credential,
        chain: &'static ChainDescriptor,
        address: &str,
    ) -> NativeBalance {
        let query = NativeBalanceQuery {
            network: chain.id.to_string(),
            address: address.to_string(),
        };

        let outcome = self
            .data
            .native_balance(credential, &query)
            .await
            .map(|amount| amount.unwrap_or(0.0));

        match &outcome {
            Ok(amount) => tracing::debug!(chain = chain.id, amount, "Native balance ready"),
            Err(e) => tracing::warn!(chain = chain.id, error = %e, "Native balance failed"),
        }

        NativeBalance::pending(chain).settle(outcome)
    }

    async fn holdings(
        &self,
        credential: &Credential,
        chain: &'static ChainDescriptor,
        address: &str,
    ) -> Vec<TokenHolding> {
        let query = TokenBalancesQuery {
            network: chain.id.to_string(),
            address: address.to_string(),
            limit: self.options.token_limit,
        };

        match self.data.token_balances(credential, &query).await {
            Ok(holdings) => holdings,
            Err(e) => {
                tracing::debug!(chain = chain.id, error = %e, "Token holdings unavailable");
                Vec::new()
            }
        }
    }
}
