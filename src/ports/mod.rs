//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement:
//! - Token data access (typed Token API endpoints)
//! - The credential relay (client and upstream sides)
//! - The time source used to anchor price-history windows

pub mod clock;
pub mod gateway;
pub mod token_data;

#[cfg(test)]
pub mod mocks;

pub use clock::{Clock, FixedClock, SystemClock};
pub use gateway::{ApiRequest, GatewayPort, RelayResponse, TransportError, UpstreamPort};
pub use token_data::{
    ApiError, Credential, HoldersQuery, NativeBalanceQuery, OhlcQuery, PoolsQuery, SwapsQuery,
    TokenBalancesQuery, TokenDataPort,
};
