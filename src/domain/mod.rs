//! Domain Layer - Pure types and lookup tables for ChainScope
//!
//! Nothing in here performs I/O. All upstream access goes through the ports layer.
//!
//! - `chain`: the Chain Registry (supported networks and explorer links)
//! - `dex`: DEX protocol normalization and canonical identities
//! - `models`: balances, holdings, holders, pools, candles and swaps
//! - `format`: compact number/address/time formatting for display

pub mod chain;
pub mod dex;
pub mod format;
pub mod models;

pub use chain::{explorer_for, find_chain, is_supported, ChainDescriptor, CHAINS};
pub use dex::{describe_pool, normalize_protocol, resolve_protocol, DexBadge, DexIdentity, DEX_REGISTRY};
pub use models::{
    sort_bars_ascending, BalanceState, Holder, NativeBalance, OhlcBar, OhlcWindow, PoolInfo,
    PoolToken, SwapEvent, TokenHolding,
};
