//! ChainScope - Multi-chain data orchestration over The Graph Token API
//!
//! Scans wallets across every supported EVM chain in parallel and researches
//! tokens (holders, pools, price history, swaps) through a credential relay.
//!
//! # Modules
//!
//! - `domain`: Chain Registry, DEX resolver, result types, display helpers
//! - `ports`: Trait abstractions (TokenDataPort, GatewayPort, UpstreamPort, Clock)
//! - `adapters`: External implementations (Token API client, gateway, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Wallet scan and token research pipelines

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
