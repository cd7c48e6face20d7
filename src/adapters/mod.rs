//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Token API: typed client, request builders and wire types
//! - Gateway: credential relay core, Token API upstream, and its HTTP server
//! - CLI: Command-line definitions and output

pub mod cli;
pub mod gateway;
pub mod token_api;

pub use cli::CliApp;
pub use gateway::{Gateway, GatewayError, ReqwestUpstream, UpstreamConfig};
pub use token_api::{HttpGatewayClient, HttpGatewayConfig, TokenApiClient};
