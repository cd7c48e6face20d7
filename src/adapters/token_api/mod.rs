//! Token API Adapter
//!
//! Typed client for The Graph Token API EVM endpoints.
//! Builds requests, sends them through a gateway, and decodes the responses.

mod client;
mod http;
pub mod requests;
mod responses;

pub use client::TokenApiClient;
pub use http::{HttpGatewayClient, HttpGatewayConfig};
