//! Credential Relay Gateway
//!
//! Server-side relay in front of The Graph Token API:
//! - `relay`: credential and path checks, single upstream call, verbatim pass-through
//! - `upstream`: reqwest client for the Token API host
//! - `server`: axum routes exposing the relay over HTTP

mod relay;
mod server;
mod upstream;

pub use relay::{Gateway, GatewayError, PATH_PARAM, TRANSPORT_FAILURE};
pub use server::{router, serve, CREDENTIAL_HEADER, RELAY_ROUTE};
pub use upstream::{ReqwestUpstream, UpstreamConfig, TOKEN_API_BASE_URL};
