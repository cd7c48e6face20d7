//! Gateway ports
//!
//! Two seams around the credential relay:
//! - `GatewayPort`: what the typed client talks to (in-process relay or a remote one)
//! - `UpstreamPort`: the single HTTP call the relay makes to the Token API

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use thiserror::Error;

use super::token_data::{ApiError, Credential};

/// A request routed through the gateway: an upstream path plus its query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub path: String,
    /// Query parameters in the order they must be sent
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body as relayed from upstream, uninterpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RelayResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The upstream could not be reached at all
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("upstream unreachable: {0}")]
pub struct TransportError(pub String);

/// Client-side view of the gateway
#[async_trait]
pub trait GatewayPort: Send + Sync {
    async fn send(
        &self,
        credential: &Credential,
        request: &ApiRequest,
    ) -> Result<RelayResponse, ApiError>;
}

/// Single authenticated GET against the Token API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamPort: Send + Sync {
    async fn fetch(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        bearer: &str,
    ) -> Result<RelayResponse, TransportError>;
}

#[async_trait]
impl<T: GatewayPort + ?Sized> GatewayPort for Arc<T> {
    async fn send(
        &self,
        credential: &Credential,
        request: &ApiRequest,
    ) -> Result<RelayResponse, ApiError> {
        (**self).send(credential, request).await
    }
}

#[async_trait]
impl<T: UpstreamPort + ?Sized> UpstreamPort for Arc<T> {
    async fn fetch(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        bearer: &str,
    ) -> Result<RelayResponse, TransportError> {
        (**self).fetch(path, query, bearer).await
    }
}
