//! Token API upstream
//!
//! The one outbound HTTP call the relay makes: `GET {base_url}{path}?{query}`
//! with the credential as a bearer token.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::{header, Client};

use crate::ports::{RelayResponse, TransportError, UpstreamPort};

/// Default Token API host
pub const TOKEN_API_BASE_URL: &str = "https://token-api.thegraph.com";

/// Upstream client configuration
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Token API base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: TOKEN_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Token API reached with reqwest
#[derive(Debug, Clone)]
pub struct ReqwestUpstream {
    config: UpstreamConfig,
    http: Client,
}

impl ReqwestUpstream {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(UpstreamConfig::default())
    }

    pub fn with_config(config: UpstreamConfig) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Absolute upstream URL for a path, without the query
    pub fn url_for(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

#[async_trait]
impl UpstreamPort for ReqwestUpstream {
    async fn fetch(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        bearer: &str,
    ) -> Result<RelayResponse, TransportError> {
        let response = self
            .http
            .get(self.url_for(path))
            .bearer_auth(bearer)
            .query(&query)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(RelayResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UpstreamConfig::default();
        assert_eq!(config.base_url, "https://token-api.thegraph.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_url_for_joins_path() {
        let upstream = ReqwestUpstream::with_config(UpstreamConfig {
            base_url: "https://token-api.thegraph.com/".into(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            upstream.url_for("/v1/evm/holders"),
            "https://token-api.thegraph.com/v1/evm/holders"
        );
        assert_eq!(
            upstream.url_for("v1/evm/swaps"),
            "https://token-api.thegraph.com/v1/evm/swaps"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let upstream = ReqwestUpstream::with_config(UpstreamConfig {
            base_url: "http://127.0.0.1:1".into(),
            timeout: Duration::from_secs(2),
        })
        .unwrap();

        let result = upstream.fetch("/v1/evm/holders", Vec::new(), "jwt").await;
        assert!(result.is_err());
    }
}
