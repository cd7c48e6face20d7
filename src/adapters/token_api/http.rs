//! Remote Gateway Client
//!
//! Talks to a running ChainScope gateway over HTTP: the upstream path travels
//! in the `path` query parameter and the credential in the `x-token-jwt` header.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::{header, Client};

use crate::adapters::gateway::{CREDENTIAL_HEADER, PATH_PARAM, RELAY_ROUTE, TRANSPORT_FAILURE};
use crate::ports::{ApiError, ApiRequest, Credential, GatewayPort, RelayResponse};

use super::responses::relay_error;

/// Remote gateway client configuration
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    /// Gateway base URL, e.g. `http://127.0.0.1:3000`
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HttpGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Gateway reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpGatewayClient {
    config: HttpGatewayConfig,
    http: Client,
}

impl HttpGatewayClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_config(HttpGatewayConfig {
            base_url: base_url.into(),
            ..Default::default()
        })
    }

    pub fn with_config(config: HttpGatewayConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    pub fn relay_url(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), RELAY_ROUTE)
    }
}

#[async_trait]
impl GatewayPort for HttpGatewayClient {
    async fn send(
        &self,
        credential: &Credential,
        request: &ApiRequest,
    ) -> Result<RelayResponse, ApiError> {
        let mut query = Vec::with_capacity(request.params.len() + 1);
        query.push((PATH_PARAM.to_string(), request.path.clone()));
        query.extend(request.params.iter().cloned());

        let response = self
            .http
            .get(self.relay_url())
            .header(CREDENTIAL_HEADER, credential.expose())
            .query(&query)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let response = RelayResponse {
            status,
            content_type,
            body,
        };
        if is_relay_failure(&response) {
            return Err(ApiError::Transport(format!(
                "gateway could not reach upstream for {}",
                request.path
            )));
        }
        Ok(response)
    }
}

/// 502 raised by the gateway itself rather than relayed from upstream
fn is_relay_failure(response: &RelayResponse) -> bool {
    response.status == 502 && relay_error(&response.body).as_deref() == Some(TRANSPORT_FAILURE)
}
