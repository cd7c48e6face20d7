//! Credential Relay
//!
//! Forwards one Token API request per call. The caller's credential becomes the
//! upstream bearer token, the `path` parameter selects the upstream route, and
//! every other query parameter is passed on in its original order. Status and
//! body come back untouched.

use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;

use crate::ports::{
    ApiError, ApiRequest, Credential, GatewayPort, RelayResponse, UpstreamPort,
};

/// Query parameter naming the upstream route
pub const PATH_PARAM: &str = "path";

/// Error text of a 502 raised by the relay when the upstream is unreachable
pub const TRANSPORT_FAILURE: &str = "API request failed";

/// Errors raised by the relay itself, before or instead of an upstream answer
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Missing JWT")]
    Unauthorized,

    #[error("Missing path")]
    BadRequest,

    #[error("API request failed: {0}")]
    Transport(String),
}

impl GatewayError {
    /// HTTP status reported to the caller
    pub fn status(&self) -> u16 {
        match self {
            GatewayError::Unauthorized => 401,
            GatewayError::BadRequest => 400,
            GatewayError::Transport(_) => 502,
        }
    }

    /// JSON error body; transport details stay in the logs
    pub fn body(&self) -> serde_json::Value {
        let message = match self {
            GatewayError::Transport(_) => TRANSPORT_FAILURE.to_string(),
            other => other.to_string(),
        };
        json!({ "error": message })
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Unauthorized => ApiError::Unauthorized,
            GatewayError::BadRequest => ApiError::BadRequest("missing upstream path".to_string()),
            GatewayError::Transport(reason) => ApiError::Transport(reason),
        }
    }
}

/// Transparent relay in front of the Token API
#[derive(Debug, Clone)]
pub struct Gateway<U> {
    upstream: U,
}

impl<U: UpstreamPort> Gateway<U> {
    pub fn new(upstream: U) -> Self {
        Self { upstream }
    }

    pub fn upstream(&self) -> &U {
        &self.upstream
    }

    /// Relay one request.
    ///
    /// `query` is the caller's full query string in order, including `path`.
    /// Missing credential or path fails without touching the upstream.
    pub async fn forward(
        &self,
        credential: Option<&str>,
        query: Vec<(String, String)>,
    ) -> Result<RelayResponse, GatewayError> {
        let bearer = credential
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(GatewayError::Unauthorized)?;

        // Blank check only; the value is forwarded as received
        let path = query
            .iter()
            .find(|(key, _)| key == PATH_PARAM)
            .map(|(_, value)| value.clone())
            .filter(|p| !p.trim().is_empty())
            .ok_or(GatewayError::BadRequest)?;

        let forwarded: Vec<(String, String)> = query
            .into_iter()
            .filter(|(key, _)| key != PATH_PARAM)
            .collect();

        match self.upstream.fetch(&path, forwarded, bearer).await {
            Ok(response) => {
                tracing::debug!(path = %path, status = response.status, "Relayed upstream response");
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Upstream request failed");
                Err(GatewayError::Transport(e.0))
            }
        }
    }
}

#[async_trait]
impl<U: UpstreamPort> GatewayPort for Gateway<U> {
    async fn send(
        &self,
        credential: &Credential,
        request: &ApiRequest,
    ) -> Result<RelayResponse, ApiError> {
        let mut query = Vec::with_capacity(request.params.len() + 1);
        query.push((PATH_PARAM.to_string(), request.path.clone()));
        query.extend(request.params.iter().cloned());

        self.forward(Some(credential.expose()), query)
            .await
            .map_err(ApiError::from)
    }
}
