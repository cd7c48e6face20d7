//! Test helpers for ChainScope integration tests
//!
//! Provides a scripted Token API upstream so the full stack (pipelines,
//! typed client, relay) runs without network access.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use chainscope::ports::{RelayResponse, TransportError, UpstreamPort};

/// Canned upstream behavior for one route
#[derive(Debug, Clone)]
pub enum Reply {
    Json(u16, String),
    Unreachable(String),
}

#[derive(Debug, Clone)]
struct Route {
    path: String,
    network: Option<String>,
    reply: Reply,
}

/// One call as seen by the upstream
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub bearer: String,
}

impl RecordedCall {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Scripted upstream
///
/// Routes match on path and, optionally, the `network` parameter. The first
/// matching route wins; anything unrouted answers 404.
///
/// # Example
///
/// ```rust,ignore
/// let upstream = StubUpstream::new()
///     .on_network("/v1/evm/balances/native", "bsc", Reply::Unreachable("timeout".into()))
///     .on("/v1/evm/balances/native", Reply::Json(200, r#"{"data":[{"value":1.0}]}"#.into()));
/// ```
#[derive(Debug, Default)]
pub struct StubUpstream {
    routes: Vec<Route>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, path: &str, reply: Reply) -> Self {
        self.routes.push(Route {
            path: path.to_string(),
            network: None,
            reply,
        });
        self
    }

    pub fn on_network(mut self, path: &str, network: &str, reply: Reply) -> Self {
        self.routes.push(Route {
            path: path.to_string(),
            network: Some(network.to_string()),
            reply,
        });
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.path == path)
            .collect()
    }
}

#[async_trait]
impl UpstreamPort for StubUpstream {
    async fn fetch(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        bearer: &str,
    ) -> Result<RelayResponse, TransportError> {
        let call = RecordedCall {
            path: path.to_string(),
            query,
            bearer: bearer.to_string(),
        };
        let network = call.param("network").map(str::to_string);
        self.calls.lock().unwrap().push(call);

        let route = self.routes.iter().find(|r| {
            r.path == path && (r.network.is_none() || r.network == network)
        });

        match route.map(|r| r.reply.clone()) {
            Some(Reply::Json(status, body)) => Ok(json_response(status, body)),
            Some(Reply::Unreachable(reason)) => Err(TransportError(reason)),
            None => Ok(json_response(404, r#"{"message":"no route"}"#.to_string())),
        }
    }
}

pub fn json_response(status: u16, body: String) -> RelayResponse {
    RelayResponse {
        status,
        content_type: Some("application/json".to_string()),
        body: Bytes::from(body),
    }
}

/// `{"data":[...]}` envelope around raw JSON rows
pub fn envelope(rows: &[&str]) -> String {
    format!(r#"{{"data":[{}]}}"#, rows.join(","))
}

pub fn ok(rows: &[&str]) -> Reply {
    Reply::Json(200, envelope(rows))
}
