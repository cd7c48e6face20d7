//! Gateway HTTP surface
//!
//! `GET /api/token?path=/v1/evm/...&...` with the credential in `x-token-jwt`.
//! `GET /health` answers `ok`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::ports::UpstreamPort;

use super::relay::{Gateway, GatewayError};

/// Route serving the relay
pub const RELAY_ROUTE: &str = "/api/token";

/// Request header carrying the caller's credential
pub const CREDENTIAL_HEADER: &str = "x-token-jwt";

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body())).into_response()
    }
}

/// Build the gateway router
pub fn router<U>(gateway: Arc<Gateway<U>>) -> Router
where
    U: UpstreamPort + 'static,
{
    Router::new()
        .route(RELAY_ROUTE, get(relay_handler::<U>))
        .route("/health", get(health))
        .with_state(gateway)
}

async fn relay_handler<U>(
    State(gateway): State<Arc<Gateway<U>>>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Response, GatewayError>
where
    U: UpstreamPort + 'static,
{
    let credential = headers
        .get(CREDENTIAL_HEADER)
        .and_then(|v| v.to_str().ok());

    let relayed = gateway.forward(credential, query).await?;

    let status = StatusCode::from_u16(relayed.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = relayed
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    Ok((status, [(header::CONTENT_TYPE, content_type)], relayed.body).into_response())
}

async fn health() -> &'static str {
    "ok"
}

/// Serve the gateway until Ctrl+C
pub async fn serve<U>(addr: SocketAddr, gateway: Arc<Gateway<U>>) -> std::io::Result<()>
where
    U: UpstreamPort + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    info!("Gateway listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(gateway))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received");
        })
        .await
}
