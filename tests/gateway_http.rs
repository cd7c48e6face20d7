//! Gateway HTTP Integration Tests
//!
//! Runs the axum gateway on a loopback port and talks to it with the
//! remote gateway client, as a second process would.

mod helpers;

use std::sync::Arc;

use chainscope::adapters::gateway::{router, Gateway, CREDENTIAL_HEADER, RELAY_ROUTE};
use chainscope::adapters::token_api::{HttpGatewayClient, TokenApiClient};
use chainscope::application::WalletScanner;
use chainscope::domain::CHAINS;
use chainscope::ports::{
    ApiError, ApiRequest, Credential, GatewayPort, HoldersQuery, SwapsQuery, TokenDataPort,
};
use tokio::net::TcpListener;

use helpers::{ok, Reply, StubUpstream};

const VITALIK: &str = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";

/// Serve the gateway on an ephemeral port, returning its base URL
async fn spawn_gateway(upstream: Arc<StubUpstream>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(Arc::new(Gateway::new(upstream)));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_missing_credential_is_rejected_before_upstream() {
    let upstream = Arc::new(StubUpstream::new().on("/v1/evm/holders", ok(&[])));
    let base = spawn_gateway(upstream.clone()).await;

    let response = reqwest::Client::new()
        .get(format!("{}{}", base, RELAY_ROUTE))
        .query(&[("path", "/v1/evm/holders"), ("network", "mainnet")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Missing JWT");
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn test_forwards_params_without_path() {
    let upstream = Arc::new(StubUpstream::new().on(
        "/v1/evm/holders",
        ok(&[r#"{"address":"0x1","amount":"5","symbol":"TKN","value":5.0}"#]),
    ));
    let base = spawn_gateway(upstream.clone()).await;

    let response = reqwest::Client::new()
        .get(format!("{}{}", base, RELAY_ROUTE))
        .header(CREDENTIAL_HEADER, "jwt-xyz")
        .query(&[
            ("path", "/v1/evm/holders"),
            ("network", "mainnet"),
            ("contract", "0xabc"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);

    let calls = upstream.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "/v1/evm/holders");
    assert_eq!(calls[0].bearer, "jwt-xyz");
    assert_eq!(
        calls[0].query,
        vec![
            ("network".to_string(), "mainnet".to_string()),
            ("contract".to_string(), "0xabc".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_remote_client_preserves_upstream_status() {
    let upstream = Arc::new(StubUpstream::new().on(
        "/v1/evm/holders",
        Reply::Json(429, r#"{"message":"rate limited"}"#.into()),
    ));
    let base = spawn_gateway(upstream).await;
    let client = TokenApiClient::new(HttpGatewayClient::new(base).unwrap());

    let result = client
        .holders(
            &Credential::new("jwt").unwrap(),
            &HoldersQuery {
                network: "mainnet".into(),
                contract: "0xabc".into(),
                limit: 10,
            },
        )
        .await;

    assert_eq!(
        result,
        Err(ApiError::Upstream {
            status: 429,
            message: "rate limited".into()
        })
    );
}

#[tokio::test]
async fn test_transport_failure_is_502_over_http() {
    let upstream = Arc::new(
        StubUpstream::new().on("/v1/evm/swaps", Reply::Unreachable("connection refused".into())),
    );
    let base = spawn_gateway(upstream).await;

    let response = reqwest::Client::new()
        .get(format!("{}{}", base, RELAY_ROUTE))
        .header(CREDENTIAL_HEADER, "jwt")
        .query(&[("path", "/v1/evm/swaps"), ("network", "mainnet")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 502);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "API request failed");
}

#[tokio::test]
async fn test_remote_client_reports_gateway_502_as_transport() {
    let upstream = Arc::new(
        StubUpstream::new().on("/v1/evm/swaps", Reply::Unreachable("connection refused".into())),
    );
    let base = spawn_gateway(upstream).await;
    let gateway = HttpGatewayClient::new(base).unwrap();

    let result = gateway
        .send(
            &Credential::new("jwt").unwrap(),
            &ApiRequest::new("/v1/evm/swaps").param("network", "mainnet"),
        )
        .await;

    assert!(matches!(result, Err(ApiError::Transport(_))));
}

#[tokio::test]
async fn test_remote_client_keeps_upstream_502() {
    let upstream = Arc::new(StubUpstream::new().on(
        "/v1/evm/swaps",
        Reply::Json(502, r#"{"message":"bad gateway"}"#.into()),
    ));
    let base = spawn_gateway(upstream).await;
    let client = TokenApiClient::new(HttpGatewayClient::new(base).unwrap());

    let result = client
        .swaps(
            &Credential::new("jwt").unwrap(),
            &SwapsQuery {
                network: "mainnet".into(),
                pool: None,
                limit: 10,
            },
        )
        .await;

    assert_eq!(
        result,
        Err(ApiError::Upstream {
            status: 502,
            message: "bad gateway".into()
        })
    );
}

#[tokio::test]
async fn test_wallet_scan_through_remote_gateway() {
    let upstream = Arc::new(
        StubUpstream::new()
            .on_network(
                "/v1/evm/balances/native",
                "optimism",
                Reply::Unreachable("timeout".into()),
            )
            .on("/v1/evm/balances/native", ok(&[r#"{"value": 3.0}"#]))
            .on("/v1/evm/balances", ok(&[])),
    );
    let base = spawn_gateway(upstream.clone()).await;
    let scanner = WalletScanner::new(TokenApiClient::new(HttpGatewayClient::new(base).unwrap()));

    let scan = scanner
        .scan(&Credential::new("jwt").unwrap(), VITALIK, "mainnet")
        .await
        .unwrap();

    assert_eq!(scan.balances.len(), CHAINS.len());
    assert_eq!(scan.failed_count(), 1);
    assert!(scan.balance_for("optimism").unwrap().is_failed());
    assert_eq!(
        upstream.calls_to("/v1/evm/balances/native").len(),
        CHAINS.len()
    );
}

#[tokio::test]
async fn test_health() {
    let base = spawn_gateway(Arc::new(StubUpstream::new())).await;
    let response = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");
}
