//! End-to-end client tests against a one-shot canned-response HTTP server.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use wallet_sync::{ApiClient, ApiError, ExchangeStore, HostConfig, HostTable, NetworkId};

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    )
}

/// Bind an ephemeral port, answer the first request with `response`, and
/// return the base URL.
async fn serve_once(response: String) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 8192];
        let _ = socket.read(&mut buf).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}")
}

fn hosts_with_indexer(base: String) -> HostConfig {
    HostConfig {
        indexer: HostTable {
            cc: base.clone(),
            tc: base.clone(),
            sc: base.clone(),
            wc: base,
        },
        ..Default::default()
    }
}

#[tokio::test]
async fn block_number_returns_plain_integer() {
    let base = serve_once(http_response("200 OK", "12345")).await;
    let client = ApiClient::new(hosts_with_indexer(base)).unwrap();
    let number = client.best_block_number(NetworkId::Mainnet).await.unwrap();
    assert_eq!(number, 12345);
}

#[tokio::test]
async fn not_found_maps_to_status_text() {
    let base = serve_once(http_response("404 Not Found", "")).await;
    let client = ApiClient::new(hosts_with_indexer(base)).unwrap();
    let err = client
        .best_block_number(NetworkId::Mainnet)
        .await
        .unwrap_err();
    match err {
        ApiError::Status(text) => assert_eq!(text, "Not Found"),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_maps_to_decode_error() {
    let base = serve_once(http_response("200 OK", "not json at all")).await;
    let client = ApiClient::new(hosts_with_indexer(base)).unwrap();
    let err = client
        .best_block_number(NetworkId::Mainnet)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn null_platform_account_maps_to_zero() {
    let base = serve_once(http_response("200 OK", "null")).await;
    let client = ApiClient::new(hosts_with_indexer(base)).unwrap();
    let account = client
        .platform_account("cccqnew", NetworkId::Husky)
        .await
        .unwrap();
    assert_eq!(account.balance, 0);
    assert_eq!(account.nonce, 0);
}

#[tokio::test]
async fn send_tx_checks_status_only() {
    let base = serve_once(http_response("200 OK", "")).await;
    let hosts = HostConfig {
        gateway: base,
        ..Default::default()
    };
    let client = ApiClient::new(hosts).unwrap();
    let tx = serde_json::json!({ "inputs": [], "outputs": [] });
    client.send_tx_to_gateway(&tx).await.unwrap();
}

#[tokio::test]
async fn store_caches_rate_through_gateway() {
    let base = serve_once(http_response("200 OK", r#"{"toCCC":12.5}"#)).await;
    let hosts = HostConfig {
        gateway: base,
        ..Default::default()
    };
    let store = ExchangeStore::new(ApiClient::new(hosts).unwrap());
    assert!(store.rate().is_none());
    store.fetch_rate_if_needed().await;
    let entry = store.rate().unwrap();
    assert!(!entry.fetching);
    assert_eq!(entry.value, Some(12.5));
    assert!(entry.updated_at.is_some());
}

#[tokio::test]
async fn store_recovers_after_gateway_error() {
    let base = serve_once(http_response("502 Bad Gateway", "")).await;
    let hosts = HostConfig {
        gateway: base,
        ..Default::default()
    };
    let store = ExchangeStore::new(ApiClient::new(hosts).unwrap());
    store.fetch_rate_if_needed().await;
    let entry = store.rate().unwrap();
    assert!(!entry.fetching);
    assert_eq!(entry.value, None);
}
