//! Integration tests decoding saved indexer/gateway fixtures.

use std::path::Path;
use wallet_sync::net::types::PlatformAccountDoc;
use wallet_sync::{AggsUtxo, ExchangeHistoryEntry, TransactionEntry};

fn load_fixture<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../testdata");
    let full = root.join(path);
    let s =
        std::fs::read_to_string(&full).unwrap_or_else(|e| panic!("read {}: {}", full.display(), e));
    serde_json::from_str(&s).unwrap_or_else(|e| panic!("parse {}: {}", path, e))
}

#[test]
fn fixture_aggs_utxo_parses() {
    let docs: Vec<AggsUtxo> = load_fixture("aggs_utxo.json");
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].asset_type, "0xabc123");
    assert_eq!(docs[0].total_asset_quantity, 10_000);
    assert_eq!(docs[1].utxo_quantity, 1);
}

#[test]
fn fixture_txs_parse() {
    let txs: Vec<TransactionEntry> = load_fixture("addr_asset_txs.json");
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].hash, "deadbeef01");
    assert_eq!(txs[0].block_number, Some(4200));
    assert_eq!(txs[1].block_number, None);
}

#[test]
fn fixture_exchange_history_parses() {
    let history: Vec<ExchangeHistoryEntry> = load_fixture("exchange_history.json");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].received.confirm, 6);
    assert!(history[0].sent.hash.is_some());
    assert!(history[1].sent.hash.is_none());
}

#[test]
fn fixture_platform_account_parses() {
    let doc: PlatformAccountDoc = load_fixture("platform_account.json");
    assert_eq!(doc.balance, "99000000000");
    assert_eq!(doc.nonce, "12");
}
