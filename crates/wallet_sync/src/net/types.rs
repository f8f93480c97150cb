//! Typed response schemas for the indexer and gateway APIs.
//!
//! Every payload is validated at the client boundary by deserializing into
//! these structs; shape mismatches surface as a decode error instead of
//! silently-wrong values. Unknown extra fields from the services are ignored.

use serde::{Deserialize, Serialize};

/// Aggregated UTXO summary per asset type held by an address.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggsUtxo {
    pub asset_type: String,
    pub total_asset_quantity: u64,
    pub utxo_quantity: u64,
}

/// Asset scheme registered on chain for one asset type.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetScheme {
    pub metadata: String,
    pub amount: u64,
    #[serde(default)]
    pub registrar: Option<String>,
}

/// Platform account document as the indexer serves it. Balance and nonce are
/// decimal strings on the wire.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformAccountDoc {
    pub balance: String,
    pub nonce: String,
}

/// Platform account with numeric balance and nonce. A missing document on the
/// indexer side maps to the zero account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformAccount {
    pub balance: u128,
    pub nonce: u64,
}

/// A single unspent output for an asset type.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Utxo {
    pub asset_type: String,
    pub amount: u64,
    pub transaction_hash: String,
    pub transaction_output_index: u32,
    #[serde(default)]
    pub lock_script_hash: Option<String>,
}

/// Payment parcel awaiting confirmation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingParcel {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
    pub parcel: serde_json::Value,
}

/// Asset transaction awaiting confirmation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTransaction {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
    pub transaction: serde_json::Value,
}

/// One row of an address's asset-transaction history.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEntry {
    pub hash: String,
    #[serde(default)]
    pub block_number: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Deposit address created by the gateway for a wallet address.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BtcAddress {
    pub address: String,
}

/// BTC to CCC conversion rate quoted by the gateway.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BtcRate {
    #[serde(rename = "toCCC")]
    pub to_ccc: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceivedStatus {
    Success,
    Pending,
    Reverted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentStatus {
    Success,
    Pending,
}

/// Incoming BTC leg of one exchange.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReceivedLeg {
    pub hash: String,
    pub quantity: String,
    pub status: ReceivedStatus,
    pub confirm: u32,
}

/// Outgoing CCC leg of one exchange. Hash is absent until the payout parcel
/// is created.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SentLeg {
    #[serde(default)]
    pub hash: Option<String>,
    pub quantity: String,
    pub status: SentStatus,
}

/// One completed or in-progress BTC→CCC exchange for an address.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExchangeHistoryEntry {
    pub received: ReceivedLeg,
    pub sent: SentLeg,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggs_utxo_decodes_camel_case() {
        let json = r#"{"assetType":"0xabc","totalAssetQuantity":100,"utxoQuantity":3}"#;
        let doc: AggsUtxo = serde_json::from_str(json).unwrap();
        assert_eq!(doc.asset_type, "0xabc");
        assert_eq!(doc.total_asset_quantity, 100);
        assert_eq!(doc.utxo_quantity, 3);
    }

    #[test]
    fn rate_decodes_to_ccc_field() {
        let rate: BtcRate = serde_json::from_str(r#"{"toCCC":12.5}"#).unwrap();
        assert!((rate.to_ccc - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn history_entry_without_sent_hash() {
        let json = r#"{
            "received": {"hash":"btc0","quantity":"0.5","status":"success","confirm":6},
            "sent": {"quantity":"1000","status":"pending"}
        }"#;
        let entry: ExchangeHistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.received.status, ReceivedStatus::Success);
        assert_eq!(entry.sent.hash, None);
        assert_eq!(entry.sent.status, SentStatus::Pending);
    }

    #[test]
    fn history_entry_rejects_unknown_status() {
        let json = r#"{
            "received": {"hash":"btc0","quantity":"0.5","status":"lost","confirm":0},
            "sent": {"quantity":"0","status":"pending"}
        }"#;
        assert!(serde_json::from_str::<ExchangeHistoryEntry>(json).is_err());
    }
}
