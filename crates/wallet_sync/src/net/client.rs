//! HTTP client for the indexer (read side) and gateway (write side) services.
//!
//! One method per endpoint. No retries and no backoff: callers poll, and the
//! fetch coordinator suppresses refetching on its own. The only resilience
//! here is a request timeout so a hung request cannot pin a resource forever.

use crate::net::hosts::{HostConfig, NetworkId};
use crate::net::types::{
    AggsUtxo, AssetScheme, BtcAddress, BtcRate, ExchangeHistoryEntry, PendingParcel,
    PendingTransaction, PlatformAccount, PlatformAccountDoc, TransactionEntry, Utxo,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Confirmations required before a transaction stops counting as unconfirmed.
const CONFIRM_THRESHOLD: u32 = 5;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request: {0}")]
    Request(#[from] reqwest::Error),
    /// Non-2xx response; carries the HTTP status text.
    #[error("status: {0}")]
    Status(String),
    /// Response body did not match the expected schema.
    #[error("decode: {0}")]
    Decode(String),
}

/// Client over the indexer and gateway. Host resolution is fixed at
/// construction; the network is selected per call.
pub struct ApiClient {
    http: reqwest::Client,
    hosts: HostConfig,
}

impl ApiClient {
    pub fn new(hosts: HostConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, hosts })
    }

    pub fn hosts(&self) -> &HostConfig {
        &self.hosts
    }

    fn indexer_url(&self, network: NetworkId, path: &str) -> String {
        format!(
            "{}{}",
            self.hosts.indexer_host(network).trim_end_matches('/'),
            path
        )
    }

    fn gateway_url(&self, path: &str) -> String {
        format!("{}{}", self.hosts.gateway_host().trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        Self::decode(response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        debug!(%url, "POST");
        let response = self.http.post(url).json(body).send().await?;
        Self::decode(response).await
    }

    fn check_status(response: &reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let text = status
            .canonical_reason()
            .map_or_else(|| status.as_str().to_string(), str::to_string);
        Err(ApiError::Status(text))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        Self::check_status(&response)?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Aggregated UTXO list for an address, one entry per asset type.
    pub async fn aggs_utxo_list(
        &self,
        address: &str,
        network: NetworkId,
    ) -> Result<Vec<AggsUtxo>, ApiError> {
        let url = self.indexer_url(
            network,
            &format!("/api/aggs-utxo/{}", urlencoding::encode(address)),
        );
        self.get_json(&url).await
    }

    /// Asset scheme registered for an asset type (hex hash).
    pub async fn asset_scheme(
        &self,
        asset_type: &str,
        network: NetworkId,
    ) -> Result<AssetScheme, ApiError> {
        let url = self.indexer_url(
            network,
            &format!("/api/asset/{}", urlencoding::encode(asset_type)),
        );
        self.get_json(&url).await
    }

    /// Platform account (balance and nonce). A null document from the indexer
    /// means the account has never been seen; it maps to the zero account.
    pub async fn platform_account(
        &self,
        address: &str,
        network: NetworkId,
    ) -> Result<PlatformAccount, ApiError> {
        let url = self.indexer_url(
            network,
            &format!("/api/addr-platform-account/{}", urlencoding::encode(address)),
        );
        let doc: Option<PlatformAccountDoc> = self.get_json(&url).await?;
        match doc {
            Some(doc) => parse_platform_account(&doc),
            None => Ok(PlatformAccount::default()),
        }
    }

    /// Unspent outputs of one asset type owned by an address.
    pub async fn utxo_list_by_asset_type(
        &self,
        address: &str,
        asset_type: &str,
        network: NetworkId,
    ) -> Result<Vec<Utxo>, ApiError> {
        let url = self.indexer_url(
            network,
            &format!(
                "/api/utxo/{}/owner/{}",
                urlencoding::encode(asset_type),
                urlencoding::encode(address)
            ),
        );
        self.get_json(&url).await
    }

    /// Payment parcels still pending for an address.
    pub async fn pending_payment_parcels(
        &self,
        address: &str,
        network: NetworkId,
    ) -> Result<Vec<PendingParcel>, ApiError> {
        let url = self.indexer_url(
            network,
            &format!("/api/parcels/pending/{}", urlencoding::encode(address)),
        );
        self.get_json(&url).await
    }

    /// Asset transactions still pending for an address.
    pub async fn pending_transactions(
        &self,
        address: &str,
        network: NetworkId,
    ) -> Result<Vec<PendingTransaction>, ApiError> {
        let url = self.indexer_url(
            network,
            &format!("/api/addr-asset-txs/pending/{}", urlencoding::encode(address)),
        );
        self.get_json(&url).await
    }

    /// Paged asset-transaction history for an address. With
    /// `only_unconfirmed`, restricts to transactions below the confirm
    /// threshold.
    pub async fn txs_by_address(
        &self,
        address: &str,
        only_unconfirmed: bool,
        page: u64,
        items_per_page: u64,
        network: NetworkId,
    ) -> Result<Vec<TransactionEntry>, ApiError> {
        let path = txs_path(address, only_unconfirmed, page, items_per_page);
        let url = self.indexer_url(network, &path);
        self.get_json(&url).await
    }

    /// Best block number, a plain JSON integer.
    pub async fn best_block_number(&self, network: NetworkId) -> Result<u64, ApiError> {
        let url = self.indexer_url(network, "/api/blockNumber");
        self.get_json(&url).await
    }

    /// Submit a signed asset-transfer transaction to the gateway. The response
    /// body is ignored; only the status matters.
    pub async fn send_tx_to_gateway(&self, tx: &serde_json::Value) -> Result<(), ApiError> {
        let url = self.gateway_url("/send_asset");
        debug!(%url, "POST");
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "tx": tx }))
            .send()
            .await?;
        Self::check_status(&response)
    }

    /// Ask the gateway to create (or return) the BTC deposit address bound to
    /// a wallet address.
    pub async fn create_btc_address(&self, address: &str) -> Result<BtcAddress, ApiError> {
        let url = self.gateway_url("/btc-address");
        self.post_json(&url, &serde_json::json!({ "address": address }))
            .await
    }

    /// Current BTC→CCC exchange rate from the gateway.
    pub async fn btc_to_ccc_rate(&self) -> Result<BtcRate, ApiError> {
        let url = self.gateway_url("/rate");
        self.get_json(&url).await
    }

    /// Exchange history (received BTC leg, sent CCC leg) for an address.
    pub async fn exchange_history(
        &self,
        address: &str,
    ) -> Result<Vec<ExchangeHistoryEntry>, ApiError> {
        let url = self.gateway_url(&format!("/history/{}", urlencoding::encode(address)));
        self.get_json(&url).await
    }
}

fn txs_path(address: &str, only_unconfirmed: bool, page: u64, items_per_page: u64) -> String {
    let mut path = format!(
        "/api/addr-asset-txs/{}?page={}&itemsPerPage={}",
        urlencoding::encode(address),
        page,
        items_per_page
    );
    if only_unconfirmed {
        path.push_str(&format!(
            "&onlyUnconfirmed=true&confirmThreshold={CONFIRM_THRESHOLD}"
        ));
    }
    path
}

fn parse_platform_account(doc: &PlatformAccountDoc) -> Result<PlatformAccount, ApiError> {
    let balance = doc
        .balance
        .trim()
        .parse::<u128>()
        .map_err(|_| ApiError::Decode(format!("invalid balance: {}", doc.balance)))?;
    let nonce = doc
        .nonce
        .trim()
        .parse::<u64>()
        .map_err(|_| ApiError::Decode(format!("invalid nonce: {}", doc.nonce)))?;
    Ok(PlatformAccount { balance, nonce })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txs_path_plain() {
        assert_eq!(
            txs_path("ccc1abc", false, 2, 25),
            "/api/addr-asset-txs/ccc1abc?page=2&itemsPerPage=25"
        );
    }

    #[test]
    fn txs_path_unconfirmed_adds_threshold() {
        assert_eq!(
            txs_path("ccc1abc", true, 1, 10),
            "/api/addr-asset-txs/ccc1abc?page=1&itemsPerPage=10&onlyUnconfirmed=true&confirmThreshold=5"
        );
    }

    #[test]
    fn platform_account_parses_strings() {
        let doc = PlatformAccountDoc {
            balance: "100000000".to_string(),
            nonce: "7".to_string(),
        };
        let account = parse_platform_account(&doc).unwrap();
        assert_eq!(account.balance, 100_000_000);
        assert_eq!(account.nonce, 7);
    }

    #[test]
    fn platform_account_rejects_garbage() {
        let doc = PlatformAccountDoc {
            balance: "lots".to_string(),
            nonce: "7".to_string(),
        };
        assert!(matches!(
            parse_platform_account(&doc),
            Err(ApiError::Decode(_))
        ));
    }
}
