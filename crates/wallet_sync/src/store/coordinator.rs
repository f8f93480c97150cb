//! Fetch coordination for the exchange resources: BTC deposit address,
//! BTC→CCC rate, and per-address exchange history.
//!
//! `fetch_*_if_needed` is safe to call on every poll tick. It does nothing
//! while a fetch for the same key is in flight or while the cached value is
//! fresh; otherwise it claims the key, performs the request, and publishes
//! the result. Failures are logged and swallowed (the next poll retries), but
//! the claim is always released so the resource can never wedge in the
//! fetching state.

use crate::net::types::{BtcAddress, BtcRate, ExchangeHistoryEntry};
use crate::net::{ApiClient, ApiError};
use crate::store::cache::{CacheEntry, CacheMap};
use async_trait::async_trait;
use time::OffsetDateTime;
use tracing::{debug, warn};

/// Singleton key for the exchange rate.
const RATE_KEY: &str = "btc-to-ccc";

/// Gateway operations the exchange store depends on. Split out so the
/// coordination logic is testable without a live gateway.
#[async_trait]
pub trait ExchangeApi: Send + Sync {
    async fn create_btc_address(&self, address: &str) -> Result<BtcAddress, ApiError>;
    async fn btc_to_ccc_rate(&self) -> Result<BtcRate, ApiError>;
    async fn exchange_history(
        &self,
        address: &str,
    ) -> Result<Vec<ExchangeHistoryEntry>, ApiError>;
}

#[async_trait]
impl ExchangeApi for ApiClient {
    async fn create_btc_address(&self, address: &str) -> Result<BtcAddress, ApiError> {
        ApiClient::create_btc_address(self, address).await
    }

    async fn btc_to_ccc_rate(&self) -> Result<BtcRate, ApiError> {
        ApiClient::btc_to_ccc_rate(self).await
    }

    async fn exchange_history(
        &self,
        address: &str,
    ) -> Result<Vec<ExchangeHistoryEntry>, ApiError> {
        ApiClient::exchange_history(self, address).await
    }
}

/// Client-side store for exchange state. Only this store mutates its caches;
/// readers get entry snapshots and poll.
pub struct ExchangeStore<A> {
    api: A,
    btc_address: CacheMap<String>,
    rate: CacheMap<f64>,
    history: CacheMap<Vec<ExchangeHistoryEntry>>,
}

impl<A: ExchangeApi> ExchangeStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            btc_address: CacheMap::new(),
            rate: CacheMap::new(),
            history: CacheMap::new(),
        }
    }

    /// Cached BTC deposit address for a wallet address, if fetched.
    pub fn btc_address(&self, address: &str) -> Option<CacheEntry<String>> {
        self.btc_address.get(address)
    }

    /// Cached BTC→CCC rate, if fetched.
    pub fn rate(&self) -> Option<CacheEntry<f64>> {
        self.rate.get(RATE_KEY)
    }

    /// Cached exchange history for a wallet address, if fetched.
    pub fn history(&self, address: &str) -> Option<CacheEntry<Vec<ExchangeHistoryEntry>>> {
        self.history.get(address)
    }

    pub async fn fetch_btc_address_if_needed(&self, address: &str) {
        self.fetch_btc_address_at(address, OffsetDateTime::now_utc())
            .await;
    }

    pub async fn fetch_rate_if_needed(&self) {
        self.fetch_rate_at(OffsetDateTime::now_utc()).await;
    }

    pub async fn fetch_history_if_needed(&self, address: &str) {
        self.fetch_history_at(address, OffsetDateTime::now_utc())
            .await;
    }

    async fn fetch_btc_address_at(&self, address: &str, now: OffsetDateTime) {
        if !self.btc_address.try_claim(address, now) {
            return;
        }
        match self.api.create_btc_address(address).await {
            Ok(created) => {
                debug!(address, "cached btc address");
                self.btc_address.complete(address, created.address, now);
            }
            Err(e) => {
                warn!(address, error = %e, "btc address fetch failed");
                self.btc_address.release(address);
            }
        }
    }

    async fn fetch_rate_at(&self, now: OffsetDateTime) {
        if !self.rate.try_claim(RATE_KEY, now) {
            return;
        }
        match self.api.btc_to_ccc_rate().await {
            Ok(rate) => {
                debug!(rate = rate.to_ccc, "cached btc to ccc rate");
                self.rate.complete(RATE_KEY, rate.to_ccc, now);
            }
            Err(e) => {
                warn!(error = %e, "rate fetch failed");
                self.rate.release(RATE_KEY);
            }
        }
    }

    async fn fetch_history_at(&self, address: &str, now: OffsetDateTime) {
        if !self.history.try_claim(address, now) {
            return;
        }
        match self.api.exchange_history(address).await {
            Ok(history) => {
                debug!(address, count = history.len(), "cached exchange history");
                self.history.complete(address, history, now);
            }
            Err(e) => {
                warn!(address, error = %e, "exchange history fetch failed");
                self.history.release(address);
            }
        }
    }
}
