//! wallet_sync — data-fetching and client-state layer for a CodeChain wallet.
//!
//! Talks to the per-network indexer (read side) and the gateway (write side),
//! and caches exchange state behind a stale-aware, de-duplicated fetch guard.
//! Read-only apart from transaction submission; no keys, no signing.

pub mod net;
pub mod store;

pub use net::types::{
    AggsUtxo, AssetScheme, BtcAddress, BtcRate, ExchangeHistoryEntry, PendingParcel,
    PendingTransaction, PlatformAccount, TransactionEntry, Utxo,
};
pub use net::{ApiClient, ApiError, HostConfig, HostError, HostTable, NetworkId};
pub use store::{CacheEntry, ExchangeApi, ExchangeStore, STALE_WINDOW};
