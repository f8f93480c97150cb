//! Client-side store: stale-aware cache entries and the fetch coordinator.

mod cache;
mod coordinator;

pub use cache::{CacheEntry, CacheMap, STALE_WINDOW};
pub use coordinator::{ExchangeApi, ExchangeStore};
