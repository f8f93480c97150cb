//! Network client: host resolution, typed endpoints, response schemas.

mod client;
mod hosts;
pub mod types;

pub use client::{ApiClient, ApiError};
pub use hosts::{HostConfig, HostError, HostTable, NetworkId};
