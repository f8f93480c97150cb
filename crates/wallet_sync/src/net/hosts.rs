//! Network identifiers and host resolution for the indexer/gateway services.
//!
//! The host table is an explicit immutable value passed into the client at
//! construction, never a module-level singleton. `Default` carries the known
//! public endpoints; the gateway URL is expected to be overridden per
//! deployment (the default points at a local instance).
//!
//! Load overrides from: env `WALLET_SYNC_HOSTS_PATH`, or `./config/hosts.json`,
//! or `./hosts.json`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("unknown network id: {0}")]
    UnknownNetwork(String),
}

/// Logical network selector. Wire ids are the two-letter codes used in
/// addresses and API paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NetworkId {
    /// `cc` — MAINNET
    Mainnet,
    /// `tc` — HUSKY
    Husky,
    /// `sc` — SALUKI
    Saluki,
    /// `wc` — CORGI
    Corgi,
}

impl NetworkId {
    pub const ALL: [NetworkId; 4] = [
        NetworkId::Mainnet,
        NetworkId::Husky,
        NetworkId::Saluki,
        NetworkId::Corgi,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NetworkId::Mainnet => "cc",
            NetworkId::Husky => "tc",
            NetworkId::Saluki => "sc",
            NetworkId::Corgi => "wc",
        }
    }

    /// Human-readable network name shown in UIs.
    pub fn name(self) -> &'static str {
        match self {
            NetworkId::Mainnet => "MAINNET",
            NetworkId::Husky => "HUSKY",
            NetworkId::Saluki => "SALUKI",
            NetworkId::Corgi => "CORGI",
        }
    }
}

impl FromStr for NetworkId {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "cc" => Ok(NetworkId::Mainnet),
            "tc" => Ok(NetworkId::Husky),
            "sc" => Ok(NetworkId::Saluki),
            "wc" => Ok(NetworkId::Corgi),
            other => Err(HostError::UnknownNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for NetworkId {
    type Error = HostError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<NetworkId> for String {
    fn from(id: NetworkId) -> Self {
        id.as_str().to_string()
    }
}

/// Per-network base URLs for one service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HostTable {
    pub cc: String,
    pub tc: String,
    pub sc: String,
    pub wc: String,
}

impl HostTable {
    pub fn get(&self, network: NetworkId) -> &str {
        match network {
            NetworkId::Mainnet => &self.cc,
            NetworkId::Husky => &self.tc,
            NetworkId::Saluki => &self.sc,
            NetworkId::Corgi => &self.wc,
        }
    }
}

const DEFAULT_GATEWAY_URL: &str = "http://localhost:9000";

/// Base hosts for the read-side indexer, the chain RPC, and the write-side
/// gateway. Immutable once constructed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(default = "default_indexer_table")]
    pub indexer: HostTable,
    #[serde(default = "default_chain_table")]
    pub chain: HostTable,
    #[serde(default = "default_gateway_url")]
    pub gateway: String,
}

fn default_indexer_table() -> HostTable {
    HostTable {
        cc: "https://husky.codechain.io/explorer".to_string(),
        tc: "https://husky.codechain.io/explorer".to_string(),
        sc: "https://saluki.codechain.io/explorer".to_string(),
        wc: "https://corgi.codechain.io/explorer".to_string(),
    }
}

fn default_chain_table() -> HostTable {
    HostTable {
        cc: "https://husky.codechain.io/explorer".to_string(),
        tc: "http://52.79.108.1:8080".to_string(),
        sc: "http://52.78.210.78:8080".to_string(),
        wc: "http://13.124.96.177:8080".to_string(),
    }
}

fn default_gateway_url() -> String {
    DEFAULT_GATEWAY_URL.to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            indexer: default_indexer_table(),
            chain: default_chain_table(),
            gateway: default_gateway_url(),
        }
    }
}

impl HostConfig {
    /// Load config from path. Returns default tables on error or missing file.
    pub fn load_from_path(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Load config: env `WALLET_SYNC_HOSTS_PATH`, then `./config/hosts.json`,
    /// then `./hosts.json`.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("WALLET_SYNC_HOSTS_PATH") {
            let p = Path::new(&path);
            if p.exists() {
                return Self::load_from_path(p);
            }
        }
        for candidate in [Path::new("./config/hosts.json"), Path::new("./hosts.json")] {
            if candidate.exists() {
                return Self::load_from_path(candidate);
            }
        }
        Self::default()
    }

    pub fn indexer_host(&self, network: NetworkId) -> &str {
        self.indexer.get(network)
    }

    /// The explorer front-end shares the indexer host.
    pub fn explorer_host(&self, network: NetworkId) -> &str {
        self.indexer.get(network)
    }

    pub fn chain_host(&self, network: NetworkId) -> &str {
        self.chain.get(network)
    }

    pub fn gateway_host(&self) -> &str {
        &self.gateway
    }
}
