//! wallet-sync CLI: query the indexer/gateway and exercise the fetch cache.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use wallet_sync::{ApiClient, ExchangeStore, HostConfig, NetworkId};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();
    let cli = Cli::parse();
    match cli.command {
        Command::Account(args) => run_account(args),
        Command::AggsUtxo(args) => run_aggs_utxo(args),
        Command::Utxos(args) => run_utxos(args),
        Command::Txs(args) => run_txs(args),
        Command::Pending(args) => run_pending(args),
        Command::BlockNumber(args) => run_block_number(args),
        Command::Send(args) => run_send(args),
        Command::Rate(args) => run_rate(args),
        Command::History(args) => run_history(args),
        Command::BtcAddress(args) => run_btc_address(args),
        Command::WatchRate(args) => run_watch_rate(args),
    }
}

#[derive(Parser)]
#[command(name = "wallet-sync")]
#[command(about = "CodeChain wallet data layer: indexer/gateway queries and cache")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
struct CommonArgs {
    /// Network id: cc, tc, sc, or wc.
    #[arg(long, default_value = "cc")]
    network: String,
    /// Override the gateway base URL.
    #[arg(long)]
    gateway: Option<String>,
}

impl CommonArgs {
    fn network(&self) -> Result<NetworkId, Box<dyn std::error::Error>> {
        Ok(self.network.parse()?)
    }

    fn client(&self) -> Result<ApiClient, Box<dyn std::error::Error>> {
        let mut hosts = HostConfig::load();
        if let Some(gateway) = &self.gateway {
            hosts.gateway = gateway.clone();
        }
        Ok(ApiClient::new(hosts)?)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Platform account balance and nonce for an address.
    Account(AddressArgs),
    /// Aggregated UTXO summary per asset type.
    AggsUtxo(AddressArgs),
    /// UTXOs of one asset type owned by an address.
    Utxos(UtxosArgs),
    /// Paged asset-transaction history for an address.
    Txs(TxsArgs),
    /// Pending parcels and pending asset transactions.
    Pending(AddressArgs),
    /// Best block number of the network.
    BlockNumber(CommonArgs),
    /// Submit a signed transaction (JSON file) to the gateway.
    Send(SendArgs),
    /// Current BTC to CCC exchange rate.
    Rate(CommonArgs),
    /// Exchange history for an address.
    History(AddressArgs),
    /// Create (or look up) the BTC deposit address for a wallet address.
    BtcAddress(AddressArgs),
    /// Poll the rate through the stale-aware cache and print updates.
    WatchRate(WatchRateArgs),
}

#[derive(Parser)]
struct AddressArgs {
    #[arg(long)]
    address: String,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser)]
struct UtxosArgs {
    #[arg(long)]
    address: String,
    #[arg(long)]
    asset_type: String,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser)]
struct TxsArgs {
    #[arg(long)]
    address: String,
    #[arg(long, default_value_t = 1)]
    page: u64,
    #[arg(long, default_value_t = 25)]
    items_per_page: u64,
    #[arg(long)]
    only_unconfirmed: bool,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser)]
struct SendArgs {
    /// Path to the signed transaction JSON.
    #[arg(long)]
    tx: PathBuf,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser)]
struct WatchRateArgs {
    /// Poll interval in milliseconds.
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,
    /// Number of polls before exiting.
    #[arg(long, default_value_t = 10)]
    count: u32,
    #[command(flatten)]
    common: CommonArgs,
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_account(args: AddressArgs) -> Result<(), Box<dyn std::error::Error>> {
    let network = args.common.network()?;
    let client = args.common.client()?;
    let rt = tokio::runtime::Runtime::new()?;
    let account = rt.block_on(client.platform_account(&args.address, network))?;
    print_json(&account)
}

fn run_aggs_utxo(args: AddressArgs) -> Result<(), Box<dyn std::error::Error>> {
    let network = args.common.network()?;
    let client = args.common.client()?;
    let rt = tokio::runtime::Runtime::new()?;
    let docs = rt.block_on(client.aggs_utxo_list(&args.address, network))?;
    info!(count = docs.len(), "aggs utxo");
    print_json(&docs)
}

fn run_utxos(args: UtxosArgs) -> Result<(), Box<dyn std::error::Error>> {
    let network = args.common.network()?;
    let client = args.common.client()?;
    let rt = tokio::runtime::Runtime::new()?;
    let utxos = rt.block_on(client.utxo_list_by_asset_type(
        &args.address,
        &args.asset_type,
        network,
    ))?;
    info!(count = utxos.len(), "utxos");
    print_json(&utxos)
}

fn run_txs(args: TxsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let network = args.common.network()?;
    let client = args.common.client()?;
    let rt = tokio::runtime::Runtime::new()?;
    let txs = rt.block_on(client.txs_by_address(
        &args.address,
        args.only_unconfirmed,
        args.page,
        args.items_per_page,
        network,
    ))?;
    info!(count = txs.len(), page = args.page, "txs");
    print_json(&txs)
}

fn run_pending(args: AddressArgs) -> Result<(), Box<dyn std::error::Error>> {
    let network = args.common.network()?;
    let client = args.common.client()?;
    let rt = tokio::runtime::Runtime::new()?;
    let parcels = rt.block_on(client.pending_payment_parcels(&args.address, network))?;
    let txs = rt.block_on(client.pending_transactions(&args.address, network))?;
    print_json(&serde_json::json!({ "parcels": parcels, "transactions": txs }))
}

fn run_block_number(args: CommonArgs) -> Result<(), Box<dyn std::error::Error>> {
    let network = args.network()?;
    let client = args.client()?;
    let rt = tokio::runtime::Runtime::new()?;
    let number = rt.block_on(client.best_block_number(network))?;
    println!("{number}");
    Ok(())
}

fn run_send(args: SendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let client = args.common.client()?;
    let tx_json = std::fs::read_to_string(&args.tx)?;
    let tx: serde_json::Value = serde_json::from_str(&tx_json)?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(client.send_tx_to_gateway(&tx))?;
    info!(path = ?args.tx, "transaction submitted");
    Ok(())
}

fn run_rate(args: CommonArgs) -> Result<(), Box<dyn std::error::Error>> {
    let client = args.client()?;
    let rt = tokio::runtime::Runtime::new()?;
    let rate = rt.block_on(client.btc_to_ccc_rate())?;
    println!("{}", rate.to_ccc);
    Ok(())
}

fn run_history(args: AddressArgs) -> Result<(), Box<dyn std::error::Error>> {
    let client = args.common.client()?;
    let rt = tokio::runtime::Runtime::new()?;
    let history = rt.block_on(client.exchange_history(&args.address))?;
    info!(count = history.len(), "exchange history");
    print_json(&history)
}

fn run_btc_address(args: AddressArgs) -> Result<(), Box<dyn std::error::Error>> {
    let client = args.common.client()?;
    let rt = tokio::runtime::Runtime::new()?;
    let created = rt.block_on(client.create_btc_address(&args.address))?;
    println!("{}", created.address);
    Ok(())
}

fn run_watch_rate(args: WatchRateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let client = args.common.client()?;
    let store = ExchangeStore::new(client);
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut last_update = None;
        for _ in 0..args.count {
            store.fetch_rate_if_needed().await;
            if let Some(entry) = store.rate() {
                if entry.updated_at != last_update {
                    last_update = entry.updated_at;
                    if let Some(rate) = entry.value {
                        println!("{rate}");
                    }
                }
            }
            tokio::time::sleep(Duration::from_millis(args.interval_ms)).await;
        }
    });
    Ok(())
}
