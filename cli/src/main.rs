//! Wires configuration, logging, the in-memory store, and the posting
//! services together. Stands in for the RPC server described in the
//! external-interfaces design without implementing its wire protocol.

mod config;

use config::LedgerConfig;
use ledger_inmem_store::InMemoryLedgerStore;
use ledger_repository::LedgerStore;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = LedgerConfig::from_env().unwrap_or_else(|err| {
        eprintln!("invalid configuration, falling back to defaults: {err}");
        LedgerConfig::default()
    });

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!(storage_dsn = %config.storage_dsn, listen_port = config.listen_port, "ledger-cli starting");

    let store = InMemoryLedgerStore::new();
    let cancel = CancellationToken::new();
    ledger_core::seed_system_buckets(&store, &cancel).await?;

    let buckets = store.list_buckets(None, &cancel).await?;
    tracing::info!(system_bucket_count = buckets.len(), "system buckets seeded");

    let net_worth = ledger_services::get_net_worth(&store, &cancel).await?;
    tracing::info!(liquidity = %net_worth.liquidity, equity = %net_worth.equity, total = %net_worth.total, "net worth at startup");

    wait_for_shutdown().await;
    cancel.cancel();
    tracing::info!("ledger-cli draining in-flight operations and exiting");
    Ok(())
}

#[cfg(unix)]
async fn wait_for_shutdown() {
    use tokio::signal::unix::{signal, SignalKind};
    let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {},
        _ = sigterm.recv() => {},
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown() {
    let _ = tokio::signal::ctrl_c().await;
}
