//! delorean-node — node startup.
//!
//! Startup sequence:
//!   1. Parse flags and initialise logging
//!   2. Build and verify the parameters of every network
//!   3. Select the network from `--testnet` / `--regtest`
//!   4. Install the selected parameters and prepare the data directory
//!
//! Everything after this point (peer-to-peer, validation, RPC) receives the
//! selected `ChainParams` and never reselects.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use delorean_chainparams::{global, NetworkFlags, NetworkRegistry};

use crate::config::NodeConfig;

#[derive(Parser, Debug)]
#[command(
    name = "delorean-node",
    version,
    about = "DeLorean full node"
)]
struct Args {
    /// Use the test network.
    #[arg(long)]
    testnet: bool,

    /// Use a private regression-test network.
    #[arg(long)]
    regtest: bool,

    /// Base data directory; the network tag is appended for test and regtest.
    #[arg(long, default_value = "~/.delorean")]
    datadir: PathBuf,

    /// Print the selected network's parameters as JSON.
    #[arg(long)]
    print_params: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,delorean=debug")),
        )
        .init();

    let args = Args::parse();
    let flags = NetworkFlags::new(args.testnet, args.regtest);
    info!("DeLorean node starting");

    // ── Network selection ─────────────────────────────────────────────────────
    let mut registry = NetworkRegistry::build().context("building chain parameters")?;
    registry
        .select_from_flags(flags)
        .context("selecting network")?;
    let params = registry.finish();
    global::install(Arc::clone(&params)).context("installing chain parameters")?;

    // ── Data directory ────────────────────────────────────────────────────────
    let config = NodeConfig::resolve(flags, &args.datadir).context("resolving data dir")?;
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("creating data dir {}", config.data_dir.display()))?;

    let summary = params.summary();
    info!(
        network = %summary.network,
        port = summary.default_port,
        rpc_port = summary.rpc_port,
        genesis = %summary.genesis_hash,
        seeds = summary.fixed_seeds,
        data_dir = %config.data_dir.display(),
        "chain parameters ready"
    );

    if args.print_params {
        let json = serde_json::to_string_pretty(&summary).context("encoding parameters")?;
        println!("{json}");
    }

    Ok(())
}
