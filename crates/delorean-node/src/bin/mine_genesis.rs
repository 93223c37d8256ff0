//! mine-genesis — regenerate genesis time/nonce/hash constants.
//!
//! Offline tool; the node never runs it. Start from the compiled-in genesis
//! inputs, override header fields as needed and paste the printed values
//! into the chain parameters.

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::info;

use delorean_core::compact::{self, CompactTarget};
use delorean_core::types::Hash256;
use delorean_genesis::mine::search_nonce;
use delorean_genesis::{build_genesis, GenesisSpec, GENESIS_TX_TIME};

#[derive(Parser, Debug)]
#[command(name = "mine-genesis", version, about = "Search for a genesis block nonce")]
struct Args {
    /// Header timestamp to start from.
    #[arg(long, default_value_t = GENESIS_TX_TIME)]
    time: u32,

    /// Compact difficulty bits, in hex.
    #[arg(long, default_value = "1f00ffff", value_parser = parse_bits)]
    bits: CompactTarget,

    /// Nonce to start from.
    #[arg(long, default_value_t = 0)]
    nonce: u32,
}

#[derive(Serialize)]
struct MinedGenesis {
    time: u32,
    nonce: u32,
    bits: String,
    hash: Hash256,
    merkle_root: Hash256,
    attempts: u64,
}

fn parse_bits(s: &str) -> Result<CompactTarget, std::num::ParseIntError> {
    u32::from_str_radix(s.trim_start_matches("0x"), 16).map(CompactTarget::from_consensus)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let block = build_genesis(&GenesisSpec::new(args.time, args.bits, args.nonce))
        .context("building genesis block")?;
    info!(merkle_root = %block.merkle_root(), "genesis coinbase built");

    let mined = search_nonce(block.header)
        .with_context(|| {
            format!(
                "bits {} do not encode a usable target, or the search ran out of timestamps",
                compact::to_hex(args.bits)
            )
        })?;

    let out = MinedGenesis {
        time: mined.header.time,
        nonce: mined.header.nonce,
        bits: compact::to_hex(mined.header.bits),
        hash: mined.hash,
        merkle_root: mined.header.merkle_root.into(),
        attempts: mined.attempts,
    };
    println!("{}", serde_json::to_string_pretty(&out).context("encoding result")?);
    Ok(())
}
