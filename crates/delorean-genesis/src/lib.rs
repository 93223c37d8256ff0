//! delorean-genesis
//!
//! Builds and verifies the per-network genesis block.
//!
//! The genesis block holds a single coinbase transaction. Its input spends
//! the null outpoint and carries a provenance headline in the script; its
//! only output is worth nothing and has an empty script, so it can never be
//! spent. The header points at the zero hash and takes its `bits` from the
//! network's proof-of-work limit.
//!
//! Networks differ only in header fields (time, bits, nonce). The coinbase,
//! and therefore the merkle root, is shared by every network.

pub mod block;

#[cfg(feature = "miner")]
pub mod mine;

pub use block::{pow_hash, Block, Transaction};

use bitcoin::script::{Builder, PushBytesBuf};
use bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, TxIn, TxOut, Witness};
use delorean_core::compact::{self, CompactTarget};
use delorean_core::error::ParamsError;
use delorean_core::types::{Hash256, NetworkKind};
use serde::Serialize;
use tracing::{debug, info};

/// Headline embedded in the coinbase input script.
pub const GENESIS_HEADLINE: &str =
    "May 23, 1983. Emmett Brown Commended. Local Inventor Receives Civic Award.";

/// Number pushed ahead of the headline.
pub const GENESIS_SCRIPT_MARKER: i64 = 42;

/// Timestamp of the coinbase transaction (and of the main-network header).
pub const GENESIS_TX_TIME: u32 = 1_439_337_600;

pub const GENESIS_VERSION: i32 = 1;

/// Literal inputs from which a genesis block is derived.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenesisSpec {
    pub headline: &'static str,
    pub script_marker: i64,
    pub tx_time: u32,
    #[serde(with = "bitcoin::amount::serde::as_sat")]
    pub reward: Amount,
    pub version: i32,
    pub time: u32,
    pub bits: CompactTarget,
    pub nonce: u32,
}

impl GenesisSpec {
    /// The shared coinbase with the given header fields.
    pub fn new(time: u32, bits: CompactTarget, nonce: u32) -> Self {
        Self {
            headline: GENESIS_HEADLINE,
            script_marker: GENESIS_SCRIPT_MARKER,
            tx_time: GENESIS_TX_TIME,
            reward: Amount::ZERO,
            version: GENESIS_VERSION,
            time,
            bits,
            nonce,
        }
    }
}

/// The coinbase transaction of a genesis block.
pub fn genesis_coinbase(spec: &GenesisSpec) -> Result<Transaction, ParamsError> {
    let headline = PushBytesBuf::try_from(spec.headline.as_bytes().to_vec())
        .map_err(|e| ParamsError::GenesisScript(e.to_string()))?;
    // The marker goes through `push_int`, which encodes anything above 16 as
    // a data push rather than a small-integer opcode.
    let script_sig = Builder::new()
        .push_int(0)
        .push_int(spec.script_marker)
        .push_slice(headline)
        .into_script();

    Ok(Transaction {
        version: 1,
        time: spec.tx_time,
        inputs: vec![TxIn {
            previous_output: OutPoint::null(),
            script_sig,
            sequence: Sequence::MAX,
            witness: Witness::new(),
        }],
        outputs: vec![TxOut {
            value: spec.reward,
            script_pubkey: ScriptBuf::new(),
        }],
        lock_time: 0,
    })
}

/// Construct the genesis block described by `spec`.
pub fn build_genesis(spec: &GenesisSpec) -> Result<Block, ParamsError> {
    let coinbase = genesis_coinbase(spec)?;
    let block = Block::new(
        spec.version,
        Hash256::ZERO,
        spec.time,
        spec.bits,
        spec.nonce,
        vec![coinbase],
    );
    debug!(
        time = spec.time,
        bits = %compact::to_hex(spec.bits),
        nonce = spec.nonce,
        merkle_root = %block.merkle_root(),
        "built genesis block"
    );
    Ok(block)
}

/// Recompute the genesis hash (and optionally the merkle root) and compare
/// against the network's hardcoded constants.
///
/// A mismatch means this binary would run on an unverifiable chain root;
/// callers must treat the error as fatal.
pub fn verify_genesis(
    network: NetworkKind,
    block: &Block,
    expected_hash: &Hash256,
    expected_merkle_root: Option<&Hash256>,
) -> Result<Hash256, ParamsError> {
    if let Some(expected) = expected_merkle_root {
        let got = block.compute_merkle_root();
        if got != *expected || block.merkle_root() != *expected {
            return Err(ParamsError::MerkleRootMismatch {
                network,
                expected: expected.to_hex(),
                got: got.to_hex(),
            });
        }
    }

    let got = block.hash();
    if got != *expected_hash {
        return Err(ParamsError::GenesisHashMismatch {
            network,
            expected: expected_hash.to_hex(),
            got: got.to_hex(),
        });
    }

    info!(%network, hash = %got, "genesis block verified");
    Ok(got)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAIN_HASH: &str = "0000fbad6508164792ff5e4782f89811d188a391bc5dd47fee4af46bf346014d";
    const MAIN_MERKLE: &str = "e3833561997100c1973551777205f817d3768ac19cc7c8ea96cb28705555e0c8";

    fn main_spec() -> GenesisSpec {
        GenesisSpec::new(GENESIS_TX_TIME, CompactTarget::from_consensus(0x1f00ffff), 167_190)
    }

    #[test]
    fn coinbase_script_layout() {
        let tx = genesis_coinbase(&main_spec()).unwrap();
        let script = tx.inputs[0].script_sig.as_bytes();
        assert_eq!(&script[..4], &[0x00, 0x01, 0x2a, 74]);
        assert_eq!(&script[4..], GENESIS_HEADLINE.as_bytes());
        assert!(tx.is_coinbase());
        assert_eq!(tx.outputs[0].value, Amount::ZERO);
        assert!(tx.outputs[0].script_pubkey.is_empty());
        assert!(tx.inputs[0].witness.is_empty());
    }

    #[test]
    fn main_genesis_matches_constants() {
        let block = build_genesis(&main_spec()).unwrap();
        assert!(block.prev_block().is_zero());
        assert_eq!(block.merkle_root().to_hex(), MAIN_MERKLE);
        assert_eq!(block.hash().to_hex(), MAIN_HASH);

        let hash = Hash256::from_hex(MAIN_HASH).unwrap();
        let merkle = Hash256::from_hex(MAIN_MERKLE).unwrap();
        let verified = verify_genesis(NetworkKind::Main, &block, &hash, Some(&merkle)).unwrap();
        assert_eq!(verified, hash);
    }

    #[test]
    fn merkle_root_is_the_coinbase_txid() {
        let block = build_genesis(&main_spec()).unwrap();
        assert_eq!(block.merkle_root(), block.transactions[0].txid());
    }

    #[test]
    fn header_changes_leave_merkle_root_alone() {
        let main = build_genesis(&main_spec()).unwrap();
        let regtest = build_genesis(&GenesisSpec::new(
            1_411_111_111,
            CompactTarget::from_consensus(0x207fffff),
            516_113,
        ))
        .unwrap();
        assert_eq!(main.merkle_root(), regtest.merkle_root());
        assert_eq!(
            regtest.hash().to_hex(),
            "ee49bd39ff3183e373d488b94fc3f22201c0357b312aa6447612bffba388a06e"
        );
    }

    #[test]
    fn wrong_nonce_is_an_integrity_error() {
        let mut spec = main_spec();
        spec.nonce += 1;
        let block = build_genesis(&spec).unwrap();
        let hash = Hash256::from_hex(MAIN_HASH).unwrap();
        let err = verify_genesis(NetworkKind::Main, &block, &hash, None).unwrap_err();
        assert!(err.is_integrity_error());
        assert!(matches!(err, ParamsError::GenesisHashMismatch { .. }));
    }

    #[test]
    fn wrong_headline_fails_merkle_check() {
        let mut spec = main_spec();
        spec.headline = "Doc Brown";
        let block = build_genesis(&spec).unwrap();
        let hash = Hash256::from_hex(MAIN_HASH).unwrap();
        let merkle = Hash256::from_hex(MAIN_MERKLE).unwrap();
        let err = verify_genesis(NetworkKind::Main, &block, &hash, Some(&merkle)).unwrap_err();
        assert!(matches!(err, ParamsError::MerkleRootMismatch { .. }));
    }

    #[test]
    fn block_serializes_to_json() {
        let block = build_genesis(&main_spec()).unwrap();
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["header"]["merkle_root"], MAIN_MERKLE);
        assert_eq!(json["transactions"][0]["outputs"][0]["script_pubkey"], "");

        let spec = serde_json::to_value(main_spec()).unwrap();
        assert_eq!(spec["reward"], 0);
        assert_eq!(spec["nonce"], 167_190);
    }
}
