//! Transaction and block types with their consensus serialization.
//!
//! Headers are rust-bitcoin's 80-byte `block::Header`, but on this chain a
//! header is identified by its scrypt hash rather than double SHA-256.
//! Transactions carry a timestamp after the version field, so
//! `Transaction` is a local type whose encoding is composed from
//! rust-bitcoin's input and output encoders.

use bitcoin::block::{Header, Version};
use bitcoin::consensus::encode::{self, Encodable};
use bitcoin::{io, CompactTarget, TxIn, TxOut};
use delorean_core::types::Hash256;
use delorean_crypto::{merkle_root, scrypt_hash, sha256d};
use serde::Serialize;

// ── Transactions ─────────────────────────────────────────────────────────────

/// A timestamped transaction. Witness data is never serialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub version: i32,
    pub time: u32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    pub fn txid(&self) -> Hash256 {
        sha256d(&encode::serialize(self))
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_output.is_null()
    }
}

impl Encodable for Transaction {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        let mut len = self.version.consensus_encode(w)?;
        len += self.time.consensus_encode(w)?;
        len += self.inputs.consensus_encode(w)?;
        len += self.outputs.consensus_encode(w)?;
        len += self.lock_time.consensus_encode(w)?;
        Ok(len)
    }
}

// ── Blocks ───────────────────────────────────────────────────────────────────

/// Proof-of-work hash of a header; also the block's identity.
pub fn pow_hash(header: &Header) -> Hash256 {
    scrypt_hash(&encode::serialize(header))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Block {
    pub header: Header,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Assemble a block, deriving the merkle root from `transactions`.
    pub fn new(
        version: i32,
        prev_block: Hash256,
        time: u32,
        bits: CompactTarget,
        nonce: u32,
        transactions: Vec<Transaction>,
    ) -> Self {
        let merkle_root = compute_merkle_root(&transactions);
        Self {
            header: Header {
                version: Version::from_consensus(version),
                prev_blockhash: prev_block.into(),
                merkle_root: merkle_root.into(),
                time,
                bits,
                nonce,
            },
            transactions,
        }
    }

    pub fn hash(&self) -> Hash256 {
        pow_hash(&self.header)
    }

    pub fn prev_block(&self) -> Hash256 {
        self.header.prev_blockhash.into()
    }

    /// Merkle root as committed in the header.
    pub fn merkle_root(&self) -> Hash256 {
        self.header.merkle_root.into()
    }

    /// Merkle root recomputed from the transactions, ignoring the header field.
    pub fn compute_merkle_root(&self) -> Hash256 {
        compute_merkle_root(&self.transactions)
    }
}

fn compute_merkle_root(transactions: &[Transaction]) -> Hash256 {
    let leaves: Vec<Hash256> = transactions.iter().map(Transaction::txid).collect();
    merkle_root(&leaves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, Witness};
    use delorean_core::constants::BLOCK_HEADER_SIZE;

    fn coinbase(time: u32) -> Transaction {
        Transaction {
            version: 1,
            time,
            inputs: vec![TxIn {
                previous_output: OutPoint::null(),
                script_sig: ScriptBuf::new(),
                sequence: Sequence::MAX,
                witness: Witness::from_slice(&[[0xaa; 4]]),
            }],
            outputs: vec![TxOut {
                value: Amount::ZERO,
                script_pubkey: ScriptBuf::new(),
            }],
            lock_time: 0,
        }
    }

    #[test]
    fn header_is_80_bytes_with_bits_and_nonce_last() {
        let block = Block::new(
            1,
            Hash256::ZERO,
            1,
            CompactTarget::from_consensus(0x207fffff),
            2,
            Vec::new(),
        );
        let bytes = encode::serialize(&block.header);
        assert_eq!(bytes.len(), BLOCK_HEADER_SIZE);
        assert_eq!(&bytes[68..72], &[1, 0, 0, 0]);
        assert_eq!(&bytes[72..76], &[0xff, 0xff, 0x7f, 0x20]);
        assert_eq!(&bytes[76..80], &[2, 0, 0, 0]);
        assert!(block.merkle_root().is_zero());
    }

    #[test]
    fn timestamp_follows_version_and_witness_is_dropped() {
        let tx = coinbase(0x0102_0304);
        let bytes = encode::serialize(&tx);
        assert_eq!(&bytes[..4], &[1, 0, 0, 0]);
        assert_eq!(&bytes[4..8], &[0x04, 0x03, 0x02, 0x01]);
        // Input count directly after the timestamp: no segwit marker.
        assert_eq!(bytes[8], 1);
        // version + time + 1 input (36 + 1 + 4) + 1 output (8 + 1) + lock_time
        assert_eq!(bytes.len(), 4 + 4 + 1 + 41 + 1 + 9 + 4);
    }

    #[test]
    fn txid_covers_the_timestamp() {
        assert_ne!(coinbase(1).txid(), coinbase(2).txid());
    }

    #[test]
    fn null_outpoint_marks_coinbase() {
        assert!(coinbase(0).is_coinbase());
        let mut tx = coinbase(0);
        tx.inputs[0].previous_output.vout = 0;
        assert!(!tx.is_coinbase());
    }
}
