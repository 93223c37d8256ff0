use bitcoin::hashes::Hash;
use bitcoin::{merkle_tree, TxMerkleNode};
use delorean_core::types::Hash256;

/// SHA-256 applied twice. Used for transaction ids and merkle nodes.
pub fn sha256d(data: &[u8]) -> Hash256 {
    Hash256::from_bytes(bitcoin::hashes::sha256d::Hash::hash(data).to_byte_array())
}

/// Merkle root over a list of leaf hashes.
///
/// Pairs are combined as `sha256d(left || right)`; an odd node at any level
/// is paired with itself. A single leaf is its own root, and an empty list
/// yields the zero hash.
pub fn merkle_root(leaves: &[Hash256]) -> Hash256 {
    merkle_tree::calculate_root(leaves.iter().copied().map(TxMerkleNode::from))
        .map(Hash256::from)
        .unwrap_or(Hash256::ZERO)
}
