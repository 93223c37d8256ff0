use thiserror::Error;

use crate::types::NetworkKind;

#[derive(Debug, Error)]
pub enum ParamsError {
    // ── Configuration ────────────────────────────────────────────────────────
    #[error("invalid combination of --regtest and --testnet")]
    ConflictingNetworkFlags,

    // ── Integrity ────────────────────────────────────────────────────────────
    #[error("{network} genesis hash mismatch: expected {expected}, got {got}")]
    GenesisHashMismatch {
        network: NetworkKind,
        expected: String,
        got: String,
    },

    #[error("{network} genesis merkle root mismatch: expected {expected}, got {got}")]
    MerkleRootMismatch {
        network: NetworkKind,
        expected: String,
        got: String,
    },

    #[error("genesis coinbase script cannot be built: {0}")]
    GenesisScript(String),

    // ── Selection ────────────────────────────────────────────────────────────
    #[error("unimplemented network: {0}")]
    UnimplementedNetwork(String),

    #[error("chain parameters already installed")]
    AlreadyInstalled,

    // ── Constants ────────────────────────────────────────────────────────────
    #[error("invalid hex constant: {0}")]
    InvalidHex(String),
}

impl ParamsError {
    /// Both `-testnet` and `-regtest` were requested.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, ParamsError::ConflictingNetworkFlags)
    }

    /// A recomputed genesis value disagrees with its hardcoded constant.
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            ParamsError::GenesisHashMismatch { .. } | ParamsError::MerkleRootMismatch { .. }
        )
    }
}
