use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ParamsError;
use bitcoin::hashes::Hash as _;
use bitcoin::{BlockHash, TxMerkleNode, Txid};
use primitive_types::U256;

/// Amount in base units (1 coin = `COIN` units).
pub type Amount = i64;

/// Unix timestamp (seconds, UTC).
pub type Timestamp = i64;

// ── Hash256 ──────────────────────────────────────────────────────────────────

/// 32-byte hash stored in internal (little-endian) byte order.
///
/// Hex formatting reverses the bytes, so a hash reads the same way it does
/// in block explorers and in the hardcoded constants.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    pub const ZERO: Hash256 = Hash256([0u8; 32]);

    pub fn from_bytes(b: [u8; 32]) -> Self {
        Self(b)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Parse a display-order hex string, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, ParamsError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| ParamsError::InvalidHex(format!("{s}: {e}")))?;
        if bytes.len() != 32 {
            return Err(ParamsError::InvalidHex(format!(
                "{s}: expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 32];
        for (dst, src) in arr.iter_mut().zip(bytes.iter().rev()) {
            *dst = *src;
        }
        Ok(Self(arr))
    }

    pub fn to_hex(&self) -> String {
        let mut reversed = self.0;
        reversed.reverse();
        hex::encode(reversed)
    }

    /// Interpret the hash as a 256-bit unsigned integer.
    pub fn to_u256(&self) -> U256 {
        U256::from_little_endian(&self.0)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({}…)", &self.to_hex()[..16])
    }
}

impl Serialize for Hash256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash256::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl From<BlockHash> for Hash256 {
    fn from(h: BlockHash) -> Self {
        Self(h.to_byte_array())
    }
}

impl From<Hash256> for BlockHash {
    fn from(h: Hash256) -> Self {
        BlockHash::from_byte_array(h.0)
    }
}

impl From<TxMerkleNode> for Hash256 {
    fn from(h: TxMerkleNode) -> Self {
        Self(h.to_byte_array())
    }
}

impl From<Hash256> for TxMerkleNode {
    fn from(h: Hash256) -> Self {
        TxMerkleNode::from_byte_array(h.0)
    }
}

impl From<Txid> for Hash256 {
    fn from(h: Txid) -> Self {
        Self(h.to_byte_array())
    }
}

// ── NetworkKind ──────────────────────────────────────────────────────────────

/// The networks a node can run on. Exactly one is active per process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    Main,
    Test,
    Regtest,
}

impl NetworkKind {
    pub const ALL: [NetworkKind; 3] = [NetworkKind::Main, NetworkKind::Test, NetworkKind::Regtest];

    /// Subdirectory of the data directory used by this network.
    pub fn data_dir_tag(&self) -> &'static str {
        match self {
            NetworkKind::Main => "",
            NetworkKind::Test => "testnet",
            NetworkKind::Regtest => "regtest",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkKind::Main => "main",
            NetworkKind::Test => "test",
            NetworkKind::Regtest => "regtest",
        }
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkKind {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(NetworkKind::Main),
            "test" | "testnet" => Ok(NetworkKind::Test),
            "regtest" => Ok(NetworkKind::Regtest),
            other => Err(ParamsError::UnimplementedNetwork(other.to_string())),
        }
    }
}

// ── Base58Type ───────────────────────────────────────────────────────────────

/// Categories of Base58Check payloads that carry a per-network version prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
}

impl Base58Type {
    pub const ALL: [Base58Type; 5] = [
        Base58Type::PubkeyAddress,
        Base58Type::ScriptAddress,
        Base58Type::SecretKey,
        Base58Type::ExtPublicKey,
        Base58Type::ExtSecretKey,
    ];
}
