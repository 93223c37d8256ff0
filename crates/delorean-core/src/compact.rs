//! Compact ("nBits") difficulty encoding.
//!
//! A 256-bit target is packed into 32 bits as a base-256 float: the top byte
//! is the size in bytes, the low 23 bits are the mantissa and bit 23 is a
//! sign flag. Encoding is `bitcoin::Target::to_compact_lossy`. Decoding is
//! kept here because `Target::from_compact` does not report the sign and
//! overflow flags that proof-of-work checks reject on.

pub use bitcoin::{CompactTarget, Target};
use primitive_types::U256;

const SIGN_BIT: u32 = 0x0080_0000;
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// Result of expanding a compact target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedTarget {
    pub target: U256,
    pub negative: bool,
    pub overflow: bool,
}

/// Encode a non-negative target, such as a network's proof-of-work limit.
pub fn from_limit(limit: &U256) -> CompactTarget {
    let mut be = [0u8; 32];
    limit.to_big_endian(&mut be);
    Target::from_be_bytes(be).to_compact_lossy()
}

pub fn decode(bits: CompactTarget) -> DecodedTarget {
    let raw = bits.to_consensus();
    let size = (raw >> 24) as usize;
    let mut word = raw & MANTISSA_MASK;
    let target = if size <= 3 {
        word >>= 8 * (3 - size);
        U256::from(word)
    } else if size - 3 >= 32 {
        U256::zero()
    } else {
        U256::from(word) << (8 * (size - 3))
    };
    let negative = word != 0 && (raw & SIGN_BIT) != 0;
    let overflow =
        word != 0 && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));
    DecodedTarget {
        target,
        negative,
        overflow,
    }
}

/// The expanded target, or `None` when it is negative, overflows or is zero.
pub fn to_target(bits: CompactTarget) -> Option<U256> {
    let decoded = decode(bits);
    if decoded.negative || decoded.overflow || decoded.target.is_zero() {
        None
    } else {
        Some(decoded.target)
    }
}

/// Zero-padded hex, the way bits are written in logs and JSON.
pub fn to_hex(bits: CompactTarget) -> String {
    format!("{:08x}", bits.to_consensus())
}
