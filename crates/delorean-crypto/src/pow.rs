use delorean_core::compact::{self, CompactTarget};
use delorean_core::types::Hash256;
use delorean_core::U256;
use once_cell::sync::Lazy;
use scrypt::Params;

/// scrypt with N = 1024 (log2 = 10), r = 1, p = 1 and a 32-byte output.
static HEADER_SCRYPT: Lazy<Params> = Lazy::new(|| {
    Params::new(10, 1, 1, 32).expect("N=1024, r=1, p=1, len=32 are valid scrypt parameters")
});

/// Proof-of-work hash of a serialized block header.
///
/// The header bytes are used as both password and salt.
pub fn scrypt_hash(header_bytes: &[u8]) -> Hash256 {
    let mut out = [0u8; 32];
    scrypt::scrypt(header_bytes, header_bytes, &HEADER_SCRYPT, &mut out)
        .expect("output buffer length matches the configured scrypt length");
    Hash256::from_bytes(out)
}

/// True when `hash`, read as a 256-bit integer, is at or below `target`.
pub fn hash_meets_target(hash: &Hash256, target: &U256) -> bool {
    hash.to_u256() <= *target
}

/// Check a header hash against its claimed `bits`, rejecting encodings that
/// are negative, zero, overflowing or easier than `pow_limit`.
pub fn check_proof_of_work(hash: &Hash256, bits: CompactTarget, pow_limit: &U256) -> bool {
    match compact::to_target(bits) {
        Some(target) if target <= *pow_limit => hash_meets_target(hash, &target),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meets_target_is_inclusive() {
        let target = U256::from(0x1000u64);
        let mut bytes = [0u8; 32];
        bytes[0] = 0x00;
        bytes[1] = 0x10;
        let at_target = Hash256::from_bytes(bytes);
        assert!(hash_meets_target(&at_target, &target));

        bytes[0] = 0x01;
        let above = Hash256::from_bytes(bytes);
        assert!(!hash_meets_target(&above, &target));
    }

    #[test]
    fn bits_easier_than_limit_are_rejected() {
        let limit = U256::MAX >> 16;
        let hash = Hash256::ZERO;
        assert!(check_proof_of_work(&hash, CompactTarget::from_consensus(0x1f00ffff), &limit));
        assert!(!check_proof_of_work(&hash, CompactTarget::from_consensus(0x207fffff), &limit));
        assert!(!check_proof_of_work(&hash, CompactTarget::from_consensus(0x04923456), &limit));
    }

    #[test]
    fn scrypt_hash_is_deterministic() {
        let header = [7u8; 80];
        assert_eq!(scrypt_hash(&header), scrypt_hash(&header));
        assert_ne!(scrypt_hash(&header), scrypt_hash(&[8u8; 80]));
    }
}
