pub mod hash;
pub mod pow;

pub use hash::{merkle_root, sha256d};
pub use pow::{check_proof_of_work, hash_meets_target, scrypt_hash};
