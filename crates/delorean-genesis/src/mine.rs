//! Offline genesis nonce search.
//!
//! Only compiled with the `miner` feature and only driven by the
//! `mine-genesis` binary. Node startup never reaches this code: it is used to
//! regenerate the hardcoded time/nonce/hash constants after a genesis input
//! changes.

use bitcoin::block::Header;
use delorean_core::compact;
use delorean_core::types::Hash256;
use delorean_crypto::hash_meets_target;
use tracing::{debug, info, warn};

use crate::block::pow_hash;

const PROGRESS_INTERVAL: u64 = 1 << 20;

/// A header whose hash satisfies its own `bits`.
#[derive(Clone, Debug)]
pub struct MinedHeader {
    pub header: Header,
    pub hash: Hash256,
    pub attempts: u64,
}

/// Brute-force the nonce of `header` until its hash is at or below the
/// target encoded in its `bits`.
///
/// The starting header is tried first. When the nonce wraps past
/// `u32::MAX` the timestamp is bumped by one second and the search
/// continues.
///
/// Returns `None` if `bits` does not decode to a usable target, or if the
/// nonce wraps while the timestamp is already `u32::MAX`.
pub fn search_nonce(mut header: Header) -> Option<MinedHeader> {
    let target = compact::to_target(header.bits)?;
    info!(
        bits = %compact::to_hex(header.bits),
        start_nonce = header.nonce,
        time = header.time,
        "searching for genesis nonce"
    );

    let mut attempts: u64 = 0;
    loop {
        let hash = pow_hash(&header);
        attempts += 1;
        if hash_meets_target(&hash, &target) {
            info!(nonce = header.nonce, time = header.time, %hash, attempts, "genesis nonce found");
            return Some(MinedHeader {
                header,
                hash,
                attempts,
            });
        }

        header.nonce = header.nonce.wrapping_add(1);
        if header.nonce == 0 {
            let Some(time) = header.time.checked_add(1) else {
                warn!(attempts, "nonce wrapped at the last timestamp, giving up");
                return None;
            };
            warn!(time, "nonce wrapped, incrementing time");
            header.time = time;
        }
        if attempts % PROGRESS_INTERVAL == 0 {
            debug!(attempts, nonce = header.nonce, "still searching");
        }
    }
}
