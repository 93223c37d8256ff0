//! Compiled-in seed nodes and their conversion into peer-discovery hints.

use delorean_core::constants::ONE_WEEK_SECS;
use delorean_core::types::Timestamp;
use rand::Rng;
use serde::Serialize;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use tracing::debug;

/// A raw seed entry: 16-byte (IPv6 or IPv4-mapped) address and port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedSpec6 {
    pub addr: [u8; 16],
    pub port: u16,
}

const fn ipv4_seed(a: u8, b: u8, c: u8, d: u8, port: u16) -> SeedSpec6 {
    SeedSpec6 {
        addr: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, a, b, c, d],
        port,
    }
}

// Seed hosts sit in documentation ranges until operators publish theirs;
// regenerate these tables from the operator list before a release.

/// Main-network seed nodes.
pub const MAIN_SEEDS: &[SeedSpec6] = &[
    ipv4_seed(192, 0, 2, 10, 20005),
    ipv4_seed(192, 0, 2, 11, 20005),
    ipv4_seed(198, 51, 100, 10, 20005),
    ipv4_seed(203, 0, 113, 10, 20005),
];

/// Test-network seed nodes.
pub const TEST_SEEDS: &[SeedSpec6] = &[
    ipv4_seed(192, 0, 2, 20, 20010),
    ipv4_seed(198, 51, 100, 20, 20010),
];

/// A seed with a synthetic last-seen time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeedAddress {
    pub addr: Ipv6Addr,
    pub port: u16,
    pub last_seen: Timestamp,
}

impl SeedAddress {
    pub fn socket_addr(&self) -> SocketAddr {
        let ip = match self.addr.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(self.addr),
        };
        SocketAddr::new(ip, self.port)
    }
}

/// Convert a seed table using the wall clock and the thread-local RNG.
pub fn convert_seeds(table: &[SeedSpec6]) -> Vec<SeedAddress> {
    convert_seeds_with(table, chrono::Utc::now().timestamp(), &mut rand::thread_rng())
}

/// Convert a seed table, backdating each entry's last-seen time by a uniform
/// random amount in `[1 week, 2 weeks)` before `now`.
///
/// Peers advertise addresses with recent timestamps, so a node only leans on
/// these seeds until it has heard from the network. Order and length follow
/// the table; duplicates are left for the address manager.
pub fn convert_seeds_with<R: Rng>(
    table: &[SeedSpec6],
    now: Timestamp,
    rng: &mut R,
) -> Vec<SeedAddress> {
    let seeds: Vec<SeedAddress> = table
        .iter()
        .map(|spec| SeedAddress {
            addr: Ipv6Addr::from(spec.addr),
            port: spec.port,
            last_seen: now - ONE_WEEK_SECS - rng.gen_range(0..ONE_WEEK_SECS),
        })
        .collect();
    debug!(count = seeds.len(), "converted fixed seeds");
    seeds
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const NOW: Timestamp = 1_700_000_000;

    #[test]
    fn timestamps_fall_between_one_and_two_weeks_ago() {
        let mut rng = StdRng::seed_from_u64(7);
        let table: Vec<SeedSpec6> = (0..500u16).map(|i| ipv4_seed(10, 0, 0, 1, i)).collect();
        let seeds = convert_seeds_with(&table, NOW, &mut rng);
        assert_eq!(seeds.len(), table.len());
        for seed in &seeds {
            assert!(seed.last_seen <= NOW - ONE_WEEK_SECS);
            assert!(seed.last_seen > NOW - 2 * ONE_WEEK_SECS);
        }
        // Not all the same offset.
        assert!(seeds.iter().any(|s| s.last_seen != seeds[0].last_seen));
    }

    #[test]
    fn addresses_and_order_are_preserved() {
        let mut rng = StdRng::seed_from_u64(1);
        let seeds = convert_seeds_with(MAIN_SEEDS, NOW, &mut rng);
        for (spec, seed) in MAIN_SEEDS.iter().zip(&seeds) {
            assert_eq!(seed.addr.octets(), spec.addr);
            assert_eq!(seed.port, spec.port);
        }
    }

    #[test]
    fn duplicates_are_kept() {
        let table = [ipv4_seed(1, 2, 3, 4, 5), ipv4_seed(1, 2, 3, 4, 5)];
        let seeds = convert_seeds_with(&table, NOW, &mut StdRng::seed_from_u64(3));
        assert_eq!(seeds.len(), 2);
    }

    #[test]
    fn empty_table_converts_to_nothing() {
        assert!(convert_seeds(&[]).is_empty());
    }

    #[test]
    fn mapped_addresses_unmap_to_ipv4() {
        let seed = convert_seeds(&[ipv4_seed(127, 0, 0, 1, 20005)]).remove(0);
        assert_eq!(seed.socket_addr(), "127.0.0.1:20005".parse().unwrap());
    }
}
