//! delorean-chainparams
//!
//! The immutable per-network parameter sets (main, test, regtest), the seed
//! table conversion they use, and the startup-time selection of the one
//! network this process runs on.

pub mod global;
pub mod params;
pub mod registry;
pub mod seeds;

pub use params::{Base58Prefixes, ChainParams, NetworkOverrides, ParamsSummary};
pub use registry::{NetworkFlags, NetworkRegistry};
pub use seeds::{convert_seeds, convert_seeds_with, SeedAddress, SeedSpec6};
