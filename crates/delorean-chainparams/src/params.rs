//! Per-network consensus and networking constants.
//!
//! Main is built from literals. Test is Main with a layer of overrides, and
//! Regtest is Test with another layer. Each layer yields an independent,
//! fully populated `ChainParams`; nothing is shared between networks once
//! built.

use delorean_core::compact::{self, CompactTarget};
use delorean_core::constants::{CENT, COIN, MESSAGE_START_SIZE, ONE_HOUR_SECS};
use delorean_core::error::ParamsError;
use delorean_core::types::{Amount, Base58Type, Hash256, NetworkKind, Timestamp};
use delorean_core::U256;
use delorean_genesis::{build_genesis, verify_genesis, Block, GenesisSpec, GENESIS_TX_TIME};
use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::seeds::{convert_seeds_with, SeedAddress, MAIN_SEEDS, TEST_SEEDS};

// ── Hardcoded genesis anchors ────────────────────────────────────────────────

pub const MAIN_GENESIS_HASH: &str =
    "0000fbad6508164792ff5e4782f89811d188a391bc5dd47fee4af46bf346014d";
pub const MAIN_GENESIS_MERKLE_ROOT: &str =
    "e3833561997100c1973551777205f817d3768ac19cc7c8ea96cb28705555e0c8";
pub const MAIN_GENESIS_NONCE: u32 = 167_190;

/// Hash of the test-network genesis header (time 1439337600, bits 0x1f3fffff,
/// nonce 514471).
pub const TEST_GENESIS_HASH: &str =
    "456c13efab03bcb9330aaea90abd9918fdbed30f8d9eee5c6959e7e8d413450c";
/// Previously published test-network hash. No header
/// built from the test inputs hashes to it, so it is not used as an anchor.
pub const TESTNET_PUBLISHED_GENESIS_HASH: &str =
    "001690ba4ea8ee5d4c6b9da04fd573900b8c1ed34cb1272b54e30464c710bdf8";
pub const TEST_GENESIS_NONCE: u32 = 514_471;

pub const REGTEST_GENESIS_HASH: &str =
    "ee49bd39ff3183e373d488b94fc3f22201c0357b312aa6447612bffba388a06e";
pub const REGTEST_GENESIS_TIME: u32 = 1_411_111_111;
pub const REGTEST_GENESIS_NONCE: u32 = 516_113;

const ALERT_PUBKEY: &str = "04ddab6b53a1ddb980cc5fbe689fce5855f55f0d1a0df8b9f027731c05c6bf2dd25dcf63d6fc7e816bd18fed0a92bc8e8f9783bf01e721c154915882d63fb28d07";
const CHECKPOINT_PUBKEY: &str = "044b950f86bc631b6fd7bdcfa5331a2716a7c279e92849ea02e13819a14da9d774f16acc092d5148dc4f3604bd054c3673e5cad11514fe1b2eaa939f8b030d1411";

// ── Base58 prefixes ──────────────────────────────────────────────────────────

/// Version bytes prepended to each Base58Check payload category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Base58Prefixes {
    #[serde(with = "hex::serde")]
    pub pubkey_address: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub script_address: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub secret_key: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub ext_public_key: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub ext_secret_key: Vec<u8>,
}

impl Base58Prefixes {
    pub fn get(&self, kind: Base58Type) -> &[u8] {
        match kind {
            Base58Type::PubkeyAddress => &self.pubkey_address,
            Base58Type::ScriptAddress => &self.script_address,
            Base58Type::SecretKey => &self.secret_key,
            Base58Type::ExtPublicKey => &self.ext_public_key,
            Base58Type::ExtSecretKey => &self.ext_secret_key,
        }
    }
}

// ── ChainParams ──────────────────────────────────────────────────────────────

/// Everything that distinguishes one network from another.
///
/// Built once at startup and only ever shared by reference afterwards.
#[derive(Clone, Debug, Serialize)]
pub struct ChainParams {
    pub network: NetworkKind,
    #[serde(with = "hex::serde")]
    pub message_start: [u8; MESSAGE_START_SIZE],
    #[serde(with = "hex::serde")]
    pub alert_pubkey: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub checkpoint_pubkey: Vec<u8>,
    pub default_port: u16,
    pub rpc_port: u16,
    /// Subdirectory of the data directory; empty for main.
    pub data_dir: &'static str,
    pub require_rpc_password: bool,

    /// Easiest allowed proof-of-work target.
    pub pow_limit: U256,
    /// Easiest allowed proof-of-stake target.
    pub pos_limit: U256,
    pub pos_limit_v2: U256,

    pub base58_prefixes: Base58Prefixes,

    pub genesis_spec: GenesisSpec,
    #[serde(skip)]
    pub genesis: Block,
    pub genesis_hash: Hash256,

    /// Hosts queried for peer addresses before falling back to `fixed_seeds`.
    pub dns_seeds: Vec<&'static str>,
    pub fixed_seeds: Vec<SeedAddress>,

    pub coinbase_maturity: u32,
    pub stake_min_confirmations: u32,
    /// Seconds a coin must age before it can stake.
    pub stake_min_age: i64,
    /// Seconds between stake modifier recomputations.
    pub modifier_interval: i64,
    /// Annual stake reward in base units per coin (20 * CENT = 20%).
    pub stake_coin_year_reward: Amount,
    pub last_pow_block: i32,
    /// Consumed by the staking rules; carried here as-is.
    pub first_pos_block: i32,
    pub target_spacing: i64,
    pub target_timespan: i64,
    pub basic_pow_reward: Amount,
    pub launch_time: Timestamp,
    /// Minimum relay delay in seconds.
    pub min_delay: i64,
    pub max_money: Amount,
}

impl ChainParams {
    /// Build the parameters for `kind` using the wall clock and the
    /// thread-local RNG for seed timestamps.
    pub fn build(kind: NetworkKind) -> Result<Self, ParamsError> {
        Self::build_with(kind, chrono::Utc::now().timestamp(), &mut rand::thread_rng())
    }

    /// Build the parameters for `kind`, verifying every genesis block along
    /// the override chain.
    pub fn build_with<R: Rng>(
        kind: NetworkKind,
        now: Timestamp,
        rng: &mut R,
    ) -> Result<Self, ParamsError> {
        let main = main_params(now, rng)?;
        if kind == NetworkKind::Main {
            return Ok(main);
        }
        let test = test_overrides(now, rng)?.apply(NetworkKind::Test, main)?;
        if kind == NetworkKind::Test {
            return Ok(test);
        }
        regtest_overrides()?.apply(NetworkKind::Regtest, test)
    }

    /// Build every network in one pass using the wall clock and the
    /// thread-local RNG.
    pub fn build_all() -> Result<Vec<Self>, ParamsError> {
        Self::build_all_with(chrono::Utc::now().timestamp(), &mut rand::thread_rng())
    }

    /// Build every network in one pass: Main once, Test from a copy of Main
    /// and Regtest from a copy of Test. Returned in `NetworkKind::ALL` order.
    pub fn build_all_with<R: Rng>(now: Timestamp, rng: &mut R) -> Result<Vec<Self>, ParamsError> {
        let main = main_params(now, rng)?;
        let test = test_overrides(now, rng)?.apply(NetworkKind::Test, main.clone())?;
        let regtest = regtest_overrides()?.apply(NetworkKind::Regtest, test.clone())?;
        Ok(vec![main, test, regtest])
    }

    pub fn network_id(&self) -> NetworkKind {
        self.network
    }

    pub fn genesis_block(&self) -> &Block {
        &self.genesis
    }

    pub fn fixed_seeds(&self) -> &[SeedAddress] {
        &self.fixed_seeds
    }

    pub fn dns_seeds(&self) -> &[&'static str] {
        &self.dns_seeds
    }

    pub fn require_rpc_password(&self) -> bool {
        self.require_rpc_password
    }

    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] {
        self.base58_prefixes.get(kind)
    }

    pub fn pow_limit_compact(&self) -> CompactTarget {
        compact::from_limit(&self.pow_limit)
    }

    pub fn pos_limit_compact(&self) -> CompactTarget {
        compact::from_limit(&self.pos_limit)
    }

    pub fn pos_limit_v2_compact(&self) -> CompactTarget {
        compact::from_limit(&self.pos_limit_v2)
    }

    /// Base58Check-encode `payload` behind this network's version bytes.
    pub fn encode_base58(&self, kind: Base58Type, payload: &[u8]) -> String {
        let mut data = self.base58_prefix(kind).to_vec();
        data.extend_from_slice(payload);
        bs58::encode(data).with_check().into_string()
    }

    pub fn summary(&self) -> ParamsSummary {
        ParamsSummary {
            network: self.network,
            message_start: hex::encode(self.message_start),
            default_port: self.default_port,
            rpc_port: self.rpc_port,
            data_dir: self.data_dir,
            genesis_hash: self.genesis_hash,
            genesis_merkle_root: self.genesis.merkle_root(),
            pow_limit_bits: compact::to_hex(self.pow_limit_compact()),
            dns_seeds: self.dns_seeds.len(),
            fixed_seeds: self.fixed_seeds.len(),
            max_money: self.max_money,
            require_rpc_password: self.require_rpc_password,
        }
    }
}

/// Short overview for logs and `--print-params`.
#[derive(Clone, Debug, Serialize)]
pub struct ParamsSummary {
    pub network: NetworkKind,
    pub message_start: String,
    pub default_port: u16,
    pub rpc_port: u16,
    pub data_dir: &'static str,
    pub genesis_hash: Hash256,
    pub genesis_merkle_root: Hash256,
    pub pow_limit_bits: String,
    pub dns_seeds: usize,
    pub fixed_seeds: usize,
    pub max_money: Amount,
    pub require_rpc_password: bool,
}

// ── Overrides ────────────────────────────────────────────────────────────────

/// Fields a derived network replaces on top of its base. `None` inherits.
#[derive(Clone, Debug, Default)]
pub struct NetworkOverrides {
    pub message_start: Option<[u8; MESSAGE_START_SIZE]>,
    pub alert_pubkey: Option<Vec<u8>>,
    pub default_port: Option<u16>,
    pub rpc_port: Option<u16>,
    pub data_dir: Option<&'static str>,
    pub require_rpc_password: Option<bool>,
    pub pow_limit: Option<U256>,
    pub pos_limit: Option<U256>,
    pub base58_prefixes: Option<Base58Prefixes>,
    pub genesis_time: Option<u32>,
    pub genesis_nonce: Option<u32>,
    /// Required whenever the genesis header can change.
    pub genesis_hash: Option<Hash256>,
    pub dns_seeds: Option<Vec<&'static str>>,
    pub fixed_seeds: Option<Vec<SeedAddress>>,
    pub coinbase_maturity: Option<u32>,
    pub stake_min_confirmations: Option<u32>,
    pub stake_min_age: Option<i64>,
    pub modifier_interval: Option<i64>,
    pub stake_coin_year_reward: Option<Amount>,
    pub last_pow_block: Option<i32>,
    pub max_money: Option<Amount>,
}

impl NetworkOverrides {
    /// Produce the parameters for `network` from `base` plus these overrides.
    ///
    /// The genesis header is rebuilt with `bits` taken from the resulting
    /// proof-of-work limit and checked against the resulting genesis hash.
    pub fn apply(self, network: NetworkKind, base: ChainParams) -> Result<ChainParams, ParamsError> {
        let pow_limit = self.pow_limit.unwrap_or(base.pow_limit);
        let genesis_spec = GenesisSpec {
            time: self.genesis_time.unwrap_or(base.genesis_spec.time),
            nonce: self.genesis_nonce.unwrap_or(base.genesis_spec.nonce),
            bits: compact::from_limit(&pow_limit),
            ..base.genesis_spec
        };
        let genesis_hash = self.genesis_hash.unwrap_or(base.genesis_hash);
        let genesis = build_genesis(&genesis_spec)?;
        verify_genesis(network, &genesis, &genesis_hash, None)?;

        let params = ChainParams {
            network,
            message_start: self.message_start.unwrap_or(base.message_start),
            alert_pubkey: self.alert_pubkey.unwrap_or(base.alert_pubkey),
            checkpoint_pubkey: base.checkpoint_pubkey,
            default_port: self.default_port.unwrap_or(base.default_port),
            rpc_port: self.rpc_port.unwrap_or(base.rpc_port),
            data_dir: self.data_dir.unwrap_or(base.data_dir),
            require_rpc_password: self
                .require_rpc_password
                .unwrap_or(base.require_rpc_password),
            pow_limit,
            pos_limit: self.pos_limit.unwrap_or(base.pos_limit),
            pos_limit_v2: base.pos_limit_v2,
            base58_prefixes: self.base58_prefixes.unwrap_or(base.base58_prefixes),
            genesis_spec,
            genesis,
            genesis_hash,
            dns_seeds: self.dns_seeds.unwrap_or(base.dns_seeds),
            fixed_seeds: self.fixed_seeds.unwrap_or(base.fixed_seeds),
            coinbase_maturity: self.coinbase_maturity.unwrap_or(base.coinbase_maturity),
            stake_min_confirmations: self
                .stake_min_confirmations
                .unwrap_or(base.stake_min_confirmations),
            stake_min_age: self.stake_min_age.unwrap_or(base.stake_min_age),
            modifier_interval: self.modifier_interval.unwrap_or(base.modifier_interval),
            stake_coin_year_reward: self
                .stake_coin_year_reward
                .unwrap_or(base.stake_coin_year_reward),
            last_pow_block: self.last_pow_block.unwrap_or(base.last_pow_block),
            first_pos_block: base.first_pos_block,
            target_spacing: base.target_spacing,
            target_timespan: base.target_timespan,
            basic_pow_reward: base.basic_pow_reward,
            launch_time: base.launch_time,
            min_delay: base.min_delay,
            max_money: self.max_money.unwrap_or(base.max_money),
        };
        info!(%network, port = params.default_port, "chain parameters built");
        Ok(params)
    }
}

fn parse_key(hex_str: &str) -> Result<Vec<u8>, ParamsError> {
    hex::decode(hex_str).map_err(|e| ParamsError::InvalidHex(format!("{hex_str}: {e}")))
}

// ── Networks ─────────────────────────────────────────────────────────────────

fn main_params<R: Rng>(now: Timestamp, rng: &mut R) -> Result<ChainParams, ParamsError> {
    let pow_limit = U256::MAX >> 16;
    let genesis_spec = GenesisSpec::new(
        GENESIS_TX_TIME,
        compact::from_limit(&pow_limit),
        MAIN_GENESIS_NONCE,
    );
    let genesis = build_genesis(&genesis_spec)?;
    let genesis_hash = Hash256::from_hex(MAIN_GENESIS_HASH)?;
    let merkle_root = Hash256::from_hex(MAIN_GENESIS_MERKLE_ROOT)?;
    verify_genesis(NetworkKind::Main, &genesis, &genesis_hash, Some(&merkle_root))?;

    let basic_pow_reward = 1800 * COIN;
    let last_pow_block = 2980;
    let target_spacing = 60;

    let params = ChainParams {
        network: NetworkKind::Main,
        // Rarely used upper-ASCII bytes, invalid as UTF-8.
        message_start: [0x9c, 0x85, 0x19, 0x2f],
        alert_pubkey: parse_key(ALERT_PUBKEY)?,
        checkpoint_pubkey: parse_key(CHECKPOINT_PUBKEY)?,
        default_port: 20005,
        rpc_port: 20007,
        data_dir: NetworkKind::Main.data_dir_tag(),
        require_rpc_password: true,
        pow_limit,
        pos_limit: U256::MAX,
        pos_limit_v2: U256::MAX,
        base58_prefixes: Base58Prefixes {
            pubkey_address: vec![96],
            script_address: vec![85],
            secret_key: vec![224],
            ext_public_key: vec![0x04, 0x88, 0xB2, 0x1E],
            ext_secret_key: vec![0x04, 0x88, 0xAD, 0xE4],
        },
        launch_time: i64::from(genesis_spec.time),
        genesis_spec,
        genesis,
        genesis_hash,
        // No DNS seeds are published for main.
        dns_seeds: Vec::new(),
        fixed_seeds: convert_seeds_with(MAIN_SEEDS, now, rng),
        coinbase_maturity: 120,
        stake_min_confirmations: 120,
        stake_min_age: ONE_HOUR_SECS,
        modifier_interval: 10 * 60,
        stake_coin_year_reward: 20 * CENT,
        last_pow_block,
        first_pos_block: 2780,
        target_spacing,
        target_timespan: 10 * target_spacing,
        basic_pow_reward,
        min_delay: 2,
        max_money: i64::from(last_pow_block) * basic_pow_reward,
    };
    info!(network = %NetworkKind::Main, port = params.default_port, "chain parameters built");
    Ok(params)
}

fn test_overrides<R: Rng>(now: Timestamp, rng: &mut R) -> Result<NetworkOverrides, ParamsError> {
    Ok(NetworkOverrides {
        message_start: Some([0x9d, 0x86, 0x1a, 0x30]),
        alert_pubkey: Some(parse_key(ALERT_PUBKEY)?),
        default_port: Some(20010),
        rpc_port: Some(20012),
        data_dir: Some(NetworkKind::Test.data_dir_tag()),
        pow_limit: Some(U256::MAX >> 10),
        pos_limit: Some(U256::MAX >> 20),
        base58_prefixes: Some(Base58Prefixes {
            pubkey_address: vec![127],
            script_address: vec![196],
            secret_key: vec![255],
            ext_public_key: vec![0x04, 0x35, 0x87, 0xCF],
            ext_secret_key: vec![0x04, 0x35, 0x83, 0x94],
        }),
        genesis_nonce: Some(TEST_GENESIS_NONCE),
        genesis_hash: Some(Hash256::from_hex(TEST_GENESIS_HASH)?),
        dns_seeds: Some(Vec::new()),
        fixed_seeds: Some(convert_seeds_with(TEST_SEEDS, now, rng)),
        coinbase_maturity: Some(10),
        stake_min_confirmations: Some(10),
        stake_min_age: Some(ONE_HOUR_SECS),
        modifier_interval: Some(10 * 60),
        stake_coin_year_reward: Some(10 * CENT),
        // Proof-of-work never ends on the test network.
        last_pow_block: Some(0x7fff_ffff),
        max_money: Some(2_000_000_000 * COIN),
        ..NetworkOverrides::default()
    })
}

fn regtest_overrides() -> Result<NetworkOverrides, ParamsError> {
    Ok(NetworkOverrides {
        message_start: Some([0xf0, 0xf1, 0xf2, 0xf3]),
        pow_limit: Some(U256::MAX >> 1),
        genesis_time: Some(REGTEST_GENESIS_TIME),
        genesis_nonce: Some(REGTEST_GENESIS_NONCE),
        genesis_hash: Some(Hash256::from_hex(REGTEST_GENESIS_HASH)?),
        default_port: Some(18444),
        data_dir: Some(NetworkKind::Regtest.data_dir_tag()),
        // Fixed seeds are inherited from test.
        dns_seeds: Some(Vec::new()),
        require_rpc_password: Some(false),
        ..NetworkOverrides::default()
    })
}
