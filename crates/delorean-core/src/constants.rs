/// ─── DeLorean Protocol Constants ────────────────────────────────────────────
///
/// Monetary units and fixed time spans shared by every network.
/// Network-specific values live in `delorean-chainparams`.

// ── Money ────────────────────────────────────────────────────────────────────

/// One coin expressed in base units.
pub const COIN: i64 = 100_000_000;

/// One hundredth of a coin; stake rewards are quoted in CENT per year.
pub const CENT: i64 = 1_000_000;

// ── Time (seconds) ───────────────────────────────────────────────────────────

pub const ONE_HOUR_SECS: i64 = 60 * 60;

pub const ONE_DAY_SECS: i64 = 24 * ONE_HOUR_SECS;

/// Seed addresses are backdated by at least this much.
pub const ONE_WEEK_SECS: i64 = 7 * ONE_DAY_SECS;

// ── Wire ─────────────────────────────────────────────────────────────────────

/// Length of the network magic prefixed to every wire message.
pub const MESSAGE_START_SIZE: usize = 4;

/// Serialized block header length in bytes.
pub const BLOCK_HEADER_SIZE: usize = 80;
