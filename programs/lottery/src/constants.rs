// Centralized protocol constants

// Limits
// ======

/// Hard cap on the player list. The Lottery account is created with `init`,
/// so its size must be deterministic and stay under the CPI allocation
/// limit (10 KiB). 256 keys keeps the account at ~8.3 KiB.
pub const MAX_PLAYERS: usize = 256;

// Defaults (Devnet)
// =================

/// Longest allowed upkeep interval. Elapsed time is measured against the
/// i64 unix clock, so intervals past i64::MAX seconds could never elapse.
pub const MAX_INTERVAL_SECONDS: u64 = i64::MAX as u64;

/// Default entrance fee in lamports (0.01 SOL).
pub const DEFAULT_ENTRANCE_FEE: u64 = 10_000_000;

/// Default upkeep interval in seconds. Dev default; check current config.
pub const DEFAULT_INTERVAL_SECONDS: u64 = 30;

/// Initial version for account structures.
pub const INITIAL_VERSION: u16 = 1;

/// First randomness request id. Ids start at 1 so 0 can mean "none
/// outstanding".
pub const INITIAL_REQUEST_ID: u64 = 1;
