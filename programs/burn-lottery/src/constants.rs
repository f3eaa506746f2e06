use anchor_lang::prelude::*;

/// Seed of the singleton lottery account.
#[constant]
pub const SEED_LOTTERY: &[u8] = b"lottery";

/// Seed of the program-owned vault holding the prize pool and escrows.
#[constant]
pub const SEED_VAULT: &[u8] = b"vault";

/// Seed prefix of per-round accounts, followed by the round number (u64 LE).
#[constant]
pub const SEED_ROUND: &[u8] = b"round";

/// Seed prefix of winner records, followed by the winner index (u64 LE).
#[constant]
pub const SEED_WINNER: &[u8] = b"winner";

/// Seed prefix of lifetime participant statistics, followed by the participant key.
#[constant]
pub const SEED_PLAYER: &[u8] = b"player";

pub const FIRST_ROUND: u64 = 1;

/// Lamports per whole unit of the native currency.
pub const UNIT: u64 = 1_000_000_000;

/// Every entry starts with this many tickets before the amount bonus.
pub const BASE_TICKET_WEIGHT: u64 = 100;

pub const PERCENT_DENOMINATOR: u64 = 100;

/// Hard upper bound on participants per round. A full entry list fits in
/// borsh's 4 KiB preallocation, so decoding a round never regrows it on the
/// 32 KiB bump heap and two rounds can be loaded by one instruction.
pub const MAX_PARTICIPANTS: u16 = 85;

/// Bytes borsh preallocates for a decoded `Vec` before growing it.
pub const DECODE_PREALLOC_BYTES: usize = 4096;

/// Entries per participant-list query; keeps the reply inside the
/// 1024-byte return data limit.
pub const PARTICIPANTS_PAGE: usize = 20;

/// Number of produced slot hashes mixed into every seed.
pub const ENTROPY_SOURCES: usize = 3;

/// Entries retained by the SlotHashes sysvar.
pub const SLOT_HASHES_WINDOW: u64 = 512;

/// Maturation must leave room in the SlotHashes window to sample after it.
pub const MAX_MATURATION_DELAY: u64 = 256;

// ==================== Reference deployment defaults ====================

pub const DEFAULT_BURN_PCT: u8 = 65;
pub const DEFAULT_PRIZE_PCT: u8 = 27;
pub const DEFAULT_OPERATOR_PCT: u8 = 8;

pub const DEFAULT_MIN_ENTRY: u64 = 5 * UNIT;
pub const DEFAULT_MAX_ENTRY: u64 = 8 * UNIT;
pub const DEFAULT_TIER_STEP: u64 = UNIT;
pub const DEFAULT_TIER_BONUS_CAP: u64 = 3;

/// Five minutes.
pub const DEFAULT_ROUND_DURATION: i64 = 5 * 60;
pub const DEFAULT_MATURATION_DELAY: u64 = 3;
pub const DEFAULT_GRACE_ROUNDS: u64 = 10;
pub const DEFAULT_MAX_PARTICIPANTS: u16 = 80;
