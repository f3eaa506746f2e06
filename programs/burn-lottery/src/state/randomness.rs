use anchor_lang::prelude::*;
use solana_program::hash::hashv;

use crate::constants::ENTROPY_SOURCES;
use crate::error::BurnLotteryError;

/// Read-only view of the ledger's sequence counter and its produced hashes.
pub trait LedgerClock {
    fn current_sequence(&self) -> u64;

    /// Oldest sequence number whose hash is still readable, if any.
    fn oldest_retained(&self) -> Option<u64>;

    /// The first produced sequence at or after `index` that precedes the
    /// current one, with its hash. Sequences can be skipped by the ledger.
    fn sequence_hash(&self, index: u64) -> Option<(u64, [u8; 32])>;
}

/// `LedgerClock` backed by the raw SlotHashes sysvar data.
///
/// Layout: u64 LE entry count, then `(slot: u64 LE, hash: [u8; 32])`
/// entries sorted by descending slot.
pub struct SlotHashesLedger<'a> {
    slot: u64,
    data: &'a [u8],
}

const ENTRY_LEN: usize = 8 + 32;

impl<'a> SlotHashesLedger<'a> {
    pub fn new(slot: u64, data: &'a [u8]) -> Self {
        Self { slot, data }
    }

    fn len(&self) -> usize {
        let Some(prefix) = self.data.get(0..8) else {
            return 0;
        };
        let mut count = [0u8; 8];
        count.copy_from_slice(prefix);
        let declared = u64::from_le_bytes(count) as usize;
        declared.min(self.data.len().saturating_sub(8) / ENTRY_LEN)
    }

    fn entry(&self, i: usize) -> (u64, [u8; 32]) {
        let off = 8 + i * ENTRY_LEN;
        let mut slot = [0u8; 8];
        slot.copy_from_slice(&self.data[off..off + 8]);
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&self.data[off + 8..off + ENTRY_LEN]);
        (u64::from_le_bytes(slot), hash)
    }
}

impl LedgerClock for SlotHashesLedger<'_> {
    fn current_sequence(&self) -> u64 {
        self.slot
    }

    fn oldest_retained(&self) -> Option<u64> {
        match self.len() {
            0 => None,
            n => Some(self.entry(n - 1).0),
        }
    }

    fn sequence_hash(&self, index: u64) -> Option<(u64, [u8; 32])> {
        let mut found = None;
        for i in 0..self.len() {
            let (slot, hash) = self.entry(i);
            if slot < index {
                break;
            }
            if slot < self.slot {
                found = Some((slot, hash));
            }
        }
        found
    }
}

/// Round-scoped salt mixed into the seed next to the ledger entropy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedSalt {
    pub round_number: u64,
    pub participants: u16,
    pub total_weight: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sample {
    Seed([u8; 32]),
    /// The sampled slots aged out of the ledger window; commit again.
    Stale,
}

/// Commit/reveal state of one round.
///
/// Commit only fixes which future slots will be sampled. Their hashes do
/// not exist yet, so neither the committer nor the revealer can steer the
/// seed.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace,
)]
pub struct RandomnessCommitment {
    pub committed: bool,
    pub commit_slot: u64,
    pub maturation_delay: u64,
}

impl RandomnessCommitment {
    pub fn commit(&mut self, slot: u64, maturation_delay: u64) -> Result<()> {
        require!(!self.committed, BurnLotteryError::AlreadyCommitted);
        self.committed = true;
        self.commit_slot = slot;
        self.maturation_delay = maturation_delay;
        Ok(())
    }

    /// Abandons a stale commitment in favour of a fresh one at `slot`.
    pub fn recommit(&mut self, slot: u64) -> Result<()> {
        require!(self.committed, BurnLotteryError::MustCommitFirst);
        self.commit_slot = slot;
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// First slot whose hash feeds the seed.
    pub fn reveal_slot(&self) -> u64 {
        self.commit_slot.saturating_add(self.maturation_delay)
    }

    pub fn slots_until_reveal(&self, current_slot: u64) -> u64 {
        if !self.committed {
            return 0;
        }
        self.reveal_slot().saturating_sub(current_slot)
    }

    pub fn check_matured(&self, current_slot: u64) -> Result<()> {
        require!(self.committed, BurnLotteryError::MustCommitFirst);
        require!(
            current_slot.saturating_sub(self.commit_slot) >= self.maturation_delay,
            BurnLotteryError::NotMatured
        );
        Ok(())
    }

    /// Samples `ENTROPY_SOURCES` produced slot hashes starting at the reveal
    /// slot and folds them with the round salt into one seed.
    pub fn reveal<L: LedgerClock>(&self, ledger: &L, salt: &SeedSalt) -> Result<Sample> {
        self.check_matured(ledger.current_sequence())?;

        let target = self.reveal_slot();
        match ledger.oldest_retained() {
            Some(oldest) if oldest > target => return Ok(Sample::Stale),
            Some(_) => {}
            None => return err!(BurnLotteryError::NotMatured),
        }

        let mut sources = [[0u8; 32]; ENTROPY_SOURCES];
        let mut next = target;
        for source in sources.iter_mut() {
            // not produced yet: the caller retries after more slots
            let (slot, hash) = ledger
                .sequence_hash(next)
                .ok_or(BurnLotteryError::NotMatured)?;
            *source = hash;
            next = slot.checked_add(1).ok_or(BurnLotteryError::MathOverflow)?;
        }

        Ok(Sample::Seed(derive_seed(&sources, self.commit_slot, salt)))
    }
}

pub fn derive_seed(sources: &[[u8; 32]; ENTROPY_SOURCES], commit_slot: u64, salt: &SeedSalt) -> [u8; 32] {
    hashv(&[
        &sources[0],
        &sources[1],
        &sources[2],
        &salt.round_number.to_le_bytes(),
        &commit_slot.to_le_bytes(),
        &salt.participants.to_le_bytes(),
        &salt.total_weight.to_le_bytes(),
    ])
    .to_bytes()
}

/// Maps a seed onto `[0, total_weight)` using its first 16 bytes.
pub fn selection_point(seed: &[u8; 32], total_weight: u64) -> u64 {
    if total_weight == 0 {
        return 0;
    }
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&seed[..16]);
    (u128::from_le_bytes(bytes) % total_weight as u128) as u64
}

/// In-memory ledger for tests: every slot below `slot` is produced except
/// `skipped`, and only the last `window` slots are retained.
#[cfg(test)]
pub(crate) struct MockLedger {
    pub slot: u64,
    pub window: u64,
    pub skipped: Vec<u64>,
}

#[cfg(test)]
impl MockLedger {
    pub fn at(slot: u64) -> Self {
        Self {
            slot,
            window: crate::constants::SLOT_HASHES_WINDOW,
            skipped: Vec::new(),
        }
    }

    pub fn advance(&mut self, slots: u64) {
        self.slot += slots;
    }

    pub fn hash_of(slot: u64) -> [u8; 32] {
        hashv(&[b"mock-slot", &slot.to_le_bytes()]).to_bytes()
    }

    fn produced(&self, slot: u64) -> bool {
        slot < self.slot
            && slot >= self.slot.saturating_sub(self.window)
            && !self.skipped.contains(&slot)
    }
}

#[cfg(test)]
impl LedgerClock for MockLedger {
    fn current_sequence(&self) -> u64 {
        self.slot
    }

    fn oldest_retained(&self) -> Option<u64> {
        (self.slot.saturating_sub(self.window)..self.slot).find(|s| self.produced(*s))
    }

    fn sequence_hash(&self, index: u64) -> Option<(u64, [u8; 32])> {
        (index..self.slot)
            .find(|s| self.produced(*s))
            .map(|s| (s, Self::hash_of(s)))
    }
}
