use anchor_lang::prelude::*;

use crate::constants::PARTICIPANTS_PAGE;
use crate::error::BurnLotteryError;
use crate::state::{
    selection_point, Escrow, LedgerClock, LotteryConfig, RandomnessCommitment, Sample, SeedSalt,
};

#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace,
)]
pub enum RoundState {
    #[default]
    Open,
    AwaitingReveal,
    Resolved,
}

/// One participant's standing in a round.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct Entry {
    pub participant: Pubkey,
    /// Sum of every accepted contribution by this participant in the round.
    pub cumulative_amount: u64,
    /// Weight derived from `cumulative_amount` at the latest entry.
    pub ticket_weight: u64,
}

/// Per-round state. One account per round number, kept forever.
#[account]
#[derive(Debug, Default)]
pub struct Round {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// Round number, starting at 1. Zero means the account was allocated
    /// ahead of time and never opened.
    pub number: u64,

    /// UNIX timestamp at which the round started accepting entries.
    pub opened_at: i64,

    /// Seconds after `opened_at` at which the round may be closed.
    pub duration: i64,

    pub state: RoundState,

    /// Lamports held in the vault for this round's winner.
    pub prize_pool: u64,

    /// Lamports contributed by all entries of this round.
    pub total_amount: u64,

    /// Sum of the ticket weights of all entries.
    pub total_weight: u64,

    pub max_participants: u16,

    /// Minimum entry at opening; ticket tiers are counted from here for the
    /// whole round.
    pub tier_base: u64,

    pub commitment: RandomnessCommitment,

    /// Seed the winner was drawn with. Zero until resolved with a winner.
    pub seed: [u8; 32],

    /// UNIX timestamp of resolution. Zero while unresolved.
    pub resolved_at: i64,

    /// Set once resolved with a winner; retained after claim or sweep.
    pub escrow: Option<Escrow>,

    /// Distinct participants in insertion order.
    pub entries: Vec<Entry>,
}

/// What one accepted entry did to the participant's standing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryTally {
    pub cumulative_amount: u64,
    pub ticket_weight: u64,
    pub first_in_round: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseOutcome {
    Committed { commit_slot: u64, reveal_slot: u64 },
    /// No participants: resolved without randomness.
    ResolvedEmpty,
    /// Someone else already committed; nothing changed.
    AlreadyCommitted,
    /// The round was resolved earlier; nothing changed.
    AlreadyResolved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Draw {
    Winner { index: usize, seed: [u8; 32] },
    Recommitted { stale_commit_slot: u64, commit_slot: u64 },
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomnessStatus {
    pub round_number: u64,
    pub committed: bool,
    pub commit_slot: u64,
    pub reveal_slot: u64,
    pub slots_until_reveal: u64,
    pub resolved: bool,
}

impl Round {
    const FIXED_SPACE: usize = 1 // bump
        + 8 // number
        + 8 // opened_at
        + 8 // duration
        + RoundState::INIT_SPACE
        + 8 // prize_pool
        + 8 // total_amount
        + 8 // total_weight
        + 2 // max_participants
        + 8 // tier_base
        + RandomnessCommitment::INIT_SPACE
        + 32 // seed
        + 8 // resolved_at
        + 1 + Escrow::INIT_SPACE
        + 4; // entries length prefix

    /// Account size including the discriminator for a round holding up to
    /// `max_participants` entries.
    pub const fn space(max_participants: u16) -> usize {
        8 + Self::FIXED_SPACE + max_participants as usize * Entry::INIT_SPACE
    }

    pub fn open(&mut self, bump: u8, number: u64, now: i64, config: &LotteryConfig) {
        *self = Self {
            bump,
            number,
            opened_at: now,
            duration: config.round_duration,
            max_participants: config.max_participants,
            tier_base: config.min_entry,
            ..Self::default()
        };
    }

    pub fn is_due(&self, now: i64) -> bool {
        now.saturating_sub(self.opened_at) >= self.duration
    }

    pub fn time_remaining(&self, now: i64) -> i64 {
        self.opened_at
            .saturating_add(self.duration)
            .saturating_sub(now)
            .max(0)
    }

    pub fn participant_count(&self) -> u16 {
        self.entries.len() as u16
    }

    pub fn entry_of(&self, participant: &Pubkey) -> Option<&Entry> {
        self.entries.iter().find(|e| e.participant == *participant)
    }

    /// Up to `PARTICIPANTS_PAGE` entries starting at `offset`, in insertion order.
    pub fn participants_page(&self, offset: u32) -> Vec<Entry> {
        self.entries
            .iter()
            .skip(offset as usize)
            .take(PARTICIPANTS_PAGE)
            .copied()
            .collect()
    }

    pub fn record_entry(
        &mut self,
        participant: Pubkey,
        amount: u64,
        prize: u64,
        config: &LotteryConfig,
        now: i64,
    ) -> Result<EntryTally> {
        require!(
            self.state == RoundState::Open,
            BurnLotteryError::RoundNotOpen
        );
        require!(!self.is_due(now), BurnLotteryError::RoundEnded);

        let (position, first_in_round) =
            match self.entries.iter().position(|e| e.participant == participant) {
                Some(position) => (position, false),
                None => {
                    require!(
                        self.entries.len() < self.max_participants as usize,
                        BurnLotteryError::RoundFull
                    );
                    self.entries.push(Entry {
                        participant,
                        cumulative_amount: 0,
                        ticket_weight: 0,
                    });
                    (self.entries.len() - 1, true)
                }
            };

        let entry = &mut self.entries[position];
        let previous_weight = entry.ticket_weight;
        entry.cumulative_amount = entry
            .cumulative_amount
            .checked_add(amount)
            .ok_or(BurnLotteryError::MathOverflow)?;
        entry.ticket_weight = config.ticket_weight(self.tier_base, entry.cumulative_amount);
        let tally = EntryTally {
            cumulative_amount: entry.cumulative_amount,
            ticket_weight: entry.ticket_weight,
            first_in_round,
        };

        self.total_weight = self
            .total_weight
            .checked_sub(previous_weight)
            .and_then(|w| w.checked_add(tally.ticket_weight))
            .ok_or(BurnLotteryError::MathOverflow)?;
        self.total_amount = self
            .total_amount
            .checked_add(amount)
            .ok_or(BurnLotteryError::MathOverflow)?;
        self.add_to_prize_pool(prize)?;

        Ok(tally)
    }

    pub fn add_to_prize_pool(&mut self, amount: u64) -> Result<()> {
        self.prize_pool = self
            .prize_pool
            .checked_add(amount)
            .ok_or(BurnLotteryError::MathOverflow)?;
        Ok(())
    }

    /// Commits randomness for a due round, or resolves it outright when
    /// nobody entered. Repeated calls are no-ops.
    pub fn close_if_due(&mut self, now: i64, slot: u64, maturation_delay: u64) -> Result<CloseOutcome> {
        match self.state {
            RoundState::Resolved => return Ok(CloseOutcome::AlreadyResolved),
            RoundState::AwaitingReveal => return Ok(CloseOutcome::AlreadyCommitted),
            RoundState::Open => {}
        }
        require!(self.is_due(now), BurnLotteryError::RoundNotDue);

        if self.entries.is_empty() {
            self.state = RoundState::Resolved;
            self.resolved_at = now;
            return Ok(CloseOutcome::ResolvedEmpty);
        }

        self.commitment.commit(slot, maturation_delay)?;
        self.state = RoundState::AwaitingReveal;
        Ok(CloseOutcome::Committed {
            commit_slot: slot,
            reveal_slot: self.commitment.reveal_slot(),
        })
    }

    /// Reveals the committed seed and picks the winning entry. A stale
    /// commitment is replaced by one at the current slot instead.
    pub fn draw<L: LedgerClock>(&mut self, ledger: &L) -> Result<Draw> {
        match self.state {
            RoundState::Resolved => return err!(BurnLotteryError::RoundAlreadyResolved),
            RoundState::Open => return err!(BurnLotteryError::MustCommitFirst),
            RoundState::AwaitingReveal => {}
        }

        let salt = SeedSalt {
            round_number: self.number,
            participants: self.participant_count(),
            total_weight: self.total_weight,
        };
        match self.commitment.reveal(ledger, &salt)? {
            Sample::Seed(seed) => {
                let index = self
                    .select_winner(&seed)
                    .ok_or(BurnLotteryError::MathOverflow)?;
                Ok(Draw::Winner { index, seed })
            }
            Sample::Stale => {
                let stale_commit_slot = self.commitment.commit_slot;
                let commit_slot = ledger.current_sequence();
                self.commitment.recommit(commit_slot)?;
                Ok(Draw::Recommitted {
                    stale_commit_slot,
                    commit_slot,
                })
            }
        }
    }

    /// Index of the first entry whose cumulative weight exceeds the
    /// seed's selection point.
    pub fn select_winner(&self, seed: &[u8; 32]) -> Option<usize> {
        if self.total_weight == 0 {
            return None;
        }
        let point = selection_point(seed, self.total_weight);
        let mut cumulative = 0u64;
        self.entries.iter().position(|entry| {
            cumulative = cumulative.saturating_add(entry.ticket_weight);
            cumulative > point
        })
    }

    pub fn finish(&mut self, seed: [u8; 32], escrow: Escrow, now: i64) {
        self.seed = seed;
        self.escrow = Some(escrow);
        self.resolved_at = now;
        self.state = RoundState::Resolved;
        self.commitment.clear();
    }

    pub fn randomness_status(&self, current_slot: u64) -> RandomnessStatus {
        RandomnessStatus {
            round_number: self.number,
            committed: self.commitment.committed,
            commit_slot: self.commitment.commit_slot,
            reveal_slot: if self.commitment.committed {
                self.commitment.reveal_slot()
            } else {
                0
            },
            slots_until_reveal: self.commitment.slots_until_reveal(current_slot),
            resolved: self.state == RoundState::Resolved,
        }
    }
}
