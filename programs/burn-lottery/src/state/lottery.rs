use anchor_lang::prelude::*;

use crate::constants::FIRST_ROUND;
use crate::error::BurnLotteryError;
use crate::state::{
    CloseOutcome, Draw, Escrow, EscrowStatus, LedgerClock, LotteryConfig, Round, RoundState,
    Split, WinnerRecord,
};

/// Singleton authority over rounds, escrows and the owner levers.
#[account]
#[derive(InitSpace, Debug, Default)]
pub struct Lottery {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,
    pub vault_bump: u8,

    /// Holder of the admin levers. The default key once renounced.
    pub owner: Pubkey,

    /// Receives the operator share of every entry and sweep.
    pub operator: Pubkey,

    /// Blocks new entries only.
    pub paused: bool,

    /// Set for the duration of a guarded operation.
    pub locked: bool,

    pub config: LotteryConfig,

    /// The round currently accepting entries or awaiting its draw.
    pub round_number: u64,

    pub total_burned: u64,
    pub total_operator_paid: u64,
    pub total_escrowed: u64,
    pub total_claimed: u64,
    pub total_swept: u64,

    /// Lamports held in the vault for pending escrows.
    pub escrow_outstanding: u64,
    pub pending_escrows: u64,

    pub winners_count: u64,

    /// Distinct participants over the lottery's lifetime.
    pub total_participants: u64,
}

/// Realized effect of one accepted entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryReceipt {
    pub round_number: u64,
    pub split: Split,
    pub cumulative_amount: u64,
    pub ticket_weight: u64,
    pub first_in_round: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Resolved {
        record: WinnerRecord,
        escrow: Escrow,
        participants: u16,
        next_round: u64,
    },
    /// The committed slots aged out; a fresh commitment replaced them.
    Recommitted {
        stale_commit_slot: u64,
        commit_slot: u64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payout {
    pub round_number: u64,
    pub winner: Pubkey,
    pub amount: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SweepReceipt {
    pub round_number: u64,
    pub amount: u64,
    pub split: Split,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LotteryStatus {
    pub round_number: u64,
    pub round_state: RoundState,
    pub time_remaining: i64,
    pub paused: bool,
    pub owner: Pubkey,
    pub operator: Pubkey,
    pub min_entry: u64,
    pub max_entry: u64,
    pub current_prize_pool: u64,
    pub current_participants: u16,
    pub total_participants: u64,
    pub winners_count: u64,
    pub total_burned: u64,
    pub total_operator_paid: u64,
    pub escrow_outstanding: u64,
    pub pending_escrows: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EscrowView {
    pub round_number: u64,
    pub winner: Pubkey,
    pub amount: u64,
    pub claimable_until_round: u64,
    pub rounds_remaining: u64,
    pub status: EscrowStatus,
    pub claimable: bool,
    pub sweepable: bool,
}

fn add(total: &mut u64, amount: u64) -> Result<()> {
    *total = total
        .checked_add(amount)
        .ok_or(BurnLotteryError::MathOverflow)?;
    Ok(())
}

fn sub(total: &mut u64, amount: u64) -> Result<()> {
    *total = total
        .checked_sub(amount)
        .ok_or(BurnLotteryError::MathOverflow)?;
    Ok(())
}

impl Lottery {
    pub fn initialize(
        &mut self,
        owner: Pubkey,
        operator: Pubkey,
        config: LotteryConfig,
        bump: u8,
        vault_bump: u8,
    ) -> Result<()> {
        config.validate()?;
        require_keys_neq!(owner, Pubkey::default(), BurnLotteryError::InvalidAddress);
        require_keys_neq!(operator, Pubkey::default(), BurnLotteryError::InvalidAddress);

        *self = Self {
            bump,
            vault_bump,
            owner,
            operator,
            config,
            round_number: FIRST_ROUND,
            ..Self::default()
        };
        Ok(())
    }

    /// Runs `f` with the reentrancy flag held. A call arriving while the
    /// flag is set fails with `ReentrantCall`.
    pub fn guarded<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        require!(!self.locked, BurnLotteryError::ReentrantCall);
        self.locked = true;
        let result = f(self);
        self.locked = false;
        result
    }

    // ==================== Owner levers ====================

    pub fn require_owner(&self, caller: &Pubkey) -> Result<()> {
        require!(
            self.owner != Pubkey::default() && self.owner == *caller,
            BurnLotteryError::NotOwner
        );
        Ok(())
    }

    pub fn set_paused(&mut self, caller: &Pubkey, paused: bool) -> Result<()> {
        self.require_owner(caller)?;
        self.paused = paused;
        Ok(())
    }

    pub fn set_entry_bounds(&mut self, caller: &Pubkey, min_entry: u64, max_entry: u64) -> Result<()> {
        self.require_owner(caller)?;
        require!(
            min_entry > 0 && max_entry > 0,
            BurnLotteryError::InvalidAmount
        );
        require!(max_entry >= min_entry, BurnLotteryError::InvalidConfig);
        self.config.min_entry = min_entry;
        self.config.max_entry = max_entry;
        Ok(())
    }

    pub fn set_operator(&mut self, caller: &Pubkey, operator: Pubkey) -> Result<()> {
        self.require_owner(caller)?;
        require_keys_neq!(operator, Pubkey::default(), BurnLotteryError::InvalidAddress);
        self.operator = operator;
        Ok(())
    }

    /// Returns the previous owner.
    pub fn transfer_ownership(&mut self, caller: &Pubkey, new_owner: Pubkey) -> Result<Pubkey> {
        self.require_owner(caller)?;
        require_keys_neq!(new_owner, Pubkey::default(), BurnLotteryError::InvalidAddress);
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }

    /// Drops the owner for good; every lever above is unreachable afterwards.
    pub fn renounce_ownership(&mut self, caller: &Pubkey) -> Result<Pubkey> {
        self.require_owner(caller)?;
        Ok(std::mem::take(&mut self.owner))
    }

    // ==================== Round lifecycle ====================

    fn check_round(&self, round: &Round) -> Result<()> {
        require!(
            round.number >= FIRST_ROUND && round.number <= self.round_number,
            BurnLotteryError::WrongRound
        );
        Ok(())
    }

    fn advance(&mut self, next_round: &mut Round, next_bump: u8, now: i64) -> Result<u64> {
        let number = self
            .round_number
            .checked_add(1)
            .ok_or(BurnLotteryError::MathOverflow)?;
        next_round.open(next_bump, number, now, &self.config);
        self.round_number = number;
        Ok(number)
    }

    pub fn record_entry(
        &mut self,
        round: &mut Round,
        participant: Pubkey,
        amount: u64,
        now: i64,
    ) -> Result<EntryReceipt> {
        self.guarded(|lottery| {
            require!(!lottery.paused, BurnLotteryError::ContractPaused);
            lottery.config.check_entry_amount(amount)?;
            require!(
                round.number == lottery.round_number,
                BurnLotteryError::WrongRound
            );

            let config = lottery.config;
            let split = config.split(amount)?;
            let tally = round.record_entry(participant, amount, split.prize, &config, now)?;
            add(&mut lottery.total_burned, split.burned)?;
            add(&mut lottery.total_operator_paid, split.operator)?;

            Ok(EntryReceipt {
                round_number: round.number,
                split,
                cumulative_amount: tally.cumulative_amount,
                ticket_weight: tally.ticket_weight,
                first_in_round: tally.first_in_round,
            })
        })
    }

    /// Commits randomness for a due round. An empty round resolves on the
    /// spot and its prize pool, if any, carries over into `next_round`.
    pub fn close_round_if_due(
        &mut self,
        round: &mut Round,
        next_round: &mut Round,
        next_bump: u8,
        now: i64,
        slot: u64,
    ) -> Result<CloseOutcome> {
        self.guarded(|lottery| {
            lottery.check_round(round)?;
            let outcome = round.close_if_due(now, slot, lottery.config.maturation_delay)?;
            if outcome == CloseOutcome::ResolvedEmpty {
                lottery.advance(next_round, next_bump, now)?;
                next_round.add_to_prize_pool(std::mem::take(&mut round.prize_pool))?;
            }
            Ok(outcome)
        })
    }

    pub fn resolve_round<L: LedgerClock>(
        &mut self,
        round: &mut Round,
        next_round: &mut Round,
        next_bump: u8,
        ledger: &L,
        now: i64,
    ) -> Result<Resolution> {
        self.guarded(|lottery| {
            lottery.check_round(round)?;
            let (index, seed) = match round.draw(ledger)? {
                Draw::Winner { index, seed } => (index, seed),
                Draw::Recommitted {
                    stale_commit_slot,
                    commit_slot,
                } => {
                    return Ok(Resolution::Recommitted {
                        stale_commit_slot,
                        commit_slot,
                    })
                }
            };

            let winner = round
                .entries
                .get(index)
                .map(|entry| entry.participant)
                .ok_or(BurnLotteryError::InvalidIndex)?;
            let prize = round.prize_pool;
            let escrow = Escrow::open(winner, prize, round.number, lottery.config.grace_rounds)?;
            round.finish(seed, escrow, now);

            let record = WinnerRecord {
                bump: 0,
                index: lottery.winners_count,
                round_number: round.number,
                winner,
                prize_amount: prize,
                timestamp: now,
            };
            add(&mut lottery.winners_count, 1)?;
            add(&mut lottery.total_escrowed, prize)?;
            add(&mut lottery.escrow_outstanding, prize)?;
            add(&mut lottery.pending_escrows, 1)?;
            let next_round_number = lottery.advance(next_round, next_bump, now)?;

            Ok(Resolution::Resolved {
                record,
                escrow,
                participants: round.participant_count(),
                next_round: next_round_number,
            })
        })
    }

    // ==================== Escrow settlement ====================

    /// Settles a pending escrow. The caller moves `amount` to `winner`.
    pub fn claim_prize(&mut self, round: &mut Round) -> Result<Payout> {
        self.guarded(|lottery| {
            let escrow = round
                .escrow
                .as_mut()
                .ok_or(BurnLotteryError::NothingToClaim)?;
            let amount = escrow.claim(lottery.round_number)?;
            let winner = escrow.winner;

            sub(&mut lottery.escrow_outstanding, amount)?;
            sub(&mut lottery.pending_escrows, 1)?;
            add(&mut lottery.total_claimed, amount)?;

            Ok(Payout {
                round_number: round.number,
                winner,
                amount,
            })
        })
    }

    /// Forfeits an expired escrow and re-splits it: the prize share joins
    /// `current_round`, the caller moves the burn and operator shares.
    pub fn sweep_expired(&mut self, round: &mut Round, current_round: &mut Round) -> Result<SweepReceipt> {
        self.guarded(|lottery| {
            require!(
                current_round.number == lottery.round_number,
                BurnLotteryError::WrongRound
            );
            let escrow = round
                .escrow
                .as_mut()
                .ok_or(BurnLotteryError::NothingToClaim)?;
            let amount = escrow.sweep(lottery.round_number)?;
            let split = lottery.config.split(amount)?;

            sub(&mut lottery.escrow_outstanding, amount)?;
            sub(&mut lottery.pending_escrows, 1)?;
            add(&mut lottery.total_swept, amount)?;
            add(&mut lottery.total_burned, split.burned)?;
            add(&mut lottery.total_operator_paid, split.operator)?;
            current_round.add_to_prize_pool(split.prize)?;

            Ok(SweepReceipt {
                round_number: round.number,
                amount,
                split,
            })
        })
    }

    // ==================== Queries ====================

    pub fn status(&self, current_round: &Round, now: i64) -> LotteryStatus {
        LotteryStatus {
            round_number: self.round_number,
            round_state: current_round.state,
            time_remaining: current_round.time_remaining(now),
            paused: self.paused,
            owner: self.owner,
            operator: self.operator,
            min_entry: self.config.min_entry,
            max_entry: self.config.max_entry,
            current_prize_pool: current_round.prize_pool,
            current_participants: current_round.participant_count(),
            total_participants: self.total_participants,
            winners_count: self.winners_count,
            total_burned: self.total_burned,
            total_operator_paid: self.total_operator_paid,
            escrow_outstanding: self.escrow_outstanding,
            pending_escrows: self.pending_escrows,
        }
    }

    pub fn escrow_view(&self, round: &Round) -> Option<EscrowView> {
        round.escrow.map(|escrow| {
            let pending = escrow.is_pending();
            let expired = escrow.is_expired(self.round_number);
            EscrowView {
                round_number: round.number,
                winner: escrow.winner,
                amount: escrow.amount,
                claimable_until_round: escrow.claimable_until_round,
                rounds_remaining: escrow.rounds_remaining(self.round_number),
                status: escrow.status,
                claimable: pending && !expired,
                sweepable: pending && expired,
            }
        })
    }

    pub fn check_winner_index(&self, index: u64) -> Result<()> {
        require!(index < self.winners_count, BurnLotteryError::InvalidIndex);
        Ok(())
    }

    pub fn note_new_participant(&mut self) -> Result<()> {
        add(&mut self.total_participants, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::UNIT;
    use crate::error::{assert_error, ErrorKind};
    use crate::state::MockLedger;

    struct Harness {
        lottery: Lottery,
        rounds: Vec<Round>,
        ledger: MockLedger,
        now: i64,
        owner: Pubkey,
    }

    impl Harness {
        fn new(config: LotteryConfig) -> Self {
            let owner = Pubkey::new_unique();
            let mut lottery = Lottery::default();
            lottery
                .initialize(owner, Pubkey::new_unique(), config, 0, 0)
                .unwrap();
            let now = 1_700_000_000;
            let mut first = Round::default();
            first.open(0, FIRST_ROUND, now, &config);
            Self {
                lottery,
                rounds: vec![Round::default(), first],
                ledger: MockLedger::at(1_000),
                now,
                owner,
            }
        }

        fn current(&self) -> usize {
            self.lottery.round_number as usize
        }

        fn grow(&mut self, len: usize) {
            while self.rounds.len() < len {
                self.rounds.push(Round::default());
            }
        }

        /// Mutable access to round `a` and a later round `b`.
        fn two(&mut self, a: usize, b: usize) -> (&mut Round, &mut Round) {
            self.grow(b + 1);
            let (left, right) = self.rounds.split_at_mut(b);
            (&mut left[a], &mut right[0])
        }

        fn elapse(&mut self) {
            self.now += self.lottery.config.round_duration;
            self.ledger.advance(50);
        }

        fn enter(&mut self, who: Pubkey, amount: u64) -> Result<EntryReceipt> {
            let n = self.current();
            let (lottery, now) = (&mut self.lottery, self.now);
            lottery.record_entry(&mut self.rounds[n], who, amount, now)
        }

        fn close(&mut self, n: usize) -> Result<CloseOutcome> {
            let (now, slot) = (self.now, self.ledger.slot);
            self.grow(n + 2);
            let (left, right) = self.rounds.split_at_mut(n + 1);
            self.lottery
                .close_round_if_due(&mut left[n], &mut right[0], 0, now, slot)
        }

        fn resolve(&mut self, n: usize) -> Result<Resolution> {
            let now = self.now;
            self.grow(n + 2);
            let (left, right) = self.rounds.split_at_mut(n + 1);
            self.lottery
                .resolve_round(&mut left[n], &mut right[0], 0, &self.ledger, now)
        }

        fn claim(&mut self, n: usize) -> Result<Payout> {
            self.lottery.claim_prize(&mut self.rounds[n])
        }

        fn sweep(&mut self, n: usize) -> Result<SweepReceipt> {
            let current = self.current();
            let mut lottery = std::mem::take(&mut self.lottery);
            let (expired, live) = self.two(n, current);
            let result = lottery.sweep_expired(expired, live);
            self.lottery = lottery;
            result
        }

        /// Enters `who`, closes the round and resolves it after maturation.
        fn play_single(&mut self, who: Pubkey, amount: u64) -> Resolution {
            let n = self.current();
            self.enter(who, amount).unwrap();
            self.elapse();
            self.close(n).unwrap();
            self.ledger.advance(10);
            self.resolve(n).unwrap()
        }
    }

    fn wide_bounds() -> LotteryConfig {
        LotteryConfig {
            min_entry: UNIT,
            max_entry: 100 * UNIT,
            ..LotteryConfig::default()
        }
    }

    #[test]
    fn three_equal_entries_split_by_fixed_percentages() {
        let mut h = Harness::new(wide_bounds());
        for _ in 0..3 {
            let receipt = h.enter(Pubkey::new_unique(), 10 * UNIT).unwrap();
            assert_eq!(receipt.split.total(), Some(10 * UNIT));
        }
        assert_eq!(h.rounds[1].prize_pool, 8_100_000_000);
        assert_eq!(h.lottery.total_operator_paid, 2_400_000_000);
        assert_eq!(h.lottery.total_burned, 19_500_000_000);
        assert_eq!(
            h.rounds[1].prize_pool + h.lottery.total_operator_paid + h.lottery.total_burned,
            30 * UNIT
        );
    }

    #[test]
    fn single_participant_wins_whole_pool() {
        let mut h = Harness::new(LotteryConfig::default());
        let alice = Pubkey::new_unique();
        h.enter(alice, h.lottery.config.min_entry).unwrap();
        h.elapse();

        let slot = h.ledger.slot;
        assert_eq!(
            h.close(1).unwrap(),
            CloseOutcome::Committed {
                commit_slot: slot,
                reveal_slot: slot + 3
            }
        );
        assert_error(h.resolve(1), BurnLotteryError::NotMatured);

        h.ledger.advance(10);
        let Resolution::Resolved {
            record,
            escrow,
            participants,
            next_round,
        } = h.resolve(1).unwrap()
        else {
            panic!("expected a winner");
        };
        assert_eq!(record.winner, alice);
        assert_eq!(record.round_number, 1);
        assert_eq!(record.index, 0);
        assert_eq!(record.prize_amount, h.rounds[1].prize_pool);
        assert_eq!(record.prize_amount, 1_350_000_000);
        assert_eq!(escrow.claimable_until_round, 1 + h.lottery.config.grace_rounds);
        assert_eq!((participants, next_round), (1, 2));

        assert_eq!(h.lottery.winners_count, 1);
        assert_eq!(h.lottery.round_number, 2);
        assert_eq!(h.lottery.escrow_outstanding, record.prize_amount);
        assert_eq!(h.rounds[2].state, RoundState::Open);
        assert_eq!(h.rounds[2].opened_at, h.now);
        assert!(!h.rounds[1].commitment.committed);

        // racers arriving late observe the advanced state
        assert_error(h.resolve(1), BurnLotteryError::RoundAlreadyResolved);
        assert_eq!(h.close(1).unwrap(), CloseOutcome::AlreadyResolved);
        assert_eq!(h.lottery.winners_count, 1);
        assert_eq!(h.lottery.round_number, 2);
    }

    #[test]
    fn empty_round_advances_without_randomness() {
        let mut h = Harness::new(LotteryConfig::default());
        assert_error(h.close(1), BurnLotteryError::RoundNotDue);
        h.elapse();

        assert_eq!(h.close(1).unwrap(), CloseOutcome::ResolvedEmpty);
        assert_eq!(h.lottery.round_number, 2);
        assert_eq!(h.lottery.winners_count, 0);
        assert_eq!(h.lottery.escrow_outstanding, 0);
        assert_eq!(h.rounds[2].prize_pool, 0);
        assert!(h.rounds[1].escrow.is_none());
        assert!(!h.rounds[1].commitment.committed);

        assert_eq!(h.close(1).unwrap(), CloseOutcome::AlreadyResolved);
        assert_eq!(h.lottery.round_number, 2);
    }

    #[test]
    fn unclaimed_prize_expires_and_is_swept_once() {
        let mut h = Harness::new(LotteryConfig {
            grace_rounds: 2,
            ..LotteryConfig::default()
        });
        let resolution = h.play_single(Pubkey::new_unique(), 6 * UNIT);
        let Resolution::Resolved { escrow, .. } = resolution else {
            panic!("expected a winner");
        };
        assert_eq!(escrow.claimable_until_round, 3);

        for n in [2, 3] {
            h.elapse();
            assert_eq!(h.close(n).unwrap(), CloseOutcome::ResolvedEmpty);
        }
        assert_eq!(h.lottery.round_number, 4);
        assert!(h.lottery.escrow_view(&h.rounds[1]).unwrap().sweepable);

        assert_error(h.claim(1), BurnLotteryError::ClaimExpired);
        let receipt = h.sweep(1).unwrap();
        assert_eq!(receipt.amount, escrow.amount);
        assert_eq!(receipt.split.total(), Some(escrow.amount));
        assert_eq!(h.rounds[4].prize_pool, receipt.split.prize);
        assert_eq!(h.rounds[1].escrow.unwrap().status, EscrowStatus::Swept);
        assert_eq!(h.lottery.escrow_outstanding, 0);
        assert_eq!(h.lottery.pending_escrows, 0);

        assert_error(h.claim(1), BurnLotteryError::NothingToClaim);
        assert_error(h.sweep(1), BurnLotteryError::NothingToClaim);

        // recycled prize follows the pool through an empty round
        h.elapse();
        assert_eq!(h.close(4).unwrap(), CloseOutcome::ResolvedEmpty);
        assert_eq!(h.rounds[5].prize_pool, receipt.split.prize);
        assert_eq!(h.rounds[4].prize_pool, 0);
    }

    #[test]
    fn minimum_entry_is_inclusive() {
        let mut h = Harness::new(LotteryConfig::default());
        let min = h.lottery.config.min_entry;
        assert_error(
            h.enter(Pubkey::new_unique(), min - UNIT),
            BurnLotteryError::BelowMinimum,
        );
        assert_eq!(BurnLotteryError::BelowMinimum.kind(), ErrorKind::Validation);
        h.enter(Pubkey::new_unique(), min).unwrap();
    }

    #[test]
    fn claim_within_grace_pays_recorded_winner() {
        let mut h = Harness::new(LotteryConfig {
            grace_rounds: 2,
            ..LotteryConfig::default()
        });
        let alice = Pubkey::new_unique();
        h.play_single(alice, 8 * UNIT);
        assert_error(h.sweep(1), BurnLotteryError::NotExpired);

        h.elapse();
        h.close(2).unwrap();
        assert_eq!(h.lottery.round_number, 3);
        let view = h.lottery.escrow_view(&h.rounds[1]).unwrap();
        assert_eq!(view.rounds_remaining, 0);
        assert!(view.claimable);

        let payout = h.claim(1).unwrap();
        assert_eq!(payout.winner, alice);
        assert_eq!(payout.amount, 2_160_000_000);
        assert_eq!(h.lottery.total_claimed, payout.amount);
        assert_eq!(h.lottery.escrow_outstanding, 0);
        assert_eq!(h.rounds[1].escrow.unwrap().status, EscrowStatus::Claimed);
        assert_error(h.claim(1), BurnLotteryError::NothingToClaim);
        assert_error(h.sweep(1), BurnLotteryError::NothingToClaim);
    }

    #[test]
    fn escrows_of_several_rounds_stay_independent() {
        let mut h = Harness::new(LotteryConfig::default());
        let (alice, bob) = (Pubkey::new_unique(), Pubkey::new_unique());
        h.play_single(alice, 5 * UNIT);
        h.play_single(bob, 7 * UNIT);
        assert_eq!(h.lottery.pending_escrows, 2);
        assert_eq!(h.lottery.winners_count, 2);

        assert_eq!(h.claim(2).unwrap().winner, bob);
        assert_eq!(h.claim(1).unwrap().winner, alice);
        assert_eq!(h.lottery.pending_escrows, 0);
        assert_eq!(h.lottery.escrow_outstanding, 0);
        h.lottery.check_winner_index(1).unwrap();
        assert_error(h.lottery.check_winner_index(2), BurnLotteryError::InvalidIndex);
    }

    #[test]
    fn pause_only_blocks_entries() {
        let mut h = Harness::new(LotteryConfig::default());
        let owner = h.owner;
        h.enter(Pubkey::new_unique(), 5 * UNIT).unwrap();
        h.lottery.set_paused(&owner, true).unwrap();
        assert_error(
            h.enter(Pubkey::new_unique(), 5 * UNIT),
            BurnLotteryError::ContractPaused,
        );

        h.elapse();
        h.close(1).unwrap();
        h.ledger.advance(10);
        assert!(matches!(h.resolve(1).unwrap(), Resolution::Resolved { .. }));
        h.claim(1).unwrap();

        h.lottery.set_paused(&owner, false).unwrap();
        h.enter(Pubkey::new_unique(), 5 * UNIT).unwrap();
    }

    #[test]
    fn bounds_change_keeps_weights_of_the_open_round() {
        let mut h = Harness::new(wide_bounds());
        let owner = h.owner;
        let alice = h.enter(Pubkey::new_unique(), 4 * UNIT).unwrap();
        assert_eq!(alice.ticket_weight, 103);

        h.lottery.set_entry_bounds(&owner, 4 * UNIT, 100 * UNIT).unwrap();
        let bob = h.enter(Pubkey::new_unique(), 4 * UNIT).unwrap();
        assert_eq!(bob.ticket_weight, alice.ticket_weight);
        assert_eq!(h.rounds[1].total_weight, 206);

        // The next round counts tiers from the new minimum.
        h.play_single(Pubkey::new_unique(), 4 * UNIT);
        assert_eq!(h.rounds[2].tier_base, 4 * UNIT);
        let carol = h.enter(Pubkey::new_unique(), 4 * UNIT).unwrap();
        assert_eq!(carol.ticket_weight, 100);
    }

    #[test]
    fn held_lock_rejects_every_guarded_operation() {
        let mut h = Harness::new(LotteryConfig::default());
        h.lottery.locked = true;
        assert_error(h.enter(Pubkey::new_unique(), 5 * UNIT), BurnLotteryError::ReentrantCall);
        h.elapse();
        assert_error(h.close(1), BurnLotteryError::ReentrantCall);
        assert_error(h.resolve(1), BurnLotteryError::ReentrantCall);
        assert_error(h.claim(1), BurnLotteryError::ReentrantCall);

        h.lottery.locked = false;
        assert_eq!(h.close(1).unwrap(), CloseOutcome::ResolvedEmpty);
        assert!(!h.lottery.locked);
        // a failing operation releases the lock too
        assert_error(h.claim(1), BurnLotteryError::NothingToClaim);
        assert!(!h.lottery.locked);
    }

    #[test]
    fn unopened_round_accounts_are_rejected() {
        let mut h = Harness::new(LotteryConfig::default());
        h.elapse();
        // round 2 was allocated ahead of time but never opened
        assert_error(h.close(2), BurnLotteryError::WrongRound);
        assert_error(h.resolve(2), BurnLotteryError::WrongRound);
        assert_eq!(h.lottery.round_number, 1);
    }

    #[test]
    fn owner_levers_validate_caller_and_input() {
        let mut h = Harness::new(LotteryConfig::default());
        let owner = h.owner;
        let stranger = Pubkey::new_unique();

        assert_error(h.lottery.set_paused(&stranger, true), BurnLotteryError::NotOwner);
        assert_error(
            h.lottery.set_entry_bounds(&owner, 0, UNIT),
            BurnLotteryError::InvalidAmount,
        );
        assert_error(
            h.lottery.set_entry_bounds(&owner, 2 * UNIT, UNIT),
            BurnLotteryError::InvalidConfig,
        );
        h.lottery.set_entry_bounds(&owner, UNIT, 2 * UNIT).unwrap();
        assert_error(h.enter(stranger, 3 * UNIT), BurnLotteryError::AboveMaximum);

        assert_error(
            h.lottery.set_operator(&owner, Pubkey::default()),
            BurnLotteryError::InvalidAddress,
        );
        assert_error(
            h.lottery.transfer_ownership(&owner, Pubkey::default()),
            BurnLotteryError::InvalidAddress,
        );

        let next = Pubkey::new_unique();
        assert_eq!(h.lottery.transfer_ownership(&owner, next).unwrap(), owner);
        assert_error(h.lottery.set_paused(&owner, true), BurnLotteryError::NotOwner);

        h.lottery.renounce_ownership(&next).unwrap();
        assert_eq!(h.lottery.owner, Pubkey::default());
        assert_error(h.lottery.set_paused(&next, true), BurnLotteryError::NotOwner);
        assert_error(
            h.lottery.set_paused(&Pubkey::default(), true),
            BurnLotteryError::NotOwner,
        );
    }

    #[test]
    fn initialize_rejects_bad_input() {
        let mut lottery = Lottery::default();
        let config = LotteryConfig {
            prize_pct: 30,
            ..LotteryConfig::default()
        };
        assert_error(
            lottery.initialize(Pubkey::new_unique(), Pubkey::new_unique(), config, 0, 0),
            BurnLotteryError::InvalidConfig,
        );
        assert_error(
            lottery.initialize(
                Pubkey::new_unique(),
                Pubkey::default(),
                LotteryConfig::default(),
                0,
                0,
            ),
            BurnLotteryError::InvalidAddress,
        );
    }

    #[test]
    fn status_reports_current_round() {
        let mut h = Harness::new(LotteryConfig::default());
        let who = Pubkey::new_unique();
        h.enter(who, 5 * UNIT).unwrap();
        h.enter(who, 5 * UNIT).unwrap();
        let status = h.lottery.status(&h.rounds[1], h.now + 60);
        assert_eq!(status.round_number, 1);
        assert_eq!(status.current_participants, 1);
        assert_eq!(status.current_prize_pool, 2_700_000_000);
        assert_eq!(status.time_remaining, 240);
        assert_eq!(status.total_burned, 6_500_000_000);
    }
}
