use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::BurnLotteryError;

/// Deployment parameters of the lottery.
///
/// Split percentages, timing and capacity are fixed at initialization.
/// Only the entry bounds can be changed afterwards, by the owner.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct LotteryConfig {
    /// Smallest accepted amount per entry call, in lamports.
    pub min_entry: u64,
    /// Largest accepted amount per entry call, in lamports.
    pub max_entry: u64,
    /// Seconds a round accepts entries before it may be closed.
    pub round_duration: i64,
    /// Slots between commit and the earliest reveal.
    pub maturation_delay: u64,
    /// Rounds after resolution during which a prize can still be claimed.
    pub grace_rounds: u64,
    pub max_participants: u16,
    pub burn_pct: u8,
    pub prize_pct: u8,
    pub operator_pct: u8,
    /// Cumulative amount above the round's tier base that earns one bonus ticket.
    pub tier_step: u64,
    pub tier_bonus_cap: u64,
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            min_entry: DEFAULT_MIN_ENTRY,
            max_entry: DEFAULT_MAX_ENTRY,
            round_duration: DEFAULT_ROUND_DURATION,
            maturation_delay: DEFAULT_MATURATION_DELAY,
            grace_rounds: DEFAULT_GRACE_ROUNDS,
            max_participants: DEFAULT_MAX_PARTICIPANTS,
            burn_pct: DEFAULT_BURN_PCT,
            prize_pct: DEFAULT_PRIZE_PCT,
            operator_pct: DEFAULT_OPERATOR_PCT,
            tier_step: DEFAULT_TIER_STEP,
            tier_bonus_cap: DEFAULT_TIER_BONUS_CAP,
        }
    }
}

/// Realized distribution of one amount. Always sums to the input.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Split {
    pub burned: u64,
    pub prize: u64,
    pub operator: u64,
}

impl Split {
    pub fn total(&self) -> Option<u64> {
        self.burned
            .checked_add(self.prize)?
            .checked_add(self.operator)
    }
}

impl LotteryConfig {
    pub fn validate(&self) -> Result<()> {
        require!(self.min_entry > 0, BurnLotteryError::InvalidAmount);
        require!(
            self.max_entry >= self.min_entry,
            BurnLotteryError::InvalidConfig
        );
        require!(self.round_duration > 0, BurnLotteryError::InvalidConfig);
        require!(
            self.maturation_delay >= 1 && self.maturation_delay <= MAX_MATURATION_DELAY,
            BurnLotteryError::InvalidConfig
        );
        require!(self.grace_rounds >= 1, BurnLotteryError::InvalidConfig);
        require!(
            self.max_participants >= 1 && self.max_participants <= MAX_PARTICIPANTS,
            BurnLotteryError::InvalidConfig
        );
        let pct_sum = self.burn_pct as u64 + self.prize_pct as u64 + self.operator_pct as u64;
        require!(
            pct_sum == PERCENT_DENOMINATOR,
            BurnLotteryError::InvalidConfig
        );
        require!(self.tier_step > 0, BurnLotteryError::InvalidConfig);
        Ok(())
    }

    pub fn check_entry_amount(&self, amount: u64) -> Result<()> {
        require!(amount >= self.min_entry, BurnLotteryError::BelowMinimum);
        require!(amount <= self.max_entry, BurnLotteryError::AboveMaximum);
        Ok(())
    }

    /// Splits `amount` by the fixed percentages. Truncation dust goes to the burn share.
    pub fn split(&self, amount: u64) -> Result<Split> {
        let prize = percent_of(amount, self.prize_pct);
        let operator = percent_of(amount, self.operator_pct);
        let burned = amount
            .checked_sub(prize)
            .and_then(|rest| rest.checked_sub(operator))
            .ok_or(BurnLotteryError::MathOverflow)?;
        Ok(Split {
            burned,
            prize,
            operator,
        })
    }

    /// `BASE_TICKET_WEIGHT + min(tier_bonus_cap, (cumulative - tier_base) / tier_step)`.
    ///
    /// `tier_base` is the minimum entry in force when the round opened, so a
    /// later bounds change never reweighs a round already taking entries.
    pub fn ticket_weight(&self, tier_base: u64, cumulative_amount: u64) -> u64 {
        if self.tier_step == 0 {
            return BASE_TICKET_WEIGHT;
        }
        let tiers = cumulative_amount.saturating_sub(tier_base) / self.tier_step;
        BASE_TICKET_WEIGHT.saturating_add(tiers.min(self.tier_bonus_cap))
    }
}

fn percent_of(amount: u64, pct: u8) -> u64 {
    // pct <= 100, so the quotient never exceeds `amount`
    (amount as u128 * pct as u128 / PERCENT_DENOMINATOR as u128) as u64
}
