use anchor_lang::prelude::*;

use crate::error::BurnLotteryError;

#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace,
)]
pub enum EscrowStatus {
    #[default]
    Pending,
    Claimed,
    Swept,
}

/// A resolved round's prize held in the vault until its winner claims it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct Escrow {
    pub winner: Pubkey,
    pub amount: u64,
    pub created_at_round: u64,
    /// Last round number during which the claim is accepted.
    pub claimable_until_round: u64,
    pub status: EscrowStatus,
}

impl Escrow {
    pub fn open(winner: Pubkey, amount: u64, created_at_round: u64, grace_rounds: u64) -> Result<Self> {
        let claimable_until_round = created_at_round
            .checked_add(grace_rounds)
            .ok_or(BurnLotteryError::MathOverflow)?;
        Ok(Self {
            winner,
            amount,
            created_at_round,
            claimable_until_round,
            status: EscrowStatus::Pending,
        })
    }

    pub fn is_pending(&self) -> bool {
        self.status == EscrowStatus::Pending
    }

    pub fn is_expired(&self, current_round: u64) -> bool {
        current_round > self.claimable_until_round
    }

    pub fn rounds_remaining(&self, current_round: u64) -> u64 {
        self.claimable_until_round.saturating_sub(current_round)
    }

    /// Marks the escrow claimed and returns the amount owed to the winner.
    pub fn claim(&mut self, current_round: u64) -> Result<u64> {
        require!(self.is_pending(), BurnLotteryError::NothingToClaim);
        require!(
            !self.is_expired(current_round),
            BurnLotteryError::ClaimExpired
        );
        self.status = EscrowStatus::Claimed;
        Ok(self.amount)
    }

    /// Marks an expired escrow swept and returns the forfeited amount.
    pub fn sweep(&mut self, current_round: u64) -> Result<u64> {
        require!(self.is_pending(), BurnLotteryError::NothingToClaim);
        require!(self.is_expired(current_round), BurnLotteryError::NotExpired);
        self.status = EscrowStatus::Swept;
        Ok(self.amount)
    }
}
