use anchor_lang::prelude::*;

use crate::error::BurnLotteryError;

/// Lifetime statistics of one participant across all rounds.
#[account]
#[derive(InitSpace, Debug, Default)]
pub struct Player {
    pub bump: u8,
    pub participant: Pubkey,

    /// Lamports contributed over all entries.
    pub total_contributed: u64,

    /// Distinct rounds entered.
    pub rounds_entered: u64,

    /// Last round entered. Zero before the first entry.
    pub last_round: u64,

    pub prizes_claimed: u64,

    /// Lamports received from claimed prizes.
    pub total_won: u64,
}

impl Player {
    /// Returns true on the participant's first entry ever.
    pub fn record_entry(
        &mut self,
        participant: Pubkey,
        bump: u8,
        round_number: u64,
        amount: u64,
    ) -> Result<bool> {
        let first_ever = self.last_round == 0;
        if first_ever {
            self.bump = bump;
            self.participant = participant;
        }
        if self.last_round != round_number {
            self.rounds_entered = self
                .rounds_entered
                .checked_add(1)
                .ok_or(BurnLotteryError::MathOverflow)?;
            self.last_round = round_number;
        }
        self.total_contributed = self
            .total_contributed
            .checked_add(amount)
            .ok_or(BurnLotteryError::MathOverflow)?;
        Ok(first_ever)
    }

    pub fn record_prize(&mut self, amount: u64) -> Result<()> {
        self.prizes_claimed = self
            .prizes_claimed
            .checked_add(1)
            .ok_or(BurnLotteryError::MathOverflow)?;
        self.total_won = self
            .total_won
            .checked_add(amount)
            .ok_or(BurnLotteryError::MathOverflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_rounds_not_entries() {
        let key = Pubkey::new_unique();
        let mut player = Player::default();
        assert!(player.record_entry(key, 7, 1, 10).unwrap());
        assert!(!player.record_entry(key, 7, 1, 5).unwrap());
        assert!(!player.record_entry(key, 7, 3, 5).unwrap());

        assert_eq!(player.participant, key);
        assert_eq!(player.bump, 7);
        assert_eq!(player.rounds_entered, 2);
        assert_eq!(player.last_round, 3);
        assert_eq!(player.total_contributed, 20);

        player.record_prize(9).unwrap();
        assert_eq!((player.prizes_claimed, player.total_won), (1, 9));
    }
}
