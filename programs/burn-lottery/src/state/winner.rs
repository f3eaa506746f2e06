use anchor_lang::prelude::*;

/// Append-only record of one round's winner, indexed by resolution order.
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct WinnerRecord {
    pub bump: u8,

    /// Position in the winners list, starting at 0.
    pub index: u64,

    pub round_number: u64,
    pub winner: Pubkey,

    /// Prize escrowed for the winner at resolution.
    pub prize_amount: u64,

    pub timestamp: i64,
}
