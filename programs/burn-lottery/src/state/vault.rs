use anchor_lang::prelude::*;

/// Program-owned lamport holder for every round's prize pool and all
/// outstanding escrows. Only its rent-exempt reserve is never paid out.
#[account]
#[derive(InitSpace)]
pub struct Vault {
    pub bump: u8,
}
