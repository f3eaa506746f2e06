use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::BurnLotteryError;
use crate::events::PrizeClaimed;
use crate::state::*;
use crate::utils::transfer_from_vault;

/// Accounts required for settling a round's escrowed prize.
///
/// Anyone can pay for the claim; the lamports always go to the winner
/// recorded in the round's escrow.
#[derive(Accounts)]
#[instruction(round_number: u64)]
pub struct ClaimPrize<'info> {
    /// The account paying transaction fees.
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_LOTTERY],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// The resolved round holding the escrow.
    #[account(
        mut,
        seeds = [SEED_ROUND, round_number.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Box<Account<'info, Round>>,

    #[account(
        mut,
        seeds = [SEED_VAULT],
        bump = lottery.vault_bump,
    )]
    pub vault: Account<'info, Vault>,

    /// CHECK: compared against the escrow's winner before any lamports move.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,

    /// Lifetime statistics of the winner.
    #[account(
        mut,
        seeds = [SEED_PLAYER, winner.key().as_ref()],
        bump = winner_player.bump,
    )]
    pub winner_player: Account<'info, Player>,
}

/// Marks the escrow claimed, then pays it out of the vault.
///
/// Steps:
/// 1. Settle the escrow (fails once expired, claimed or swept).
/// 2. Check the winner account against the escrow.
/// 3. Transfer the prize from the vault to the winner.
pub fn process_claim_prize(ctx: Context<ClaimPrize>, round_number: u64) -> Result<()> {
    let payout = ctx.accounts.lottery.claim_prize(&mut ctx.accounts.round)?;
    require_keys_eq!(
        ctx.accounts.winner.key(),
        payout.winner,
        BurnLotteryError::WinnerMismatch
    );
    ctx.accounts.winner_player.record_prize(payout.amount)?;

    transfer_from_vault(
        &ctx.accounts.vault.to_account_info(),
        &ctx.accounts.winner.to_account_info(),
        payout.amount,
    )?;

    msg!(
        "Round {} prize of {} lamports paid to {}",
        round_number,
        payout.amount,
        payout.winner
    );
    emit!(PrizeClaimed {
        round_number,
        winner: payout.winner,
        amount: payout.amount,
        caller: ctx.accounts.caller.key(),
    });

    Ok(())
}
