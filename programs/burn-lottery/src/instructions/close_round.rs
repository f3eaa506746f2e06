use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::{RandomnessCommitted, RoundResolved};
use crate::state::*;

/// Accounts required to close a due round. Callable by anyone.
#[derive(Accounts)]
#[instruction(round_number: u64)]
pub struct CloseRound<'info> {
    /// Pays for the next round's account when it does not exist yet.
    #[account(mut)]
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_LOTTERY],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    #[account(
        mut,
        seeds = [SEED_ROUND, round_number.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Box<Account<'info, Round>>,

    /// Opened only when `round` had no participants.
    #[account(
        init_if_needed,
        payer = caller,
        space = Round::space(lottery.config.max_participants),
        seeds = [SEED_ROUND, round_number.wrapping_add(1).to_le_bytes().as_ref()],
        bump
    )]
    pub next_round: Box<Account<'info, Round>>,

    pub system_program: Program<'info, System>,
}

/// Commits randomness for a due round. An empty round resolves without a
/// draw and the next round opens immediately. Calls after the first are
/// successful no-ops.
pub fn process_close_round(ctx: Context<CloseRound>, round_number: u64) -> Result<()> {
    let clock = Clock::get()?;

    let outcome = ctx.accounts.lottery.close_round_if_due(
        &mut ctx.accounts.round,
        &mut ctx.accounts.next_round,
        ctx.bumps.next_round,
        clock.unix_timestamp,
        clock.slot,
    )?;

    match outcome {
        CloseOutcome::Committed {
            commit_slot,
            reveal_slot,
        } => {
            msg!(
                "Round {} closed: committed at slot {}, reveal from slot {}",
                round_number,
                commit_slot,
                reveal_slot
            );
            emit!(RandomnessCommitted {
                round_number,
                commit_slot,
                reveal_slot,
                caller: ctx.accounts.caller.key(),
            });
        }
        CloseOutcome::ResolvedEmpty => {
            let next_round = ctx.accounts.lottery.round_number;
            msg!(
                "Round {} had no participants, round {} opened",
                round_number,
                next_round
            );
            emit!(RoundResolved {
                round_number,
                winner: None,
                prize_amount: 0,
                participants: 0,
                next_round,
                timestamp: clock.unix_timestamp,
            });
        }
        CloseOutcome::AlreadyCommitted => {
            msg!("Round {} already committed", round_number);
        }
        CloseOutcome::AlreadyResolved => {
            msg!("Round {} already resolved", round_number);
        }
    }

    Ok(())
}
