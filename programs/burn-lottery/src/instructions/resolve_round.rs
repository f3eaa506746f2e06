use anchor_lang::prelude::*;
use solana_program::sysvar::slot_hashes;

use crate::constants::*;
use crate::error::BurnLotteryError;
use crate::events::{PrizeEscrowed, RandomnessRecommitted, RoundResolved};
use crate::state::*;

/// Accounts required to reveal a committed round and draw its winner.
/// Callable by anyone.
#[derive(Accounts)]
#[instruction(round_number: u64)]
pub struct ResolveRound<'info> {
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

    #[account(
        init_if_needed,
        payer = caller,
        space = Round::space(lottery.config.max_participants),
        seeds = [SEED_ROUND, round_number.wrapping_add(1).to_le_bytes().as_ref()],
        bump
    )]
    pub next_round: Box<Account<'info, Round>>,

    /// Next slot in the append-only winners list.
    #[account(
        init_if_needed,
        payer = caller,
        space = 8 + WinnerRecord::INIT_SPACE,
        seeds = [SEED_WINNER, lottery.winners_count.to_le_bytes().as_ref()],
        bump
    )]
    pub winner_record: Account<'info, WinnerRecord>,

    /// CHECK: the SlotHashes sysvar, parsed by `SlotHashesLedger`.
    #[account(address = slot_hashes::ID @ BurnLotteryError::InvalidAddress)]
    pub slot_hashes: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Reveals the round's seed from the slot hashes fixed at commit time and
/// escrows the prize pool for the drawn winner. When those slots have aged
/// out, a fresh commitment is recorded instead and the call still succeeds.
pub fn process_resolve_round(ctx: Context<ResolveRound>, round_number: u64) -> Result<()> {
    let clock = Clock::get()?;
    let data = ctx.accounts.slot_hashes.try_borrow_data()?;
    let ledger = SlotHashesLedger::new(clock.slot, &data[..]);

    let resolution = ctx.accounts.lottery.resolve_round(
        &mut ctx.accounts.round,
        &mut ctx.accounts.next_round,
        ctx.bumps.next_round,
        &ledger,
        clock.unix_timestamp,
    )?;

    match resolution {
        Resolution::Recommitted {
            stale_commit_slot,
            commit_slot,
        } => {
            msg!(
                "Round {}: commitment at slot {} aged out, recommitted at slot {}",
                round_number,
                stale_commit_slot,
                commit_slot
            );
            emit!(RandomnessRecommitted {
                round_number,
                stale_commit_slot,
                commit_slot,
            });
        }
        Resolution::Resolved {
            mut record,
            escrow,
            participants,
            next_round,
        } => {
            record.bump = ctx.bumps.winner_record;
            msg!(
                "Round {} resolved: winner {} of {} participants, prize {} lamports",
                round_number,
                record.winner,
                participants,
                record.prize_amount
            );
            emit!(RoundResolved {
                round_number,
                winner: Some(record.winner),
                prize_amount: record.prize_amount,
                participants,
                next_round,
                timestamp: record.timestamp,
            });
            emit!(PrizeEscrowed {
                round_number,
                winner: escrow.winner,
                amount: escrow.amount,
                claimable_until_round: escrow.claimable_until_round,
            });
            ctx.accounts.winner_record.set_inner(record);
        }
    }

    Ok(())
}
