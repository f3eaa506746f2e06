use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::*;

/// Read-only access to the lottery and its live round.
#[derive(Accounts)]
pub struct ViewLottery<'info> {
    #[account(seeds = [SEED_LOTTERY], bump = lottery.bump)]
    pub lottery: Box<Account<'info, Lottery>>,

    #[account(
        seeds = [SEED_ROUND, lottery.round_number.to_le_bytes().as_ref()],
        bump = current_round.bump,
    )]
    pub current_round: Box<Account<'info, Round>>,
}

/// Read-only access to any opened round.
#[derive(Accounts)]
#[instruction(round_number: u64)]
pub struct ViewRound<'info> {
    #[account(seeds = [SEED_LOTTERY], bump = lottery.bump)]
    pub lottery: Box<Account<'info, Lottery>>,

    #[account(
        seeds = [SEED_ROUND, round_number.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Box<Account<'info, Round>>,
}

#[derive(Accounts)]
#[instruction(index: u64)]
pub struct ViewWinner<'info> {
    #[account(seeds = [SEED_LOTTERY], bump = lottery.bump)]
    pub lottery: Box<Account<'info, Lottery>>,

    /// CHECK: deserialized in the handler once `index` is known to be valid.
    #[account(seeds = [SEED_WINNER, index.to_le_bytes().as_ref()], bump)]
    pub winner_record: UncheckedAccount<'info>,
}

pub fn process_lottery_status(ctx: Context<ViewLottery>) -> Result<LotteryStatus> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx.accounts.lottery.status(&ctx.accounts.current_round, now))
}

pub fn process_randomness_status(
    ctx: Context<ViewRound>,
    _round_number: u64,
) -> Result<RandomnessStatus> {
    let slot = Clock::get()?.slot;
    Ok(ctx.accounts.round.randomness_status(slot))
}

pub fn process_escrow_status(
    ctx: Context<ViewRound>,
    _round_number: u64,
) -> Result<Option<EscrowView>> {
    Ok(ctx.accounts.lottery.escrow_view(&ctx.accounts.round))
}

/// One page of the round's participants with their amount and weight.
pub fn process_round_participants(
    ctx: Context<ViewRound>,
    _round_number: u64,
    offset: u32,
) -> Result<Vec<Entry>> {
    Ok(ctx.accounts.round.participants_page(offset))
}

pub fn process_winner(ctx: Context<ViewWinner>, index: u64) -> Result<WinnerRecord> {
    ctx.accounts.lottery.check_winner_index(index)?;
    let data = ctx.accounts.winner_record.try_borrow_data()?;
    WinnerRecord::try_deserialize(&mut &data[..])
}
