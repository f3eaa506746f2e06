use anchor_lang::prelude::*;
use instructions::*;
use state::{Entry, EscrowView, LotteryConfig, LotteryStatus, RandomnessStatus, WinnerRecord};

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

declare_id!("BuRNLoTs8ExjP9CVsQvhDsQc1XkGAKMHDFuWNEFYxmt4");

#[program]
pub mod burn_lottery {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        config: LotteryConfig,
        operator: Pubkey,
    ) -> Result<()> {
        process_initialize(ctx, config, operator)
    }

    pub fn enter(ctx: Context<Enter>, amount: u64) -> Result<()> {
        process_enter(ctx, amount)
    }

    pub fn close_round(ctx: Context<CloseRound>, round_number: u64) -> Result<()> {
        process_close_round(ctx, round_number)
    }

    pub fn reveal(ctx: Context<ResolveRound>, round_number: u64) -> Result<()> {
        process_resolve_round(ctx, round_number)
    }

    pub fn claim_prize(ctx: Context<ClaimPrize>, round_number: u64) -> Result<()> {
        process_claim_prize(ctx, round_number)
    }

    pub fn sweep_prize(ctx: Context<SweepPrize>, round_number: u64) -> Result<()> {
        process_sweep_prize(ctx, round_number)
    }

    pub fn pause(ctx: Context<AdminOnly>) -> Result<()> {
        process_pause(ctx)
    }

    pub fn unpause(ctx: Context<AdminOnly>) -> Result<()> {
        process_unpause(ctx)
    }

    pub fn set_entry_bounds(ctx: Context<AdminOnly>, min_entry: u64, max_entry: u64) -> Result<()> {
        process_set_entry_bounds(ctx, min_entry, max_entry)
    }

    pub fn set_operator(ctx: Context<AdminOnly>, operator: Pubkey) -> Result<()> {
        process_set_operator(ctx, operator)
    }

    pub fn transfer_ownership(ctx: Context<AdminOnly>, new_owner: Pubkey) -> Result<()> {
        process_transfer_ownership(ctx, new_owner)
    }

    pub fn renounce_ownership(ctx: Context<AdminOnly>) -> Result<()> {
        process_renounce_ownership(ctx)
    }

    pub fn lottery_status(ctx: Context<ViewLottery>) -> Result<LotteryStatus> {
        process_lottery_status(ctx)
    }

    pub fn randomness_status(
        ctx: Context<ViewRound>,
        round_number: u64,
    ) -> Result<RandomnessStatus> {
        process_randomness_status(ctx, round_number)
    }

    pub fn escrow_status(ctx: Context<ViewRound>, round_number: u64) -> Result<Option<EscrowView>> {
        process_escrow_status(ctx, round_number)
    }

    pub fn round_participants(
        ctx: Context<ViewRound>,
        round_number: u64,
        offset: u32,
    ) -> Result<Vec<Entry>> {
        process_round_participants(ctx, round_number, offset)
    }

    pub fn winner(ctx: Context<ViewWinner>, index: u64) -> Result<WinnerRecord> {
        process_winner(ctx, index)
    }
}
