use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::*;
use crate::state::*;

/// Accounts required to set up the lottery, its vault and the first round.
#[derive(Accounts)]
#[instruction(config: LotteryConfig)]
pub struct Initialize<'info> {
    /// Becomes the owner of the lottery and pays for account creation.
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = 8 + Lottery::INIT_SPACE,
        seeds = [SEED_LOTTERY],
        bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// Holds every prize pool and escrow in lamports.
    #[account(
        init,
        payer = owner,
        space = 8 + Vault::INIT_SPACE,
        seeds = [SEED_VAULT],
        bump
    )]
    pub vault: Account<'info, Vault>,

    #[account(
        init,
        payer = owner,
        space = Round::space(config.max_participants.min(MAX_PARTICIPANTS)),
        seeds = [SEED_ROUND, FIRST_ROUND.to_le_bytes().as_ref()],
        bump
    )]
    pub first_round: Box<Account<'info, Round>>,

    pub system_program: Program<'info, System>,
}

/// Validates the configuration, then opens round 1.
///
/// # Arguments
/// * `config` - Entry bounds, timing, capacity and split of the deployment
/// * `operator` - Recipient of the operator share
pub fn process_initialize(
    ctx: Context<Initialize>,
    config: LotteryConfig,
    operator: Pubkey,
) -> Result<()> {
    let clock = Clock::get()?;
    let owner = ctx.accounts.owner.key();

    ctx.accounts
        .lottery
        .initialize(owner, operator, config, ctx.bumps.lottery, ctx.bumps.vault)?;
    ctx.accounts.vault.bump = ctx.bumps.vault;
    ctx.accounts.first_round.open(
        ctx.bumps.first_round,
        FIRST_ROUND,
        clock.unix_timestamp,
        &config,
    );

    msg!(
        "Lottery initialized: split {}/{}/{}, entries {}..={} lamports, rounds of {}s",
        config.burn_pct,
        config.prize_pct,
        config.operator_pct,
        config.min_entry,
        config.max_entry,
        config.round_duration
    );
    emit!(LotteryInitialized {
        owner,
        operator,
        burn_pct: config.burn_pct,
        prize_pct: config.prize_pct,
        operator_pct: config.operator_pct,
        opened_at: clock.unix_timestamp,
    });

    Ok(())
}

/// Accounts for the owner-gated levers. The owner check happens in the
/// handler so a renounced lottery rejects every caller.
#[derive(Accounts)]
pub struct AdminOnly<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_LOTTERY],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,
}

pub fn process_pause(ctx: Context<AdminOnly>) -> Result<()> {
    set_paused(ctx, true)
}

pub fn process_unpause(ctx: Context<AdminOnly>) -> Result<()> {
    set_paused(ctx, false)
}

fn set_paused(ctx: Context<AdminOnly>, paused: bool) -> Result<()> {
    ctx.accounts
        .lottery
        .set_paused(&ctx.accounts.owner.key(), paused)?;
    msg!("Paused: {}", paused);
    emit!(PauseToggled { paused });
    Ok(())
}

pub fn process_set_entry_bounds(
    ctx: Context<AdminOnly>,
    min_entry: u64,
    max_entry: u64,
) -> Result<()> {
    ctx.accounts
        .lottery
        .set_entry_bounds(&ctx.accounts.owner.key(), min_entry, max_entry)?;
    msg!("Entry bounds: {}..={}", min_entry, max_entry);
    emit!(EntryBoundsUpdated {
        min_entry,
        max_entry
    });
    Ok(())
}

pub fn process_set_operator(ctx: Context<AdminOnly>, operator: Pubkey) -> Result<()> {
    ctx.accounts
        .lottery
        .set_operator(&ctx.accounts.owner.key(), operator)?;
    msg!("Operator: {}", operator);
    emit!(OperatorUpdated { operator });
    Ok(())
}

pub fn process_transfer_ownership(ctx: Context<AdminOnly>, new_owner: Pubkey) -> Result<()> {
    let previous_owner = ctx
        .accounts
        .lottery
        .transfer_ownership(&ctx.accounts.owner.key(), new_owner)?;
    msg!("Ownership: {} -> {}", previous_owner, new_owner);
    emit!(OwnershipTransferred {
        previous_owner,
        new_owner,
    });
    Ok(())
}

pub fn process_renounce_ownership(ctx: Context<AdminOnly>) -> Result<()> {
    let previous_owner = ctx
        .accounts
        .lottery
        .renounce_ownership(&ctx.accounts.owner.key())?;
    msg!("Ownership renounced by {}", previous_owner);
    emit!(OwnershipTransferred {
        previous_owner,
        new_owner: Pubkey::default(),
    });
    Ok(())
}
