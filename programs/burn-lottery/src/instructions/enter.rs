use anchor_lang::prelude::*;
use solana_program::incinerator;

use crate::constants::*;
use crate::error::BurnLotteryError;
use crate::events::EntryRecorded;
use crate::state::*;
use crate::utils::transfer_from_signer;

/// Accounts required to enter the current round.
#[derive(Accounts)]
pub struct Enter<'info> {
    /// The participant contributing lamports.
    #[account(mut)]
    pub participant: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_LOTTERY],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// The round currently accepting entries.
    #[account(
        mut,
        seeds = [SEED_ROUND, lottery.round_number.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Box<Account<'info, Round>>,

    /// Lifetime statistics of the participant, created on first entry.
    #[account(
        init_if_needed,
        payer = participant,
        space = 8 + Player::INIT_SPACE,
        seeds = [SEED_PLAYER, participant.key().as_ref()],
        bump
    )]
    pub player: Account<'info, Player>,

    #[account(
        mut,
        seeds = [SEED_VAULT],
        bump = lottery.vault_bump,
    )]
    pub vault: Account<'info, Vault>,

    /// CHECK: must be the configured operator; only receives lamports.
    #[account(mut, address = lottery.operator @ BurnLotteryError::InvalidAddress)]
    pub operator: UncheckedAccount<'info>,

    /// CHECK: the runtime incinerator; lamports sent here are destroyed.
    #[account(mut, address = incinerator::ID @ BurnLotteryError::InvalidAddress)]
    pub incinerator: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Records an entry of `amount` lamports and distributes it: the burn share
/// to the incinerator, the prize share to the vault, the operator share to
/// the operator.
pub fn process_enter(ctx: Context<Enter>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let participant = ctx.accounts.participant.key();

    let receipt = ctx.accounts.lottery.record_entry(
        &mut ctx.accounts.round,
        participant,
        amount,
        clock.unix_timestamp,
    )?;

    let first_ever = ctx.accounts.player.record_entry(
        participant,
        ctx.bumps.player,
        receipt.round_number,
        amount,
    )?;
    if first_ever {
        ctx.accounts.lottery.note_new_participant()?;
    }

    let system_program = ctx.accounts.system_program.to_account_info();
    let from = ctx.accounts.participant.to_account_info();
    transfer_from_signer(
        &system_program,
        &from,
        &ctx.accounts.incinerator.to_account_info(),
        receipt.split.burned,
    )?;
    transfer_from_signer(
        &system_program,
        &from,
        &ctx.accounts.vault.to_account_info(),
        receipt.split.prize,
    )?;
    transfer_from_signer(
        &system_program,
        &from,
        &ctx.accounts.operator.to_account_info(),
        receipt.split.operator,
    )?;

    msg!(
        "Round {}: {} entered {} lamports (burned {}, prize {}, operator {}), weight {}",
        receipt.round_number,
        participant,
        amount,
        receipt.split.burned,
        receipt.split.prize,
        receipt.split.operator,
        receipt.ticket_weight
    );
    emit!(EntryRecorded {
        round_number: receipt.round_number,
        participant,
        amount,
        burned: receipt.split.burned,
        prize: receipt.split.prize,
        operator: receipt.split.operator,
        cumulative_amount: receipt.cumulative_amount,
        ticket_weight: receipt.ticket_weight,
    });

    Ok(())
}
