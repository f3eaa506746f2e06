use anchor_lang::prelude::*;
use solana_program::incinerator;

use crate::constants::*;
use crate::error::BurnLotteryError;
use crate::events::PrizeSwept;
use crate::state::*;
use crate::utils::transfer_from_vault;

/// Accounts required to sweep an expired prize. Callable by anyone.
#[derive(Accounts)]
#[instruction(round_number: u64)]
pub struct SweepPrize<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_LOTTERY],
        bump = lottery.bump,
        constraint = round_number < lottery.round_number @ BurnLotteryError::NothingToClaim,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// The resolved round whose escrow expired.
    #[account(
        mut,
        seeds = [SEED_ROUND, round_number.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Box<Account<'info, Round>>,

    /// The live round receiving the recycled prize share.
    #[account(
        mut,
        seeds = [SEED_ROUND, lottery.round_number.to_le_bytes().as_ref()],
        bump = current_round.bump,
    )]
    pub current_round: Box<Account<'info, Round>>,

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
}

/// Forfeits an expired escrow. The amount is split like an entry: the burn
/// share leaves the vault for the incinerator, the operator share for the
/// operator, and the prize share stays in the vault for the current round.
pub fn process_sweep_prize(ctx: Context<SweepPrize>, round_number: u64) -> Result<()> {
    let receipt = ctx
        .accounts
        .lottery
        .sweep_expired(&mut ctx.accounts.round, &mut ctx.accounts.current_round)?;

    let vault = ctx.accounts.vault.to_account_info();
    transfer_from_vault(
        &vault,
        &ctx.accounts.incinerator.to_account_info(),
        receipt.split.burned,
    )?;
    transfer_from_vault(
        &vault,
        &ctx.accounts.operator.to_account_info(),
        receipt.split.operator,
    )?;

    msg!(
        "Round {} prize of {} lamports swept: burned {}, recycled {}, operator {}",
        round_number,
        receipt.amount,
        receipt.split.burned,
        receipt.split.prize,
        receipt.split.operator
    );
    emit!(PrizeSwept {
        round_number,
        amount: receipt.amount,
        burned: receipt.split.burned,
        recycled: receipt.split.prize,
        operator: receipt.split.operator,
        caller: ctx.accounts.caller.key(),
    });

    Ok(())
}
