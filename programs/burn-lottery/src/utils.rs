use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::error::BurnLotteryError;

/// Transfer lamports from a signer to any account through the system program.
pub fn transfer_from_signer<'info>(
    system_program: &AccountInfo<'info>,
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    system_program::transfer(
        CpiContext::new(
            system_program.clone(),
            system_program::Transfer {
                from: from.clone(),
                to: to.clone(),
            },
        ),
        amount,
    )
    .map_err(|_| error!(BurnLotteryError::TransferFailed))
}

/// Transfer lamports from the program-owned vault to a recipient, keeping
/// the vault rent exempt.
pub fn transfer_from_vault<'info>(
    vault: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let reserve = Rent::get()?.minimum_balance(vault.data_len());
    let vault_balance = balance_after_payout(vault.lamports(), reserve, amount)?;
    let to_balance = to
        .lamports()
        .checked_add(amount)
        .ok_or(BurnLotteryError::MathOverflow)?;
    **vault.try_borrow_mut_lamports()? = vault_balance;
    **to.try_borrow_mut_lamports()? = to_balance;
    Ok(())
}

/// Vault balance left after paying `amount`, which may not dip into the
/// rent-exempt `reserve`.
pub fn balance_after_payout(balance: u64, reserve: u64, amount: u64) -> Result<u64> {
    let available = balance.saturating_sub(reserve);
    require!(amount <= available, BurnLotteryError::TransferFailed);
    balance
        .checked_sub(amount)
        .ok_or_else(|| error!(BurnLotteryError::TransferFailed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::assert_error;

    #[test]
    fn payout_may_drain_down_to_the_reserve() {
        let (balance, reserve) = (1_000_000, 890_880);
        let available = balance - reserve;
        assert_eq!(balance_after_payout(balance, reserve, available).unwrap(), reserve);
        assert_error(
            balance_after_payout(balance, reserve, available + 1),
            BurnLotteryError::TransferFailed,
        );
        assert_eq!(balance_after_payout(balance, reserve, 0).unwrap(), balance);
    }

    #[test]
    fn vault_below_reserve_pays_nothing() {
        assert_error(
            balance_after_payout(500, 890_880, 1),
            BurnLotteryError::TransferFailed,
        );
        assert_eq!(balance_after_payout(500, 890_880, 0).unwrap(), 500);
    }
}
