use anchor_lang::error::ERROR_CODE_OFFSET;
use anchor_lang::prelude::*;

#[error_code]
pub enum BurnLotteryError {
    // Validation
    #[msg("Amount below minimum")]
    BelowMinimum,
    #[msg("Amount above maximum")]
    AboveMaximum,
    #[msg("Invalid address")]
    InvalidAddress,
    #[msg("Amount must be greater than 0")]
    InvalidAmount,
    #[msg("Invalid index")]
    InvalidIndex,
    #[msg("Invalid lottery configuration")]
    InvalidConfig,
    #[msg("Round account does not match the requested round")]
    WrongRound,
    #[msg("Account does not match the recorded winner")]
    WinnerMismatch,
    #[msg("Math overflow")]
    MathOverflow,

    // State conflicts
    #[msg("Round not finished yet")]
    RoundNotDue,
    #[msg("Round duration elapsed, close the round first")]
    RoundEnded,
    #[msg("Round is not accepting entries")]
    RoundNotOpen,
    #[msg("Randomness must be committed first")]
    MustCommitFirst,
    #[msg("Randomness already committed")]
    AlreadyCommitted,
    #[msg("Commitment has not matured yet")]
    NotMatured,
    #[msg("Round already resolved")]
    RoundAlreadyResolved,
    #[msg("Nothing to claim")]
    NothingToClaim,
    #[msg("Claim period has expired, sweep instead")]
    ClaimExpired,
    #[msg("Claim period has not expired")]
    NotExpired,
    #[msg("Reentrant call rejected")]
    ReentrantCall,

    // Capacity
    #[msg("Round is full, wait for the next round")]
    RoundFull,

    // Authorization
    #[msg("Only owner can call this")]
    NotOwner,
    #[msg("Contract is paused")]
    ContractPaused,

    // Value transfer
    #[msg("Value transfer failed")]
    TransferFailed,
}

/// Coarse error taxonomy seen by callers.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    StateConflict,
    CapacityExceeded,
    Unauthorized,
    TransferFailure,
}

/// How a presentation layer should surface an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Someone else already did it; no action needed.
    Informational,
    /// The caller can fix the input or wait.
    Actionable,
    Fatal,
}

impl BurnLotteryError {
    /// Variants in declaration order; index + `ERROR_CODE_OFFSET` is the on-chain code.
    pub const ALL: [BurnLotteryError; 24] = [
        Self::BelowMinimum,
        Self::AboveMaximum,
        Self::InvalidAddress,
        Self::InvalidAmount,
        Self::InvalidIndex,
        Self::InvalidConfig,
        Self::WrongRound,
        Self::WinnerMismatch,
        Self::MathOverflow,
        Self::RoundNotDue,
        Self::RoundEnded,
        Self::RoundNotOpen,
        Self::MustCommitFirst,
        Self::AlreadyCommitted,
        Self::NotMatured,
        Self::RoundAlreadyResolved,
        Self::NothingToClaim,
        Self::ClaimExpired,
        Self::NotExpired,
        Self::ReentrantCall,
        Self::RoundFull,
        Self::NotOwner,
        Self::ContractPaused,
        Self::TransferFailed,
    ];

    /// Maps a custom program error code returned by the runtime back to its variant.
    pub fn from_code(code: u32) -> Option<Self> {
        let index = code.checked_sub(ERROR_CODE_OFFSET)? as usize;
        Self::ALL.get(index).copied()
    }

    pub fn kind(&self) -> ErrorKind {
        use BurnLotteryError::*;
        match self {
            BelowMinimum | AboveMaximum | InvalidAddress | InvalidAmount | InvalidIndex
            | InvalidConfig | WrongRound | WinnerMismatch | MathOverflow => ErrorKind::Validation,
            RoundNotDue | RoundEnded | RoundNotOpen | MustCommitFirst | AlreadyCommitted
            | NotMatured | RoundAlreadyResolved | NothingToClaim | ClaimExpired | NotExpired
            | ReentrantCall => ErrorKind::StateConflict,
            RoundFull => ErrorKind::CapacityExceeded,
            NotOwner | ContractPaused => ErrorKind::Unauthorized,
            TransferFailed => ErrorKind::TransferFailure,
        }
    }

    /// True when another actor already performed the requested transition.
    pub fn is_benign_race(&self) -> bool {
        matches!(
            self,
            BurnLotteryError::AlreadyCommitted
                | BurnLotteryError::RoundAlreadyResolved
                | BurnLotteryError::NothingToClaim
        )
    }

    pub fn severity(&self) -> Severity {
        if self.is_benign_race() {
            return Severity::Informational;
        }
        match self.kind() {
            ErrorKind::Validation | ErrorKind::StateConflict | ErrorKind::CapacityExceeded => {
                Severity::Actionable
            }
            ErrorKind::Unauthorized | ErrorKind::TransferFailure => Severity::Fatal,
        }
    }
}

/// Asserts that `result` failed with exactly `expected`.
#[cfg(test)]
pub(crate) fn assert_error<T: std::fmt::Debug>(result: Result<T>, expected: BurnLotteryError) {
    match result {
        Ok(value) => panic!("expected {:?}, got Ok({:?})", expected, value),
        Err(err) => assert_eq!(err, anchor_lang::error::Error::from(expected)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_in_declaration_order() {
        for (i, variant) in BurnLotteryError::ALL.iter().enumerate() {
            let code = ERROR_CODE_OFFSET + i as u32;
            assert_eq!(u32::from(*variant), code);
            let back = BurnLotteryError::from_code(code).unwrap();
            assert_eq!(u32::from(back), code);
        }
        assert!(BurnLotteryError::from_code(ERROR_CODE_OFFSET - 1).is_none());
        let past_end = ERROR_CODE_OFFSET + BurnLotteryError::ALL.len() as u32;
        assert!(BurnLotteryError::from_code(past_end).is_none());
        // the last declared variant closes the table
        assert_eq!(u32::from(BurnLotteryError::TransferFailed), past_end - 1);
    }

    #[test]
    fn races_are_informational() {
        for variant in [
            BurnLotteryError::AlreadyCommitted,
            BurnLotteryError::RoundAlreadyResolved,
            BurnLotteryError::NothingToClaim,
        ] {
            assert_eq!(variant.kind(), ErrorKind::StateConflict);
            assert_eq!(variant.severity(), Severity::Informational);
        }
    }

    #[test]
    fn taxonomy() {
        assert_eq!(BurnLotteryError::BelowMinimum.kind(), ErrorKind::Validation);
        assert_eq!(BurnLotteryError::RoundFull.kind(), ErrorKind::CapacityExceeded);
        assert_eq!(BurnLotteryError::RoundFull.severity(), Severity::Actionable);
        assert_eq!(BurnLotteryError::ContractPaused.kind(), ErrorKind::Unauthorized);
        assert_eq!(BurnLotteryError::NotOwner.severity(), Severity::Fatal);
        assert_eq!(BurnLotteryError::TransferFailed.severity(), Severity::Fatal);
        assert!(!BurnLotteryError::ReentrantCall.is_benign_race());
        assert_eq!(BurnLotteryError::ClaimExpired.severity(), Severity::Actionable);
    }
}
