use anchor_lang::prelude::*;

#[event]
pub struct LotteryInitialized {
    pub owner: Pubkey,
    pub operator: Pubkey,
    pub burn_pct: u8,
    pub prize_pct: u8,
    pub operator_pct: u8,
    pub opened_at: i64,
}

#[event]
pub struct EntryRecorded {
    pub round_number: u64,
    pub participant: Pubkey,
    pub amount: u64,
    pub burned: u64,
    pub prize: u64,
    pub operator: u64,
    pub cumulative_amount: u64,
    pub ticket_weight: u64,
}

#[event]
pub struct RandomnessCommitted {
    pub round_number: u64,
    pub commit_slot: u64,
    pub reveal_slot: u64,
    pub caller: Pubkey,
}

#[event]
pub struct RandomnessRecommitted {
    pub round_number: u64,
    pub stale_commit_slot: u64,
    pub commit_slot: u64,
}

#[event]
pub struct RoundResolved {
    pub round_number: u64,
    pub winner: Option<Pubkey>,
    pub prize_amount: u64,
    pub participants: u16,
    pub next_round: u64,
    pub timestamp: i64,
}

#[event]
pub struct PrizeEscrowed {
    pub round_number: u64,
    pub winner: Pubkey,
    pub amount: u64,
    pub claimable_until_round: u64,
}

#[event]
pub struct PrizeClaimed {
    pub round_number: u64,
    pub winner: Pubkey,
    pub amount: u64,
    pub caller: Pubkey,
}

#[event]
pub struct PrizeSwept {
    pub round_number: u64,
    pub amount: u64,
    pub burned: u64,
    pub recycled: u64,
    pub operator: u64,
    pub caller: Pubkey,
}

#[event]
pub struct PauseToggled {
    pub paused: bool,
}

#[event]
pub struct EntryBoundsUpdated {
    pub min_entry: u64,
    pub max_entry: u64,
}

#[event]
pub struct OperatorUpdated {
    pub operator: Pubkey,
}

#[event]
pub struct OwnershipTransferred {
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}
