use anchor_lang::prelude::*;

/// A player entered the current cycle.
#[event]
pub struct LotteryEnter {
    pub player: Pubkey,
}

/// Upkeep ran and a randomness request went out. `request_id` correlates
/// the eventual fulfillment with this cycle.
#[event]
pub struct WinnerRequested {
    pub lottery: Pubkey,
    pub request_id: u64,
}

/// A cycle resolved: the pot was paid out and the lottery reset.
#[event]
pub struct WinnerPicked {
    pub winner: Pubkey,
}
