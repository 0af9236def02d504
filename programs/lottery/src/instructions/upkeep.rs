use anchor_lang::prelude::*;

use crate::errors::LotteryError;
use crate::events::WinnerRequested;
use crate::utils::{begin_upkeep_core, upkeep_check};
use crate::{CheckUpkeep, PerformUpkeep};

/// Read-only check. The result goes out as return data so off-chain
/// crankers can simulate this instruction instead of re-deriving the
/// conditions themselves. Reports false while the protocol is paused,
/// since `perform_upkeep` would reject the crank anyway.
pub fn check_upkeep(ctx: Context<CheckUpkeep>) -> Result<bool> {
    let now = Clock::get()?.unix_timestamp;
    let needed = upkeep_check(ctx.accounts.config.paused, &ctx.accounts.lottery, now);

    msg!("upkeep_needed: {}", needed);
    Ok(needed)
}

/// Permissionless crank. Re-validates the upkeep conditions in the same
/// transaction that acts on them.
pub fn perform_upkeep(ctx: Context<PerformUpkeep>) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, LotteryError::Paused);

    let now = Clock::get()?.unix_timestamp;

    let lottery = &mut ctx.accounts.lottery;
    let request_id = begin_upkeep_core(lottery, now)?;

    msg!("randomness requested, request_id: {}", request_id);
    emit!(WinnerRequested {
        lottery: lottery.key(),
        request_id,
    });

    Ok(())
}
