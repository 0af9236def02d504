use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke, system_instruction};

use crate::errors::LotteryError;
use crate::events::LotteryEnter;
use crate::utils::enter_core;
use crate::EnterLottery;

pub fn enter_lottery(ctx: Context<EnterLottery>, amount: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, LotteryError::Paused);

    let player = ctx.accounts.player.key();

    let lottery = &mut ctx.accounts.lottery;
    enter_core(lottery, player, amount)?;

    // --- TRANSFER the paid amount into the vault ---
    let ix = system_instruction::transfer(&player, &ctx.accounts.vault.key(), amount);

    invoke(
        &ix,
        &[
            ctx.accounts.player.to_account_info(),
            ctx.accounts.vault.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
        ],
    )?;

    emit!(LotteryEnter { player });

    Ok(())
}
