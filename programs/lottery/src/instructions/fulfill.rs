use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke_signed, system_instruction};

use crate::errors::LotteryError;
use crate::events::WinnerPicked;
use crate::state::Lottery;
use crate::utils::{fulfill_core, VAULT_SEED};
use crate::FulfillRandomWords;

#[cfg(feature = "mock-oracle")]
use crate::utils::derive_random_value;
#[cfg(feature = "mock-oracle")]
use crate::FulfillRandomWordsMock;

/// Oracle-only delivery of the random value for the outstanding request.
pub fn fulfill_random_words(
    ctx: Context<FulfillRandomWords>,
    request_id: u64,
    random_value: u64,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, LotteryError::Paused);
    require!(
        cfg.oracle_pubkey != Pubkey::default(),
        LotteryError::OracleNotSet
    );
    require_keys_eq!(
        ctx.accounts.oracle.key(),
        cfg.oracle_pubkey,
        LotteryError::Unauthorized
    );

    resolve_and_pay(
        &mut ctx.accounts.lottery,
        &ctx.accounts.vault.to_account_info(),
        &ctx.accounts.winner.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
        request_id,
        random_value,
    )
}

/// Test-only driver standing in for the live oracle. Derives a
/// deterministic value from the request id and the lottery, so a test
/// client can recompute the draw off-chain and pass the right winner
/// account before sending the transaction.
#[cfg(feature = "mock-oracle")]
pub fn fulfill_random_words_mock(
    ctx: Context<FulfillRandomWordsMock>,
    request_id: u64,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(
        ctx.accounts.admin.key(),
        cfg.admin,
        LotteryError::Unauthorized
    );

    let random_value = derive_random_value(request_id, &ctx.accounts.lottery.key());

    resolve_and_pay(
        &mut ctx.accounts.lottery,
        &ctx.accounts.vault.to_account_info(),
        &ctx.accounts.winner.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
        request_id,
        random_value,
    )
}

/// Shared fulfillment tail: draw, pay the whole pot, reset. Runs inside a
/// single instruction, so a failed transfer unwinds the state writes too.
fn resolve_and_pay<'info>(
    lottery: &mut Account<'info, Lottery>,
    vault: &AccountInfo<'info>,
    winner_account: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    request_id: u64,
    random_value: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let (winner, payout) = fulfill_core(lottery, request_id, random_value, now)?;

    require_keys_eq!(winner_account.key(), winner, LotteryError::WinnerMismatch);
    require!(
        vault.lamports() >= payout,
        LotteryError::InsufficientVaultFunds
    );

    if payout > 0 {
        let ix = system_instruction::transfer(&vault.key(), &winner, payout);

        let signer_seeds: &[&[u8]] = &[VAULT_SEED, &[lottery.vault_bump]];

        invoke_signed(
            &ix,
            &[vault.clone(), winner_account.clone(), system_program.clone()],
            &[signer_seeds],
        )?;
    }

    msg!("winner picked: {}", winner);
    emit!(WinnerPicked { winner });

    Ok(())
}
