use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::LotteryError;
use crate::state::{Config, LotteryState};
use crate::{InitializeConfig, InitializeLottery, SetOraclePubkey, SetPause, UpdateLotteryParams};

pub fn initialize_config(ctx: Context<InitializeConfig>) -> Result<()> {
    let cfg: &mut Account<Config> = &mut ctx.accounts.config;

    cfg.admin = ctx.accounts.admin.key();
    cfg.bump = ctx.bumps.config;

    // The oracle is wired up separately via set_oracle_pubkey.
    cfg.oracle_pubkey = Pubkey::default();
    cfg.paused = false;
    cfg.version = INITIAL_VERSION;

    Ok(())
}

pub fn initialize_lottery(
    ctx: Context<InitializeLottery>,
    entrance_fee: u64,
    interval: u64,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LotteryError::Unauthorized);

    require!(entrance_fee > 0, LotteryError::InvalidEntranceFee);
    require!(
        interval > 0 && interval <= MAX_INTERVAL_SECONDS,
        LotteryError::InvalidInterval
    );

    let now = Clock::get()?.unix_timestamp;

    let lottery = &mut ctx.accounts.lottery;
    lottery.bump = ctx.bumps.lottery;
    lottery.state = LotteryState::Open as u8;

    lottery.vault = ctx.accounts.vault.key();
    lottery.vault_bump = ctx.bumps.vault;

    lottery.entrance_fee = entrance_fee;
    lottery.interval = interval;

    lottery.players = Vec::new();
    lottery.pot_lamports = 0;
    lottery.last_timestamp = now;

    lottery.recent_winner = Pubkey::default();
    lottery.pending_request_id = 0;
    lottery.next_request_id = INITIAL_REQUEST_ID;

    lottery.version = INITIAL_VERSION;

    Ok(())
}

pub fn set_pause(ctx: Context<SetPause>, paused: bool) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LotteryError::Unauthorized);
    cfg.paused = paused;
    Ok(())
}

pub fn set_oracle_pubkey(ctx: Context<SetOraclePubkey>, oracle_pubkey: Pubkey) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LotteryError::Unauthorized);

    cfg.oracle_pubkey = oracle_pubkey;
    Ok(())
}

pub fn update_entrance_fee(ctx: Context<UpdateLotteryParams>, new_entrance_fee: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LotteryError::Unauthorized);
    require!(new_entrance_fee > 0, LotteryError::InvalidEntranceFee);

    let lottery = &mut ctx.accounts.lottery;
    // No parameter changes mid-draw; the outstanding request was priced
    // under the old fee.
    require!(lottery.is_open(), LotteryError::NotOpen);

    lottery.entrance_fee = new_entrance_fee;
    Ok(())
}

pub fn update_interval(ctx: Context<UpdateLotteryParams>, new_interval: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LotteryError::Unauthorized);
    require!(
        new_interval > 0 && new_interval <= MAX_INTERVAL_SECONDS,
        LotteryError::InvalidInterval
    );

    let lottery = &mut ctx.accounts.lottery;
    require!(lottery.is_open(), LotteryError::NotOpen);

    lottery.interval = new_interval;
    Ok(())
}
