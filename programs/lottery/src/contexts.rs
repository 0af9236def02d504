// programs/lottery/src/contexts.rs

use anchor_lang::prelude::*;

use crate::state::{Config, Lottery};

#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [crate::CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct InitializeLottery<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = admin,
        space = 8 + Lottery::INIT_SPACE,
        seeds = [crate::LOTTERY_SEED],
        bump
    )]
    pub lottery: Account<'info, Lottery>,

    /// CHECK: system-owned vault PDA, holds lamports, no data
    #[account(
        init,
        payer = admin,
        space = 0,
        owner = anchor_lang::solana_program::system_program::ID,
        seeds = [crate::VAULT_SEED],
        bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct SetPause<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct SetOraclePubkey<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct UpdateLotteryParams<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct EnterLottery<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    /// CHECK: system-owned vault PDA. Address enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED],
        bump = lottery.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct CheckUpkeep<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,
}

#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,
}

#[derive(Accounts)]
pub struct FulfillRandomWords<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    /// CHECK: system-owned vault PDA. Address enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED],
        bump = lottery.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    /// CHECK: must equal the drawn player; validated in the handler once
    /// the winner index is known.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,

    pub oracle: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[cfg(feature = "mock-oracle")]
#[derive(Accounts)]
pub struct FulfillRandomWordsMock<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    /// CHECK: system-owned vault PDA. Address enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED],
        bump = lottery.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    /// CHECK: must equal the drawn player; validated in the handler once
    /// the winner index is known.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,

    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}
