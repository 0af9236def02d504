use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

pub use constants::*;
pub use contexts::*;
pub use errors::*;
pub use events::*;
pub use instructions::*;
pub use state::*;
pub use utils::*;

#[cfg(not(feature = "no-entrypoint"))]
use solana_security_txt::security_txt;

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    // Required fields
    name: "Interval Lottery",
    project_url: "https://github.com/richarddmm/sol-interval-lottery",
    contacts: "link:https://github.com/richarddmm/sol-interval-lottery/issues",
    policy: "https://github.com/richarddmm/sol-interval-lottery/blob/main/SECURITY.md",

    // Optional fields
    preferred_languages: "en",
    source_code: "https://github.com/richarddmm/sol-interval-lottery"
}

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod lottery {
    use super::*;
    use crate::instructions::{admin, enter, fulfill, upkeep};

    pub fn initialize_config(ctx: Context<InitializeConfig>) -> Result<()> {
        admin::initialize_config(ctx)
    }

    pub fn initialize_lottery(
        ctx: Context<InitializeLottery>,
        entrance_fee: u64,
        interval: u64,
    ) -> Result<()> {
        admin::initialize_lottery(ctx, entrance_fee, interval)
    }

    pub fn set_pause(ctx: Context<SetPause>, paused: bool) -> Result<()> {
        admin::set_pause(ctx, paused)
    }

    pub fn set_oracle_pubkey(ctx: Context<SetOraclePubkey>, oracle_pubkey: Pubkey) -> Result<()> {
        admin::set_oracle_pubkey(ctx, oracle_pubkey)
    }

    pub fn update_entrance_fee(
        ctx: Context<UpdateLotteryParams>,
        new_entrance_fee: u64,
    ) -> Result<()> {
        admin::update_entrance_fee(ctx, new_entrance_fee)
    }

    pub fn update_interval(ctx: Context<UpdateLotteryParams>, new_interval: u64) -> Result<()> {
        admin::update_interval(ctx, new_interval)
    }

    // core
    pub fn enter_lottery(ctx: Context<EnterLottery>, amount: u64) -> Result<()> {
        enter::enter_lottery(ctx, amount)
    }

    pub fn check_upkeep(ctx: Context<CheckUpkeep>) -> Result<bool> {
        upkeep::check_upkeep(ctx)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>) -> Result<()> {
        upkeep::perform_upkeep(ctx)
    }

    pub fn fulfill_random_words(
        ctx: Context<FulfillRandomWords>,
        request_id: u64,
        random_value: u64,
    ) -> Result<()> {
        fulfill::fulfill_random_words(ctx, request_id, random_value)
    }

    #[cfg(feature = "mock-oracle")]
    pub fn fulfill_random_words_mock(
        ctx: Context<FulfillRandomWordsMock>,
        request_id: u64,
    ) -> Result<()> {
        fulfill::fulfill_random_words_mock(ctx, request_id)
    }
}
