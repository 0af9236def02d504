use anchor_lang::prelude::*;

#[error_code]
pub enum LotteryError {
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Protocol paused")]
    Paused,

    #[msg("Not enough lamports to cover the entrance fee")]
    NotEnoughLamportsEntered,
    #[msg("Lottery is not open")]
    NotOpen,
    #[msg("Player list is full")]
    PlayersFull,

    #[msg("Upkeep not needed")]
    UpkeepNotNeeded,

    #[msg("Nonexistent request")]
    NonexistentRequest,
    #[msg("Oracle pubkey not set")]
    OracleNotSet,
    #[msg("Winner account does not match the drawn player")]
    WinnerMismatch,

    #[msg("Invalid entrance fee")]
    InvalidEntranceFee,
    #[msg("Invalid interval")]
    InvalidInterval,

    #[msg("Insufficient vault funds")]
    InsufficientVaultFunds,

    #[msg("Math overflow")]
    MathOverflow,
}
