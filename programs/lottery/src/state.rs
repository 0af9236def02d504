use anchor_lang::prelude::*;

use crate::constants::MAX_PLAYERS;

#[account]
#[derive(InitSpace)]
pub struct Config {
    pub admin: Pubkey,
    pub bump: u8,

    /// Key allowed to deliver randomness via `fulfill_random_words`.
    /// `Pubkey::default()` until the admin sets it.
    pub oracle_pubkey: Pubkey,

    pub paused: bool,
    pub version: u16,
}

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LotteryState {
    Open = 0,
    Calculating = 1,
}

#[account]
#[derive(InitSpace)]
pub struct Lottery {
    pub bump: u8,
    pub state: u8,

    // System-owned PDA vault (holds lamports, no data)
    pub vault: Pubkey,
    pub vault_bump: u8,

    pub entrance_fee: u64,
    /// Minimum seconds between upkeep cycles.
    pub interval: u64,

    /// Entry order preserved; the same key may appear more than once.
    #[max_len(MAX_PLAYERS)]
    pub players: Vec<Pubkey>,

    /// Lamports accumulated from entries in the current cycle. Tracked
    /// separately from the vault balance so the rent-exempt floor never
    /// counts toward the pot.
    pub pot_lamports: u64,

    /// Unix time of initialization or of the last winner resolution.
    pub last_timestamp: i64,

    pub recent_winner: Pubkey,

    /// Outstanding randomness request, 0 when none.
    pub pending_request_id: u64,
    /// Next request id to hand out. Starts at 1, so every issued id is
    /// positive and 0 can stand for "no request".
    pub next_request_id: u64,

    pub version: u16,
}

impl Lottery {
    pub fn entrance_fee(&self) -> u64 {
        self.entrance_fee
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn latest_timestamp(&self) -> i64 {
        self.last_timestamp
    }

    pub fn lottery_state(&self) -> LotteryState {
        if self.state == LotteryState::Calculating as u8 {
            LotteryState::Calculating
        } else {
            LotteryState::Open
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == LotteryState::Open as u8
    }

    pub fn recent_winner(&self) -> Pubkey {
        self.recent_winner
    }

    pub fn player_at(&self, index: usize) -> Option<Pubkey> {
        self.players.get(index).copied()
    }

    pub fn number_of_players(&self) -> usize {
        self.players.len()
    }

    pub fn pot(&self) -> u64 {
        self.pot_lamports
    }

    pub fn pending_request(&self) -> Option<u64> {
        if self.pending_request_id == 0 {
            None
        } else {
            Some(self.pending_request_id)
        }
    }
}
