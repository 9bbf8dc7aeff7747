//! Hotdog Vendor - A lane-based arcade vending game
//!
//! Core modules:
//! - `sim`: Deterministic session engine (lanes, requests, throws, scoring)
//! - `platform`: Input normalization and the browser host binding
//! - `tuning`: Data-driven game balance
//! - `highscores`: Persisted leaderboard

pub mod highscores;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::{ScorePolicy, Tuning, TuningError};

/// Game configuration constants (defaults for `Tuning`)
pub mod consts {
    /// Lane centerline y positions, top to bottom
    pub const LANE_POSITIONS: [f32; 4] = [410.0, 570.0, 740.0, 910.0];
    /// Player stands at a fixed x on the left of the play field
    pub const PLAYER_X: f32 = 300.0;

    /// Maximum concurrently active requests
    pub const REQUEST_CAP: usize = 3;
    /// How long a customer waits before the request expires (ms)
    pub const REQUEST_DURATION_MS: u64 = 7000;
    /// Interval between spawn attempts (ms)
    pub const SPAWN_CADENCE_MS: u64 = 1800;

    /// Hotdogs held at session start
    pub const INITIAL_AMMO: u32 = 10;
    /// Lives at session start
    pub const INITIAL_LIVES: u32 = 5;
    /// Hotdogs granted when a set is cleared
    pub const SET_AMMO_GRANT: u32 = 20;
    /// Lives granted when a set is cleared
    pub const SET_LIFE_GRANT: u32 = 1;
    /// Banner window after a set advance, no new requests (ms)
    pub const SET_BREAK_MS: u64 = 3000;

    /// Lane change tween (ms)
    pub const LANE_TRANSITION_MS: u64 = 100;
    /// Hotdog flight to a requesting customer (ms)
    pub const HOTDOG_TRAVEL_MS: u64 = 2000;
    /// Money flight back to the player (ms)
    pub const MONEY_TRAVEL_MS: u64 = 2800;
    /// Hotdog flight to a customer who didn't ask (ms)
    pub const MIS_THROW_TRAVEL_MS: u64 = 1800;
    /// Customer holds the unwanted hotdog before throwing it back (ms)
    pub const CATCH_DELAY_MS: u64 = 250;

    /// Score at or below which the debt policy ends the run
    pub const DEBT_LIMIT: i64 = -5;
}
