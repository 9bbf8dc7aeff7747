//! Data-driven game balance
//!
//! Every number the session engine uses lives here. Defaults reproduce the
//! shipped game; a JSON override can be loaded and is validated before use.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How score interacts with the game-over check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScorePolicy {
    /// Score never drops below 0; the run ends only when lives run out
    #[default]
    Floored,
    /// Score may go negative; the run also ends once it sinks to `limit`
    Debt { limit: i64 },
}

/// Where a customer stands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomerSpot {
    pub lane: usize,
    pub x: f32,
}

/// Errors from loading or validating tuning data
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("at least two lanes are required, got {0}")]
    TooFewLanes(usize),

    #[error("start lane {lane} is out of range for {lane_count} lanes")]
    StartLaneOutOfRange { lane: usize, lane_count: usize },

    #[error("customer {index} stands on lane {lane}, but there are only {lane_count} lanes")]
    CustomerLaneOutOfRange {
        index: usize,
        lane: usize,
        lane_count: usize,
    },

    #[error("request cap must be at least 1")]
    ZeroRequestCap,

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("initial lives must be at least 1")]
    ZeroLives,

    #[error("debt limit must be negative, got {0}")]
    DebtLimitNotNegative(i64),
}

/// Complete balance sheet for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lane y positions, top to bottom
    pub lanes: Vec<f32>,
    pub start_lane: usize,
    pub player_x: f32,
    pub customers: Vec<CustomerSpot>,

    pub request_cap: usize,
    pub request_duration_ms: u64,
    pub spawn_cadence_ms: u64,

    pub initial_ammo: u32,
    pub initial_lives: u32,
    pub set_ammo_grant: u32,
    pub set_life_grant: u32,
    pub set_break_ms: u64,

    pub lane_transition_ms: u64,
    pub hotdog_travel_ms: u64,
    pub money_travel_ms: u64,
    pub mis_throw_travel_ms: u64,
    pub catch_delay_ms: u64,

    pub score_policy: ScorePolicy,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lanes: LANE_POSITIONS.to_vec(),
            start_lane: 0,
            player_x: PLAYER_X,
            // One customer per lane, staggered so they don't line up on screen
            customers: vec![
                CustomerSpot { lane: 0, x: 1400.0 },
                CustomerSpot { lane: 1, x: 1550.0 },
                CustomerSpot { lane: 2, x: 1450.0 },
                CustomerSpot { lane: 3, x: 1600.0 },
            ],
            request_cap: REQUEST_CAP,
            request_duration_ms: REQUEST_DURATION_MS,
            spawn_cadence_ms: SPAWN_CADENCE_MS,
            initial_ammo: INITIAL_AMMO,
            initial_lives: INITIAL_LIVES,
            set_ammo_grant: SET_AMMO_GRANT,
            set_life_grant: SET_LIFE_GRANT,
            set_break_ms: SET_BREAK_MS,
            lane_transition_ms: LANE_TRANSITION_MS,
            hotdog_travel_ms: HOTDOG_TRAVEL_MS,
            money_travel_ms: MONEY_TRAVEL_MS,
            mis_throw_travel_ms: MIS_THROW_TRAVEL_MS,
            catch_delay_ms: CATCH_DELAY_MS,
            score_policy: ScorePolicy::Floored,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON override. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse a JSON override, falling back to defaults on any problem
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Self::default()
            }
        }
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Check structural invariants the session relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let lane_count = self.lane_count();
        if lane_count < 2 {
            return Err(TuningError::TooFewLanes(lane_count));
        }
        if self.start_lane >= lane_count {
            return Err(TuningError::StartLaneOutOfRange {
                lane: self.start_lane,
                lane_count,
            });
        }
        if let Some((index, spot)) = self
            .customers
            .iter()
            .enumerate()
            .find(|(_, c)| c.lane >= lane_count)
        {
            return Err(TuningError::CustomerLaneOutOfRange {
                index,
                lane: spot.lane,
                lane_count,
            });
        }
        if self.request_cap == 0 {
            return Err(TuningError::ZeroRequestCap);
        }
        if self.request_duration_ms == 0 {
            return Err(TuningError::ZeroDuration("request_duration_ms"));
        }
        if self.spawn_cadence_ms == 0 {
            return Err(TuningError::ZeroDuration("spawn_cadence_ms"));
        }
        if self.initial_lives == 0 {
            return Err(TuningError::ZeroLives);
        }
        match self.score_policy {
            ScorePolicy::Debt { limit } if limit >= 0 => {
                return Err(TuningError::DebtLimitNotNegative(limit));
            }
            _ => {}
        }
        Ok(())
    }
}
