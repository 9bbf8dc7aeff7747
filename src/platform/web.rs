//! Browser host binding
//!
//! The page's game engine owns rendering, tweens and audio. It forwards raw
//! input here, calls `tick` every frame with `performance.now()`, and applies
//! the drained JSON events to its scene.

use wasm_bindgen::prelude::*;

use super::input::InputMapper;
use crate::highscores::HighScores;
use crate::sim::{ScoreCarry, Session, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Hotdog Vendor session engine loaded");
}

/// A session plus its input mapper, exported to JavaScript
#[wasm_bindgen]
pub struct WasmSession {
    session: Session,
    input: InputMapper,
    high_scores: HighScores,
    score_recorded: bool,
}

#[wasm_bindgen]
impl WasmSession {
    /// Start a session. `tuning_json` overrides defaults; invalid overrides
    /// are logged and ignored.
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>, now: f64) -> WasmSession {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json_or_default(&json),
            None => Tuning::default(),
        };
        let seed = js_sys::Date::now() as u64;
        WasmSession {
            session: Session::new(tuning, seed, now as u64),
            input: InputMapper::new(),
            high_scores: HighScores::load(),
            score_recorded: false,
        }
    }

    pub fn tick(&mut self, now: f64, idle_mode: bool) {
        let mut input = self.input.take();
        input.idle_mode = idle_mode;
        tick(&mut self.session, &input, now as u64);

        if self.session.is_game_over() && !self.score_recorded {
            self.score_recorded = true;
            let rank = self
                .high_scores
                .record_session(&self.session, js_sys::Date::now());
            if let Some(rank) = rank {
                log::info!("New high score, rank {}", rank);
                self.high_scores.save();
            }
        }
    }

    /// Returns true if the key maps to a game command
    pub fn key_down(&mut self, code: &str) -> bool {
        self.input.key_down(code).is_some()
    }

    pub fn key_up(&mut self, code: &str) {
        self.input.key_up(code);
    }

    pub fn pointer_down(&mut self) {
        self.input.pointer_down();
    }

    pub fn gamepad_button(&mut self, button: u32, pressed: bool) {
        self.input.gamepad_button(button, pressed);
    }

    /// Window lost focus: forget held keys so nothing sticks
    pub fn blur(&mut self) {
        self.input.release_all();
    }

    pub fn reset(&mut self, now: f64, keep_score: bool) {
        let carry = if keep_score {
            ScoreCarry::Keep
        } else {
            ScoreCarry::Reset
        };
        self.session.reset(now as u64, carry);
        self.input.release_all();
        self.score_recorded = false;
    }

    /// Tag to hand back with `confirm_lane_transition`
    pub fn epoch(&self) -> u32 {
        self.session.epoch()
    }

    pub fn confirm_lane_transition(&mut self, epoch: u32) -> bool {
        self.session.confirm_lane_transition(epoch)
    }

    /// JSON array of events since the last call
    pub fn drain_events(&mut self) -> String {
        let events = self.session.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::warn!("Failed to encode events: {}", e);
            "[]".to_string()
        })
    }

    /// JSON snapshot for the HUD
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_else(|e| {
            log::warn!("Failed to encode snapshot: {}", e);
            "{}".to_string()
        })
    }

    /// Leaderboard place the running score would take, if it would place
    pub fn leaderboard_rank(&self) -> Option<u32> {
        if self.score_recorded {
            return None;
        }
        self.high_scores
            .potential_rank(self.session.score())
            .map(|rank| rank as u32)
    }

    pub fn high_scores(&self) -> String {
        serde_json::to_string(&self.high_scores).unwrap_or_else(|_| "{}".to_string())
    }
}
