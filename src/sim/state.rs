//! Session state and lifecycle
//!
//! A `Session` owns every piece of gameplay state for one round. It is created
//! at session start, mutated through the operations in `tick`, and rebuilt in
//! place by `reset`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::customer::{Customer, CustomerId};
use super::events::{ClearReason, Presentation, SessionEvent};
use super::lane::LaneModel;
use super::ledger::{ScoreLivesLedger, SetProgression};
use super::timers::TimerQueue;
use crate::tuning::Tuning;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Requests spawn and input is accepted
    Active,
    /// Run ended; only `reset` does anything
    GameOver,
}

/// Whether the score survives a reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreCarry {
    /// Start the new round at 0
    Reset,
    /// Carry the current score into the new round
    Keep,
}

/// Read-only view for HUDs and the web host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub epoch: u32,
    pub phase: SessionPhase,
    pub now: u64,
    pub lane: usize,
    pub player_pos: Vec2,
    pub transitioning: bool,
    pub ammo: u32,
    pub score: i64,
    pub lives: u32,
    pub set_number: u32,
    pub deliveries_in_set: u32,
    pub in_set_break: bool,
    pub customers: Vec<Customer>,
}

/// One round of play
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) tuning: Tuning,
    pub(crate) rng: Pcg32,
    pub(crate) phase: SessionPhase,
    /// Latest time seen (ms); never moves backwards
    pub(crate) now: u64,
    pub(crate) lanes: LaneModel,
    /// Sorted by id for deterministic iteration
    pub(crate) customers: Vec<Customer>,
    pub(crate) ammo: u32,
    pub(crate) ledger: ScoreLivesLedger,
    pub(crate) sets: SetProgression,
    pub(crate) timers: TimerQueue,
    pub(crate) next_spawn_at: u64,
    pub(crate) in_set_break: bool,
    pub(crate) events: Vec<SessionEvent>,
}

impl Session {
    /// Start a new round at time `now`. `tuning` should already be validated.
    pub fn new(tuning: Tuning, seed: u64, now: u64) -> Self {
        debug_assert!(tuning.validate().is_ok(), "session started with invalid tuning");
        let lanes = LaneModel::new(
            tuning.lane_count(),
            tuning.start_lane,
            tuning.lane_transition_ms,
        );
        let ledger = ScoreLivesLedger::new(0, tuning.initial_lives, tuning.score_policy);
        let sets = SetProgression::new(tuning.set_ammo_grant, tuning.set_life_grant);

        let mut session = Self {
            customers: Self::spawn_customers(&tuning),
            ammo: tuning.initial_ammo,
            next_spawn_at: now.saturating_add(tuning.spawn_cadence_ms),
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::Active,
            now,
            lanes,
            ledger,
            sets,
            timers: TimerQueue::new(),
            in_set_break: false,
            events: Vec::new(),
            tuning,
        };
        session.push_hud_events();
        log::info!(
            "Session started: {} lanes, {} customers, seed {}",
            session.tuning.lane_count(),
            session.customers.len(),
            seed
        );
        session.check_game_over();
        session
    }

    fn spawn_customers(tuning: &Tuning) -> Vec<Customer> {
        tuning
            .customers
            .iter()
            .enumerate()
            .map(|(i, spot)| {
                let y = tuning.lanes.get(spot.lane).copied().unwrap_or_default();
                Customer::new(CustomerId(i as u32 + 1), spot.lane, Vec2::new(spot.x, y))
            })
            .collect()
    }

    /// Tear the round down and start again at `now`.
    ///
    /// Every pending deferred effect is discarded and the epoch advances, so
    /// callbacks issued under the old round can no longer touch this one.
    pub fn reset(&mut self, now: u64, carry: ScoreCarry) {
        let now = self.advance_clock(now);
        if !self.timers.is_empty() {
            log::debug!("Discarding {} pending effects", self.timers.len());
        }
        let epoch = self.timers.invalidate();

        for customer in self.customers.iter_mut() {
            if customer.cancel() {
                self.events.push(SessionEvent::RequestCleared {
                    customer: customer.id,
                    reason: ClearReason::Cancelled,
                });
            }
        }

        // Debt ledgers lift a carried score above the limit
        let score = match carry {
            ScoreCarry::Reset => 0,
            ScoreCarry::Keep => self.ledger.score(),
        };

        self.phase = SessionPhase::Active;
        self.lanes = LaneModel::new(
            self.tuning.lane_count(),
            self.tuning.start_lane,
            self.tuning.lane_transition_ms,
        );
        self.customers = Self::spawn_customers(&self.tuning);
        self.ammo = self.tuning.initial_ammo;
        self.ledger = ScoreLivesLedger::new(score, self.tuning.initial_lives, self.tuning.score_policy);
        self.sets = SetProgression::new(self.tuning.set_ammo_grant, self.tuning.set_life_grant);
        self.next_spawn_at = now.saturating_add(self.tuning.spawn_cadence_ms);
        self.in_set_break = false;
        self.push_hud_events();

        log::info!(
            "Session reset (epoch {}, carry {:?}, score {})",
            epoch,
            carry,
            self.ledger.score()
        );
        self.check_game_over();
    }

    /// Emit the full HUD state so the presentation can redraw from scratch
    fn push_hud_events(&mut self) {
        let lane = self.lanes.current_lane();
        self.events.push(SessionEvent::ScoreChanged {
            score: self.ledger.score(),
        });
        self.events.push(SessionEvent::LivesChanged {
            lives: self.ledger.lives(),
        });
        self.events.push(SessionEvent::AmmoChanged { ammo: self.ammo });
        self.events.push(SessionEvent::LaneChanged {
            lane,
            y: self.lane_y(lane),
        });
    }

    /// Record `now` as the latest time and return the effective time
    pub(crate) fn advance_clock(&mut self, now: u64) -> u64 {
        self.now = self.now.max(now);
        self.now
    }

    /// Balance sheet this session runs on
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// True once the run has ended; only `reset` leaves this state
    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    /// Generation tag of the current round
    pub fn epoch(&self) -> u32 {
        self.timers.epoch()
    }

    /// Latest time seen (ms)
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn lanes(&self) -> &LaneModel {
        &self.lanes
    }

    /// Lane the vendor stands on
    pub fn current_lane(&self) -> usize {
        self.lanes.current_lane()
    }

    /// All customers, sorted by id
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Look up a customer by id
    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Hotdogs left
    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn score(&self) -> i64 {
        self.ledger.score()
    }

    pub fn lives(&self) -> u32 {
        self.ledger.lives()
    }

    /// Set being played, starting at 1
    pub fn set_number(&self) -> u32 {
        self.sets.set_number()
    }

    /// True during the pause after a set advance
    pub fn in_set_break(&self) -> bool {
        self.in_set_break
    }

    /// Number of deferred effects still pending
    pub fn pending_effects(&self) -> usize {
        self.timers.len()
    }

    /// Screen y of a lane's centerline
    pub fn lane_y(&self, lane: usize) -> f32 {
        self.tuning.lanes.get(lane).copied().unwrap_or_default()
    }

    /// Vendor position on screen
    pub fn player_pos(&self) -> Vec2 {
        Vec2::new(self.tuning.player_x, self.lane_y(self.lanes.current_lane()))
    }

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drain events straight into a presentation
    pub fn dispatch_events(&mut self, presentation: &mut dyn Presentation) {
        for event in self.drain_events() {
            event.dispatch(presentation);
        }
    }

    /// Copy of the HUD-relevant state
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            epoch: self.epoch(),
            phase: self.phase,
            now: self.now,
            lane: self.lanes.current_lane(),
            player_pos: self.player_pos(),
            transitioning: self.lanes.is_transitioning(),
            ammo: self.ammo,
            score: self.ledger.score(),
            lives: self.ledger.lives(),
            set_number: self.sets.set_number(),
            deliveries_in_set: self.sets.deliveries_in_set(),
            in_set_break: self.in_set_break,
            customers: self.customers.clone(),
        }
    }
}
