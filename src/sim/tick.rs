//! Session controller: input handling and time advancement
//!
//! Synchronous effects (ammo, icon removal, lane change) happen the moment
//! input arrives. Travel-time effects (fulfilment, score, penalties) are
//! queued on the session's timer queue and applied when `advance` reaches them.

use super::autopilot;
use super::customer::CustomerId;
use super::events::{ClearReason, SessionEvent};
use super::lane::LaneDirection;
use super::scheduler;
use super::state::{Session, SessionPhase};
use super::throw::{self, ThrowOutcome};
use super::timers::DeferredEffect;

/// Normalized player input for one tick (already debounced to "just pressed")
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_up: bool,
    pub move_down: bool,
    pub throw: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Discrete input command from the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveUp,
    MoveDown,
    Throw,
}

impl TickInput {
    pub fn with_command(mut self, command: Command) -> Self {
        match command {
            Command::MoveUp => self.move_up = true,
            Command::MoveDown => self.move_down = true,
            Command::Throw => self.throw = true,
        }
        self
    }
}

/// Advance the session to `now` and apply this tick's input
pub fn tick(session: &mut Session, input: &TickInput, now: u64) {
    let now = session.advance_clock(now);

    // Time first, so input sees post-expiry state and finished lane tweens
    session.advance(now);
    if session.is_game_over() {
        return;
    }

    let mut input = input.clone();
    if input.idle_mode {
        let plan = autopilot::plan(session);
        input.move_up |= plan.move_up;
        input.move_down |= plan.move_down;
        input.throw |= plan.throw;
    }

    if input.move_up {
        session.move_lane(LaneDirection::Up, now);
    }
    if input.move_down {
        session.move_lane(LaneDirection::Down, now);
    }
    if input.throw {
        session.throw(now);
    }
}

impl Session {
    /// Advance time: finish lane tweens, apply due deferred effects, expire
    /// overdue requests, then try to spawn a new one at the fixed cadence.
    pub fn advance(&mut self, now: u64) {
        let now = self.advance_clock(now);
        if self.is_game_over() {
            return;
        }

        self.lanes.update(now);

        while let Some((at, effect)) = self.timers.pop_due(now) {
            self.apply_effect(at, effect);
            if self.is_game_over() {
                return;
            }
        }

        // Expiry before spawn: the scheduler must see lanes freed this tick
        let expired: Vec<CustomerId> = self
            .customers
            .iter_mut()
            .filter_map(|c| c.check_expiry(now).then_some(c.id))
            .collect();
        for &id in &expired {
            self.events.push(SessionEvent::RequestCleared {
                customer: id,
                reason: ClearReason::Expired,
            });
        }
        for id in expired {
            self.apply_expiry_penalty(id);
            if self.is_game_over() {
                return;
            }
        }

        if !self.in_set_break && now >= self.next_spawn_at {
            self.spawn_request(now);
            self.next_spawn_at = self.next_spawn_at.saturating_add(self.tuning.spawn_cadence_ms);
            if self.next_spawn_at <= now {
                // Long frame gap: don't burst-spawn to catch up
                self.next_spawn_at = now.saturating_add(self.tuning.spawn_cadence_ms);
            }
        }
    }

    fn spawn_request(&mut self, now: u64) -> Option<CustomerId> {
        let id = scheduler::try_spawn(
            now,
            &mut self.customers,
            self.tuning.request_cap,
            self.tuning.request_duration_ms,
            &mut self.rng,
        )?;
        let lane = self.customer(id).map(|c| c.lane).unwrap_or_default();
        log::debug!("Request started by {} on lane {} at {}ms", id, lane, now);
        self.events.push(SessionEvent::RequestStarted { customer: id, lane });
        Some(id)
    }

    /// Move the vendor one lane. Ignored after game over, at the edge, or
    /// while the previous move is still tweening.
    pub fn move_lane(&mut self, dir: LaneDirection, now: u64) -> bool {
        let now = self.advance_clock(now);
        if self.is_game_over() || !self.lanes.step(dir, now) {
            return false;
        }
        let lane = self.lanes.current_lane();
        self.events.push(SessionEvent::LaneChanged {
            lane,
            y: self.lane_y(lane),
        });
        true
    }

    /// Host reports the lane tween finished. Confirmations from an older
    /// epoch are ignored.
    pub fn confirm_lane_transition(&mut self, epoch: u32) -> bool {
        if epoch != self.epoch() {
            log::debug!("Ignoring lane confirmation from stale epoch {}", epoch);
            return false;
        }
        self.lanes.finish_transition()
    }

    /// Throw a hotdog along the current lane.
    ///
    /// Returns None if the input was rejected (game over, vendor between
    /// lanes). Otherwise returns the resolved outcome.
    pub fn throw(&mut self, now: u64) -> Option<ThrowOutcome> {
        let now = self.advance_clock(now);
        if self.is_game_over() {
            return None;
        }
        self.lanes.update(now);
        if self.lanes.is_transitioning() {
            return None;
        }

        let lane = self.lanes.current_lane();
        let outcome = throw::resolve(&mut self.ammo, self.tuning.player_x, lane, &self.customers);

        match outcome {
            ThrowOutcome::Deliver(id) => {
                if let Some(customer) = self.customers.iter_mut().find(|c| c.id == id) {
                    customer.serve();
                }
                self.events.push(SessionEvent::AmmoChanged { ammo: self.ammo });
                self.events.push(SessionEvent::HotdogThrown {
                    customer: id,
                    lane,
                    wanted: true,
                });
                self.events.push(SessionEvent::RequestCleared {
                    customer: id,
                    reason: ClearReason::Served,
                });
                self.timers.schedule(
                    now.saturating_add(self.tuning.hotdog_travel_ms),
                    DeferredEffect::DeliveryLanded { customer: id },
                );
            }
            ThrowOutcome::MisThrow(id) => {
                self.events.push(SessionEvent::AmmoChanged { ammo: self.ammo });
                self.events.push(SessionEvent::HotdogThrown {
                    customer: id,
                    lane,
                    wanted: false,
                });
                self.timers.schedule(
                    now.saturating_add(self.tuning.mis_throw_travel_ms)
                        .saturating_add(self.tuning.catch_delay_ms),
                    DeferredEffect::MisThrowReturned { customer: id },
                );
            }
            ThrowOutcome::NoTarget | ThrowOutcome::OutOfAmmo => {
                log::trace!("Throw on lane {} did nothing ({:?})", lane, outcome);
            }
        }
        Some(outcome)
    }

    /// External "request expired" signal: run the expiry penalty for a
    /// pending request right away, regardless of its deadline.
    pub fn expire_request(&mut self, id: CustomerId, now: u64) -> bool {
        self.advance_clock(now);
        if self.is_game_over() {
            return false;
        }
        let Some(customer) = self.customers.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        if !customer.is_requesting() {
            return false;
        }
        customer.cancel();
        self.events.push(SessionEvent::RequestCleared {
            customer: id,
            reason: ClearReason::Expired,
        });
        self.apply_expiry_penalty(id);
        true
    }

    fn apply_expiry_penalty(&mut self, id: CustomerId) {
        log::debug!("Request from {} expired", id);
        let lives = self.ledger.add_lives(-1);
        let score = self.ledger.add_score(-1);
        self.events.push(SessionEvent::LivesChanged { lives });
        self.events.push(SessionEvent::ScoreChanged { score });
        self.check_game_over();
    }

    fn apply_effect(&mut self, at: u64, effect: DeferredEffect) {
        match effect {
            DeferredEffect::DeliveryLanded { customer } => {
                if let Some(c) = self.customers.iter_mut().find(|c| c.id == customer) {
                    c.fulfill();
                }
                self.events.push(SessionEvent::DeliverySucceeded { customer });
                self.timers.schedule(
                    at.saturating_add(self.tuning.money_travel_ms),
                    DeferredEffect::MoneyCollected { customer },
                );
                if let Some(advance) = self.sets.on_delivery(self.ammo) {
                    self.ammo = self.ammo.saturating_add(advance.ammo_grant);
                    let lives = self.ledger.grant_lives(advance.life_grant);
                    log::info!(
                        "Set {} reached: +{} hotdogs, +{} lives",
                        advance.set_number,
                        advance.ammo_grant,
                        advance.life_grant
                    );
                    self.events.push(SessionEvent::SetAdvanced {
                        set_number: advance.set_number,
                        ammo_grant: advance.ammo_grant,
                    });
                    self.events.push(SessionEvent::AmmoChanged { ammo: self.ammo });
                    self.events.push(SessionEvent::LivesChanged { lives });
                    if self.tuning.set_break_ms > 0 {
                        self.in_set_break = true;
                        self.timers.schedule(
                            at.saturating_add(self.tuning.set_break_ms),
                            DeferredEffect::SetBreakOver,
                        );
                    }
                }
            }
            DeferredEffect::MoneyCollected { customer } => {
                let score = self.ledger.add_score(1);
                log::trace!("Collected payment from {}", customer);
                self.events.push(SessionEvent::ScoreChanged { score });
                self.check_game_over();
            }
            DeferredEffect::MisThrowReturned { customer } => {
                let score = self.ledger.add_score(-1);
                self.events.push(SessionEvent::MisThrow { customer });
                self.events.push(SessionEvent::ScoreChanged { score });
                self.check_game_over();
            }
            DeferredEffect::SetBreakOver => {
                self.in_set_break = false;
                self.next_spawn_at = at.saturating_add(self.tuning.spawn_cadence_ms);
                self.events.push(SessionEvent::SetBreakEnded);
            }
        }
    }

    pub(super) fn check_game_over(&mut self) {
        if self.phase == SessionPhase::Active && self.ledger.is_game_over() {
            self.enter_game_over();
        }
    }

    fn enter_game_over(&mut self) {
        self.phase = SessionPhase::GameOver;
        self.timers.clear();
        self.in_set_break = false;
        for customer in self.customers.iter_mut() {
            if customer.cancel() {
                self.events.push(SessionEvent::RequestCleared {
                    customer: customer.id,
                    reason: ClearReason::Cancelled,
                });
            }
        }
        let final_score = self.ledger.score();
        log::info!(
            "Game over at {}ms: score {}, set {}",
            self.now,
            final_score,
            self.sets.set_number()
        );
        self.events.push(SessionEvent::Barrage);
        self.events.push(SessionEvent::GameOver { final_score });
    }
}
