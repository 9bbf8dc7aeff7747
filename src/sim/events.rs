//! Session output: events for the presentation layer
//!
//! The session never calls into rendering or audio directly. It records
//! `SessionEvent`s, which the host drains each frame and either inspects
//! itself or forwards to a `Presentation` implementation.

use serde::{Deserialize, Serialize};

use super::customer::CustomerId;

/// Why a request icon went away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearReason {
    /// Hotdog launched at the customer
    Served,
    /// Customer gave up waiting
    Expired,
    /// Session ended or reset
    Cancelled,
}

/// Everything the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    RequestStarted { customer: CustomerId, lane: usize },
    RequestCleared { customer: CustomerId, reason: ClearReason },
    /// Projectile left the vendor's hand
    HotdogThrown { customer: CustomerId, lane: usize, wanted: bool },
    DeliverySucceeded { customer: CustomerId },
    MisThrow { customer: CustomerId },
    ScoreChanged { score: i64 },
    LivesChanged { lives: u32 },
    AmmoChanged { ammo: u32 },
    LaneChanged { lane: usize, y: f32 },
    SetAdvanced { set_number: u32, ammo_grant: u32 },
    SetBreakEnded,
    /// Crowd pelts the vendor (cosmetic, once per game over)
    Barrage,
    GameOver { final_score: i64 },
}

/// Presentation hooks. Every method defaults to doing nothing, so a host only
/// implements what it renders.
pub trait Presentation {
    fn request_started(&mut self, _customer: CustomerId, _lane: usize) {}
    fn request_cleared(&mut self, _customer: CustomerId, _reason: ClearReason) {}
    fn hotdog_thrown(&mut self, _customer: CustomerId, _lane: usize, _wanted: bool) {}
    fn delivery_succeeded(&mut self, _customer: CustomerId) {}
    fn mis_throw(&mut self, _customer: CustomerId) {}
    fn score_changed(&mut self, _score: i64) {}
    fn lives_changed(&mut self, _lives: u32) {}
    fn ammo_changed(&mut self, _ammo: u32) {}
    fn lane_changed(&mut self, _lane: usize, _y: f32) {}
    fn set_advanced(&mut self, _set_number: u32, _ammo_grant: u32) {}
    fn set_break_ended(&mut self) {}
    fn barrage(&mut self) {}
    fn game_over(&mut self, _final_score: i64) {}
}

/// Presentation that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresentation;

impl Presentation for NullPresentation {}

/// Presentation that writes every event to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPresentation;

impl Presentation for LogPresentation {
    fn request_started(&mut self, customer: CustomerId, lane: usize) {
        log::info!("Customer {} on lane {} wants a hotdog", customer, lane);
    }

    fn request_cleared(&mut self, customer: CustomerId, reason: ClearReason) {
        log::debug!("Request from {} cleared ({:?})", customer, reason);
    }

    fn delivery_succeeded(&mut self, customer: CustomerId) {
        log::info!("Delivered to {}", customer);
    }

    fn mis_throw(&mut self, customer: CustomerId) {
        log::info!("{} didn't want that one", customer);
    }

    fn score_changed(&mut self, score: i64) {
        log::debug!("Score: {}", score);
    }

    fn lives_changed(&mut self, lives: u32) {
        log::debug!("Lives: {}", lives);
    }

    fn set_advanced(&mut self, set_number: u32, ammo_grant: u32) {
        log::info!("Set {} - reloaded {} hotdogs", set_number, ammo_grant);
    }

    fn game_over(&mut self, final_score: i64) {
        log::info!("Game over, final score {}", final_score);
    }
}

impl SessionEvent {
    /// Forward this event to the matching presentation hook
    pub fn dispatch(&self, presentation: &mut dyn Presentation) {
        match *self {
            SessionEvent::RequestStarted { customer, lane } => {
                presentation.request_started(customer, lane)
            }
            SessionEvent::RequestCleared { customer, reason } => {
                presentation.request_cleared(customer, reason)
            }
            SessionEvent::HotdogThrown {
                customer,
                lane,
                wanted,
            } => presentation.hotdog_thrown(customer, lane, wanted),
            SessionEvent::DeliverySucceeded { customer } => {
                presentation.delivery_succeeded(customer)
            }
            SessionEvent::MisThrow { customer } => presentation.mis_throw(customer),
            SessionEvent::ScoreChanged { score } => presentation.score_changed(score),
            SessionEvent::LivesChanged { lives } => presentation.lives_changed(lives),
            SessionEvent::AmmoChanged { ammo } => presentation.ammo_changed(ammo),
            SessionEvent::LaneChanged { lane, y } => presentation.lane_changed(lane, y),
            SessionEvent::SetAdvanced {
                set_number,
                ammo_grant,
            } => presentation.set_advanced(set_number, ammo_grant),
            SessionEvent::SetBreakEnded => presentation.set_break_ended(),
            SessionEvent::Barrage => presentation.barrage(),
            SessionEvent::GameOver { final_score } => presentation.game_over(final_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        scores: Vec<i64>,
        barrages: u32,
    }

    impl Presentation for Recorder {
        fn score_changed(&mut self, score: i64) {
            self.scores.push(score);
        }

        fn barrage(&mut self) {
            self.barrages += 1;
        }
    }

    #[test]
    fn test_dispatch_routes_to_hooks() {
        let mut recorder = Recorder::default();
        let events = [
            SessionEvent::ScoreChanged { score: 3 },
            SessionEvent::AmmoChanged { ammo: 1 },
            SessionEvent::Barrage,
            SessionEvent::ScoreChanged { score: 4 },
        ];
        for event in &events {
            event.dispatch(&mut recorder);
        }
        assert_eq!(recorder.scores, vec![3, 4]);
        assert_eq!(recorder.barrages, 1);

        // Unimplemented hooks are harmless
        SessionEvent::GameOver { final_score: 4 }.dispatch(&mut NullPresentation);
    }

    #[test]
    fn test_events_serialize_tagged() {
        let json = serde_json::to_string(&SessionEvent::RequestCleared {
            customer: CustomerId(2),
            reason: ClearReason::Expired,
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"type":"request_cleared","customer":2,"reason":"expired"}"#
        );
    }
}
