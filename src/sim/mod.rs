//! Deterministic session engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes from the caller (milliseconds), never from a clock
//! - Seeded RNG only
//! - Stable iteration order (by customer ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod customer;
pub mod events;
pub mod lane;
pub mod ledger;
pub mod scheduler;
pub mod state;
pub mod throw;
pub mod tick;
pub mod timers;

pub use customer::{Customer, CustomerId, RequestState};
pub use events::{ClearReason, LogPresentation, NullPresentation, Presentation, SessionEvent};
pub use lane::{LaneDirection, LaneModel};
pub use ledger::{ScoreLivesLedger, SetAdvance, SetProgression};
pub use scheduler::{active_requests, try_spawn};
pub use state::{ScoreCarry, Session, SessionPhase, SessionSnapshot};
pub use throw::{ThrowOutcome, resolve as resolve_throw};
pub use tick::{Command, TickInput, tick};
pub use timers::{DeferredEffect, TimerQueue};
