//! Lane model: which row the vendor stands on
//!
//! Lanes are indexed top (0) to bottom (lane_count - 1). The vendor moves one
//! lane at a time, and only once the previous move has finished its tween.

use serde::{Deserialize, Serialize};

/// Direction of a lane change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneDirection {
    Up,
    Down,
}

/// The vendor's lane position and any in-progress transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneModel {
    lane_count: usize,
    current: usize,
    /// Time the current transition finishes on its own (None = aligned)
    transition_ends_at: Option<u64>,
    transition_ms: u64,
}

impl LaneModel {
    pub fn new(lane_count: usize, start_lane: usize, transition_ms: u64) -> Self {
        debug_assert!(lane_count >= 1);
        Self {
            lane_count,
            current: start_lane.min(lane_count.saturating_sub(1)),
            transition_ends_at: None,
            transition_ms,
        }
    }

    /// Lane the vendor stands on (or is moving to)
    pub fn current_lane(&self) -> usize {
        self.current
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// True while a move is still tweening
    pub fn is_transitioning(&self) -> bool {
        self.transition_ends_at.is_some()
    }

    /// Move toward lane 0
    pub fn move_up(&mut self, now: u64) -> bool {
        self.step(LaneDirection::Up, now)
    }

    /// Move toward the last lane
    pub fn move_down(&mut self, now: u64) -> bool {
        self.step(LaneDirection::Down, now)
    }

    /// Move one lane in `dir`. Returns false (and changes nothing) at the edge
    /// or while a transition is still running.
    pub fn step(&mut self, dir: LaneDirection, now: u64) -> bool {
        self.update(now);
        if self.is_transitioning() {
            return false;
        }
        let target = match dir {
            LaneDirection::Up => match self.current.checked_sub(1) {
                Some(lane) => lane,
                None => return false,
            },
            LaneDirection::Down => {
                if self.current + 1 >= self.lane_count {
                    return false;
                }
                self.current + 1
            }
        };
        self.current = target;
        self.transition_ends_at = Some(now.saturating_add(self.transition_ms));
        true
    }

    /// Clear the transition once its duration has elapsed.
    /// Returns true if this call finished it.
    pub fn update(&mut self, now: u64) -> bool {
        match self.transition_ends_at {
            Some(ends_at) if now >= ends_at => {
                self.transition_ends_at = None;
                true
            }
            _ => false,
        }
    }

    /// Host confirms the visual tween completed
    pub fn finish_transition(&mut self) -> bool {
        self.transition_ends_at.take().is_some()
    }
}
