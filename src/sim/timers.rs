//! Deferred effects with generation tags
//!
//! Everything that happens "later" (hotdog landing, money collected, set
//! banner closing) is queued here. Each entry records the epoch it was
//! scheduled under; bumping the epoch on reset makes older entries inert.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::customer::CustomerId;

/// Something scheduled to happen at a later time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredEffect {
    /// Hotdog reaches the requesting customer
    DeliveryLanded { customer: CustomerId },
    /// Payment reaches the vendor
    MoneyCollected { customer: CustomerId },
    /// Unwanted hotdog thrown back at the vendor
    MisThrowReturned { customer: CustomerId },
    /// Set banner window is over
    SetBreakOver,
}

/// Queue key: fire time, then insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct TimerKey {
    fire_at: u64,
    seq: u64,
}

#[derive(Debug, Clone)]
struct Scheduled {
    epoch: u32,
    effect: DeferredEffect,
}

/// Ordered queue of deferred effects
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    epoch: u32,
    next_seq: u64,
    entries: BTreeMap<TimerKey, Scheduled>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Pending effects, stale ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queue `effect` to fire at `fire_at` under the current epoch
    pub fn schedule(&mut self, fire_at: u64, effect: DeferredEffect) {
        let key = TimerKey {
            fire_at,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.entries.insert(
            key,
            Scheduled {
                epoch: self.epoch,
                effect,
            },
        );
    }

    /// Drop all pending effects without changing the epoch
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Start a new generation: everything scheduled so far is discarded.
    /// Returns the new epoch.
    pub fn invalidate(&mut self) -> u32 {
        self.epoch = self.epoch.wrapping_add(1);
        self.entries.clear();
        self.epoch
    }

    /// Remove and return the earliest effect due at or before `now`.
    /// Entries from an older epoch are skipped.
    pub fn pop_due(&mut self, now: u64) -> Option<(u64, DeferredEffect)> {
        loop {
            let (&key, _) = self.entries.first_key_value()?;
            if key.fire_at > now {
                return None;
            }
            let scheduled = self.entries.remove(&key)?;
            if scheduled.epoch == self.epoch {
                return Some((key.fire_at, scheduled.effect));
            }
            log::trace!("Dropping stale timer from epoch {}", scheduled.epoch);
        }
    }
}
