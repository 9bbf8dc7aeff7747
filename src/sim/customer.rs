//! Customers and their request lifecycle
//!
//! A request goes Idle -> Requested -> Served -> Idle when the vendor delivers,
//! or Idle -> Requested -> Idle when the deadline passes first.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable customer identity (unique within a session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub u32);

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Request state of a single customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestState {
    /// Nothing wanted
    #[default]
    Idle,
    /// Request icon showing, waiting for a hotdog
    Requested { started_at: u64, deadline: u64 },
    /// Hotdog is on its way; icon removed and deadline cancelled
    Served,
}

/// A customer standing on a lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub lane: usize,
    pub pos: Vec2,
    pub request: RequestState,
}

impl Customer {
    pub fn new(id: CustomerId, lane: usize, pos: Vec2) -> Self {
        Self {
            id,
            lane,
            pos,
            request: RequestState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.request == RequestState::Idle
    }

    pub fn is_requesting(&self) -> bool {
        matches!(self.request, RequestState::Requested { .. })
    }

    /// Requested or Served: the customer still holds their lane's request slot
    pub fn has_active_request(&self) -> bool {
        !self.is_idle()
    }

    pub fn deadline(&self) -> Option<u64> {
        match self.request {
            RequestState::Requested { deadline, .. } => Some(deadline),
            _ => None,
        }
    }

    /// Raise a request lasting `duration` ms. No-op unless idle.
    pub fn start(&mut self, now: u64, duration: u64) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.request = RequestState::Requested {
            started_at: now,
            deadline: now.saturating_add(duration),
        };
        true
    }

    /// A hotdog was launched at this customer: drop the icon and the deadline
    pub fn serve(&mut self) -> bool {
        if !self.is_requesting() {
            return false;
        }
        self.request = RequestState::Served;
        true
    }

    /// The hotdog arrived (or was handed over directly)
    pub fn fulfill(&mut self) -> bool {
        match self.request {
            RequestState::Requested { .. } | RequestState::Served => {
                self.request = RequestState::Idle;
                true
            }
            RequestState::Idle => false,
        }
    }

    /// Returns true exactly once, when a pending request runs out of time
    pub fn check_expiry(&mut self, now: u64) -> bool {
        match self.request {
            RequestState::Requested { deadline, .. } if now >= deadline => {
                self.request = RequestState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Drop any request without consequences. Returns true if one was active.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.has_active_request();
        self.request = RequestState::Idle;
        was_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> Customer {
        Customer::new(CustomerId(1), 0, Vec2::new(1400.0, 410.0))
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut c = customer();
        assert!(c.start(0, 7000));
        assert!(!c.start(500, 7000));
        assert_eq!(c.deadline(), Some(7000));
    }

    #[test]
    fn test_deadline_saturates() {
        let mut c = customer();
        assert!(c.start(10, u64::MAX));
        assert_eq!(c.deadline(), Some(u64::MAX));
    }

    #[test]
    fn test_expires_exactly_once() {
        let mut c = customer();
        c.start(0, 7000);
        assert!(!c.check_expiry(6999));
        assert!(c.check_expiry(7000));
        assert!(c.is_idle());
        assert!(!c.check_expiry(8000));
    }

    #[test]
    fn test_served_request_never_expires() {
        let mut c = customer();
        c.start(0, 7000);
        assert!(c.serve());
        assert!(!c.check_expiry(100_000));
        assert!(c.has_active_request());
        assert!(!c.is_requesting());
        assert!(c.fulfill());
        assert!(c.is_idle());
    }

    #[test]
    fn test_fulfill_requires_request() {
        let mut c = customer();
        assert!(!c.fulfill());
        assert!(!c.serve());
        c.start(0, 100);
        assert!(c.fulfill());
        assert!(!c.check_expiry(200));
    }

    #[test]
    fn test_cancel() {
        let mut c = customer();
        assert!(!c.cancel());
        c.start(0, 100);
        assert!(c.cancel());
        assert!(c.is_idle());
    }
}
