//! Throw resolution
//!
//! A throw travels along the vendor's lane. It goes to the nearest customer
//! who is asking for one; failing that, to the nearest customer at all.

use serde::{Deserialize, Serialize};

use super::customer::{Customer, CustomerId};

/// What a throw did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThrowOutcome {
    /// Hotdog launched at a requesting customer
    Deliver(CustomerId),
    /// Hotdog launched at a customer who didn't ask for it
    MisThrow(CustomerId),
    /// Lane is empty; nothing launched, ammo kept
    NoTarget,
    /// Nothing to throw
    OutOfAmmo,
}

impl ThrowOutcome {
    /// True if a projectile actually left the vendor's hand
    pub fn launched(&self) -> bool {
        matches!(self, ThrowOutcome::Deliver(_) | ThrowOutcome::MisThrow(_))
    }
}

/// Nearest customer to `player_x`; equal distances go to the lowest id
fn nearest<'a>(player_x: f32, candidates: impl Iterator<Item = &'a Customer>) -> Option<CustomerId> {
    candidates
        .min_by(|a, b| {
            let da = (a.pos.x - player_x).abs();
            let db = (b.pos.x - player_x).abs();
            da.total_cmp(&db).then(a.id.cmp(&b.id))
        })
        .map(|c| c.id)
}

/// Resolve a throw from `lane` at horizontal position `player_x`.
///
/// Consumes one unit of `ammo` for `Deliver` and `MisThrow`. The caller is
/// responsible for checking the vendor is aligned to the lane.
pub fn resolve(ammo: &mut u32, player_x: f32, lane: usize, customers: &[Customer]) -> ThrowOutcome {
    if *ammo == 0 {
        return ThrowOutcome::OutOfAmmo;
    }

    let in_lane = || customers.iter().filter(move |c| c.lane == lane);

    let outcome = if let Some(id) = nearest(player_x, in_lane().filter(|c| c.is_requesting())) {
        ThrowOutcome::Deliver(id)
    } else if let Some(id) = nearest(player_x, in_lane()) {
        ThrowOutcome::MisThrow(id)
    } else {
        ThrowOutcome::NoTarget
    };

    if outcome.launched() {
        *ammo -= 1;
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn at(id: u32, lane: usize, x: f32) -> Customer {
        Customer::new(CustomerId(id), lane, Vec2::new(x, 0.0))
    }

    #[test]
    fn test_delivers_to_nearest_requesting() {
        let mut customers = vec![at(1, 0, 1400.0), at(2, 0, 900.0), at(3, 0, 1200.0)];
        customers[0].start(0, 7000);
        customers[2].start(0, 7000);
        let mut ammo = 5;

        // Customer 2 is closest but isn't asking
        let outcome = resolve(&mut ammo, 300.0, 0, &customers);
        assert_eq!(outcome, ThrowOutcome::Deliver(CustomerId(3)));
        assert_eq!(ammo, 4);
    }

    #[test]
    fn test_mis_throw_to_nearest_when_nobody_asks() {
        let customers = vec![at(1, 1, 1400.0), at(2, 1, 900.0), at(3, 0, 500.0)];
        let mut ammo = 2;
        let outcome = resolve(&mut ammo, 300.0, 1, &customers);
        assert_eq!(outcome, ThrowOutcome::MisThrow(CustomerId(2)));
        assert_eq!(ammo, 1);
    }

    #[test]
    fn test_empty_lane_keeps_ammo() {
        let customers = vec![at(1, 0, 1400.0)];
        let mut ammo = 3;
        assert_eq!(resolve(&mut ammo, 300.0, 2, &customers), ThrowOutcome::NoTarget);
        assert_eq!(ammo, 3);
    }

    #[test]
    fn test_out_of_ammo_changes_nothing() {
        let mut customers = vec![at(1, 0, 1400.0)];
        customers[0].start(0, 7000);
        let mut ammo = 0;
        assert_eq!(resolve(&mut ammo, 300.0, 0, &customers), ThrowOutcome::OutOfAmmo);
        assert_eq!(ammo, 0);
        assert!(customers[0].is_requesting());
    }

    #[test]
    fn test_tie_goes_to_lowest_id() {
        // Equidistant on either side of the vendor
        let mut customers = vec![at(7, 0, 500.0), at(4, 0, 100.0)];
        customers[0].start(0, 7000);
        customers[1].start(0, 7000);
        let mut ammo = 1;
        assert_eq!(
            resolve(&mut ammo, 300.0, 0, &customers),
            ThrowOutcome::Deliver(CustomerId(4))
        );
    }
}
