//! Idle/demo mode - the vendor plays itself
//!
//! Serves the most urgent request first: walk to its lane, then throw.
//! Never throws at a lane without a pending request.

use super::lane::LaneDirection;
use super::state::Session;
use super::tick::TickInput;

/// Decide this tick's input for the autopilot
pub fn plan(session: &Session) -> TickInput {
    let mut input = TickInput::default();
    if session.is_game_over() || session.lanes().is_transitioning() {
        return input;
    }

    // Most urgent request (earliest deadline, then lowest id)
    let target = session
        .customers()
        .iter()
        .filter_map(|c| c.deadline().map(|deadline| (deadline, c.id, c.lane)))
        .min();

    let Some((_, _, lane)) = target else {
        return input;
    };

    let current = session.current_lane();
    match direction_to(current, lane) {
        Some(LaneDirection::Up) => input.move_up = true,
        Some(LaneDirection::Down) => input.move_down = true,
        None => input.throw = session.ammo() > 0,
    }
    input
}

fn direction_to(current: usize, target: usize) -> Option<LaneDirection> {
    match target.cmp(&current) {
        std::cmp::Ordering::Less => Some(LaneDirection::Up),
        std::cmp::Ordering::Greater => Some(LaneDirection::Down),
        std::cmp::Ordering::Equal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::customer::CustomerId;
    use crate::sim::tick::tick;
    use crate::tuning::Tuning;

    #[test]
    fn test_walks_toward_most_urgent() {
        let mut session = Session::new(Tuning::default(), 1, 0);
        // Lane 3 expires first
        session.customers[3].start(0, 3000);
        session.customers[1].start(0, 7000);

        let input = plan(&session);
        assert!(input.move_down);
        assert!(!input.throw);
    }

    #[test]
    fn test_throws_when_aligned() {
        let mut session = Session::new(Tuning::default(), 1, 0);
        session.customers[0].start(0, 7000);
        let input = plan(&session);
        assert!(input.throw);
        assert!(!input.move_up && !input.move_down);
    }

    #[test]
    fn test_idle_when_nothing_requested() {
        let session = Session::new(Tuning::default(), 1, 0);
        let input = plan(&session);
        assert!(!input.throw && !input.move_up && !input.move_down);
    }

    #[test]
    fn test_autopilot_delivers() {
        let tuning = Tuning {
            spawn_cadence_ms: 1_000_000_000,
            ..Tuning::default()
        };
        let mut session = Session::new(tuning, 5, 0);
        session.customers[2].start(0, 7000);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for step in 1..=80u64 {
            tick(&mut session, &input, step * 50);
        }
        assert_eq!(session.current_lane(), 2);
        assert_eq!(session.ammo(), 9);
        assert_eq!(session.lives(), 5);
        assert!(session.customer(CustomerId(3)).unwrap().is_idle());
    }
}
