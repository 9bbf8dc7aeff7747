//! Request scheduler: picks who asks for a hotdog next
//!
//! At most one active request per lane, and at most `cap` in total.

use rand::Rng;

use super::customer::{Customer, CustomerId};

/// Number of customers holding a request slot (Requested or Served)
pub fn active_requests(customers: &[Customer]) -> usize {
    customers.iter().filter(|c| c.has_active_request()).count()
}

/// Try to start one new request.
///
/// Candidates are idle customers whose lane has no active request. One is
/// picked uniformly with `rng`. Returns the chosen customer, or None if the
/// cap is reached or nobody qualifies.
pub fn try_spawn<R: Rng>(
    now: u64,
    customers: &mut [Customer],
    cap: usize,
    duration: u64,
    rng: &mut R,
) -> Option<CustomerId> {
    if active_requests(customers) >= cap {
        return None;
    }

    let busy_lanes: Vec<usize> = customers
        .iter()
        .filter(|c| c.has_active_request())
        .map(|c| c.lane)
        .collect();

    let candidates: Vec<usize> = customers
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_idle() && !busy_lanes.contains(&c.lane))
        .map(|(i, _)| i)
        .collect();

    if candidates.is_empty() {
        return None;
    }

    let pick = candidates[rng.random_range(0..candidates.len())];
    let customer = &mut customers[pick];
    customer.start(now, duration);
    Some(customer.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn one_per_lane(lanes: usize) -> Vec<Customer> {
        (0..lanes)
            .map(|lane| Customer::new(CustomerId(lane as u32 + 1), lane, Vec2::new(1400.0, 0.0)))
            .collect()
    }

    fn assert_lane_exclusive(customers: &[Customer]) {
        let mut seen = Vec::new();
        for c in customers.iter().filter(|c| c.has_active_request()) {
            assert!(!seen.contains(&c.lane), "two requests on lane {}", c.lane);
            seen.push(c.lane);
        }
    }

    #[test]
    fn test_spawns_up_to_cap_on_distinct_lanes() {
        let mut customers = one_per_lane(4);
        let mut rng = Pcg32::seed_from_u64(7);

        let mut picked = Vec::new();
        for now in [0, 100, 200] {
            let id = try_spawn(now, &mut customers, 3, 7000, &mut rng).unwrap();
            assert!(!picked.contains(&id));
            picked.push(id);
        }
        assert_eq!(active_requests(&customers), 3);
        assert_lane_exclusive(&customers);

        // Cap reached
        assert_eq!(try_spawn(300, &mut customers, 3, 7000, &mut rng), None);
        assert_eq!(active_requests(&customers), 3);
    }

    #[test]
    fn test_busy_lane_blocks_neighbours() {
        // Two customers sharing lane 0, one on lane 1
        let mut customers = vec![
            Customer::new(CustomerId(1), 0, Vec2::ZERO),
            Customer::new(CustomerId(2), 0, Vec2::ZERO),
            Customer::new(CustomerId(3), 1, Vec2::ZERO),
        ];
        customers[0].start(0, 7000);
        let mut rng = Pcg32::seed_from_u64(1);

        assert_eq!(
            try_spawn(10, &mut customers, 3, 7000, &mut rng),
            Some(CustomerId(3))
        );
        assert_eq!(try_spawn(20, &mut customers, 3, 7000, &mut rng), None);
        assert!(customers[1].is_idle());
    }

    #[test]
    fn test_served_customer_still_holds_lane() {
        let mut customers = one_per_lane(2);
        customers[0].start(0, 7000);
        customers[0].serve();
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(
            try_spawn(10, &mut customers, 3, 7000, &mut rng),
            Some(CustomerId(2))
        );
    }

    proptest! {
        #[test]
        fn prop_cap_and_lane_exclusion_hold(
            seed in any::<u64>(),
            cap in 1usize..5,
            layout in proptest::collection::vec(0usize..4, 1..10),
            steps in proptest::collection::vec(0u8..3, 1..80),
        ) {
            let mut customers: Vec<Customer> = layout
                .iter()
                .enumerate()
                .map(|(i, &lane)| Customer::new(CustomerId(i as u32), lane, Vec2::ZERO))
                .collect();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut now = 0;

            for step in steps {
                now += 250;
                match step {
                    0 => {
                        try_spawn(now, &mut customers, cap, 1000, &mut rng);
                    }
                    1 => {
                        for c in customers.iter_mut() {
                            c.check_expiry(now);
                        }
                    }
                    _ => {
                        if let Some(c) = customers.iter_mut().find(|c| c.is_requesting()) {
                            c.fulfill();
                        }
                    }
                }
                prop_assert!(active_requests(&customers) <= cap);
                let mut lanes: Vec<usize> = customers
                    .iter()
                    .filter(|c| c.has_active_request())
                    .map(|c| c.lane)
                    .collect();
                let total = lanes.len();
                lanes.sort_unstable();
                lanes.dedup();
                prop_assert_eq!(lanes.len(), total);
            }
        }
    }
}
