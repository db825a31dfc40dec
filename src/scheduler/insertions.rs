//! Greedy multi-pass insertion heuristic.
//!
//! # Algorithm
//!
//! 1. Open an empty duty with the next sequential id.
//! 2. Scan the pending trips once, in instance order (time-sorted). Commit
//!    every trip the duty accepts; keep the rest pending.
//! 3. Close the duty and repeat until nothing is pending.
//!
//! An empty duty accepts any trip, so every pass covers at least the
//! first pending trip: the number of passes (and duties) never exceeds
//! the number of trips. There is no backtracking and no exchange between
//! duties; the duty count is an upper bound, not a proven minimum.
//!
//! # Complexity
//! O(d * n) feasibility checks, where n = trips and d = duties opened.

use tracing::{debug, info, trace};

use crate::instance::Instance;
use crate::models::{Duty, Regulations, Solution, Trip};

/// Trip coverage work-list.
///
/// Tracks, per trip position, which duty covers it, plus the positions
/// still waiting for a duty in their original scan order.
#[derive(Debug, Clone)]
pub struct Coverage {
    duty_of: Vec<Option<usize>>,
    pending: Vec<usize>,
}

impl Coverage {
    /// Creates a work-list with every trip pending.
    pub fn new(trip_count: usize) -> Self {
        Self {
            duty_of: vec![None; trip_count],
            pending: (0..trip_count).collect(),
        }
    }

    /// Positions of uncovered trips, in scan order.
    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    /// Whether the trip at `position` has been assigned.
    pub fn is_covered(&self, position: usize) -> bool {
        self.duty_of(position).is_some()
    }

    /// Duty covering the trip at `position`.
    pub fn duty_of(&self, position: usize) -> Option<usize> {
        self.duty_of.get(position).copied().flatten()
    }

    /// Number of covered trips.
    pub fn covered_count(&self) -> usize {
        self.duty_of.len() - self.pending.len()
    }

    /// Whether every trip is covered.
    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    /// Runs one pass: offers every pending trip to `duty` in order and
    /// records the ones it commits. Returns how many were committed.
    pub fn fill(&mut self, duty: &mut Duty, trips: &[Trip]) -> usize {
        let mut still_pending = Vec::with_capacity(self.pending.len());
        let mut committed = 0;

        for &position in &self.pending {
            let trip = &trips[position];
            match duty.rejection(trip) {
                None => {
                    duty.commit(trip);
                    self.duty_of[position] = Some(duty.id());
                    committed += 1;
                }
                Some(reason) => {
                    trace!(duty = duty.id(), trip = %trip.label, %reason, "trip rejected");
                    still_pending.push(position);
                }
            }
        }

        self.pending = still_pending;
        committed
    }
}

/// Greedy duty construction by repeated insertion passes.
///
/// # Example
///
/// ```
/// use u_crew::models::{Regulations, Trip};
/// use u_crew::scheduler::Insertions;
///
/// let trips = vec![
///     Trip::new(0, "X", "Y", 0, 60),
///     Trip::new(1, "Y", "Z", 60, 60),
///     Trip::new(2, "Q", "X", 90, 30),
/// ];
/// let rules = Regulations::new(480, 180, 30, 600);
///
/// let solution = Insertions::new().solve(&trips, &rules);
/// assert_eq!(solution.duty_count(), 2);
/// assert_eq!(solution.duty_of(1), Some(0));
/// assert_eq!(solution.duty_of(2), Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Insertions;

impl Insertions {
    /// Creates the heuristic.
    pub fn new() -> Self {
        Self
    }

    /// Builds duties covering `trips`.
    ///
    /// `trips` must be sorted by `(start_time, start_loc)` with
    /// `trips[i].id == i` and a shared `min_duration`, as produced by
    /// [`Instance`]. The heuristic does not sort.
    pub fn solve(&self, trips: &[Trip], regulations: &Regulations) -> Solution {
        let mut coverage = Coverage::new(trips.len());
        let mut duties: Vec<Duty> = Vec::new();

        while !coverage.is_complete() {
            let mut duty = Duty::new(duties.len(), *regulations);
            let committed = coverage.fill(&mut duty, trips);

            debug!(
                duty = duty.id(),
                committed,
                pending = coverage.pending().len(),
                driving = duty.driving_time(),
                shift = duty.shift_duration(),
                "duty closed"
            );

            if committed == 0 {
                // Unreachable: an empty duty accepts the first pending trip.
                break;
            }
            duties.push(duty);
        }

        info!(
            trips = trips.len(),
            duties = duties.len(),
            "insertion heuristic finished"
        );
        Solution::new(trips.to_vec(), duties)
    }

    /// Builds duties for a prepared instance.
    pub fn solve_instance(&self, instance: &Instance) -> Solution {
        self.solve(&instance.trips, &instance.regulations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{generate, GeneratorConfig};
    use crate::models::min_trip_duration;
    use crate::validation::audit;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn with_shared_min(mut trips: Vec<Trip>) -> Vec<Trip> {
        let min = min_trip_duration(&trips);
        for t in &mut trips {
            t.min_duration = min;
        }
        trips
    }

    #[test]
    fn test_back_to_back_single_duty() {
        let trips = with_shared_min(vec![
            Trip::new(0, "X", "Y", 0, 60),
            Trip::new(1, "Y", "Z", 60, 60),
        ]);
        let rules = Regulations::new(480, 180, 30, 600);

        let solution = Insertions::new().solve(&trips, &rules);
        assert_eq!(solution.duty_count(), 1);
        let duty = &solution.duties[0];
        assert_eq!(duty.id(), 0);
        assert_eq!(duty.trip_count(), 2);
        assert_eq!(duty.driving_time(), 120);
        assert_eq!(duty.breaks(), 0);
    }

    #[test]
    fn test_depot_mismatch_opens_new_duty() {
        let trips = with_shared_min(vec![
            Trip::new(0, "X", "Y", 0, 60),
            Trip::new(1, "Z", "X", 90, 60),
        ]);
        let rules = Regulations::new(480, 180, 30, 600);

        let solution = Insertions::new().solve(&trips, &rules);
        assert_eq!(solution.duty_count(), 2);
        assert_eq!(solution.duty_of(0), Some(0));
        assert_eq!(solution.duty_of(1), Some(1));
    }

    #[test]
    fn test_shift_span_splits_duties() {
        let trips = with_shared_min(vec![
            Trip::new(0, "X", "X", 0, 60),
            Trip::new(1, "X", "X", 100, 60),
            Trip::new(2, "X", "X", 400, 60),
        ]);
        let rules = Regulations::new(480, 180, 30, 300);

        let solution = Insertions::new().solve(&trips, &rules);
        assert_eq!(solution.duty_count(), 2);
        assert_eq!(solution.duty_of(1), Some(0));
        assert_eq!(solution.duty_of(2), Some(1));
    }

    #[test]
    fn test_forced_break_respected() {
        let trips = with_shared_min(vec![
            Trip::new(0, "X", "X", 0, 50),
            Trip::new(1, "X", "X", 60, 50), // inside the forced break
            Trip::new(2, "X", "X", 80, 50),
        ]);
        let rules = Regulations::new(480, 60, 30, 600);

        let solution = Insertions::new().solve(&trips, &rules);
        assert_eq!(solution.duty_of(0), Some(0));
        assert_eq!(solution.duty_of(1), Some(1));
        assert_eq!(solution.duty_of(2), Some(0));
    }

    #[test]
    fn test_empty_input() {
        let solution = Insertions::new().solve(&[], &Regulations::default());
        assert_eq!(solution.duty_count(), 0);
        assert!(solution.is_complete());
    }

    #[test]
    fn test_coverage_work_list() {
        let trips = with_shared_min(vec![
            Trip::new(0, "X", "Y", 0, 60),
            Trip::new(1, "Z", "X", 30, 60),
            Trip::new(2, "Y", "Z", 60, 60),
        ]);
        let mut coverage = Coverage::new(trips.len());
        assert_eq!(coverage.pending(), &[0, 1, 2]);

        let mut duty = Duty::new(0, Regulations::default());
        assert_eq!(coverage.fill(&mut duty, &trips), 2);
        assert_eq!(coverage.pending(), &[1]);
        assert_eq!(coverage.covered_count(), 2);
        assert!(coverage.is_covered(2));
        assert_eq!(coverage.duty_of(1), None);
        assert!(!coverage.is_complete());
    }

    #[test]
    fn test_random_instances_feasible_and_complete() {
        let rules = Regulations::new(420, 150, 20, 540);
        for seed in 0..30 {
            let config = GeneratorConfig::default()
                .with_trips(80)
                .with_depots(1 + (seed as usize % 3))
                .with_durations(20, 120)
                .with_regulations(rules);
            let file = generate(&config, &mut StdRng::seed_from_u64(seed)).unwrap();
            let instance = Instance::from_file(&file).unwrap();

            let solution = Insertions::new().solve_instance(&instance);

            assert!(solution.is_complete(), "seed {seed}: uncovered trips");
            assert!(solution.duty_count() <= instance.trip_count());
            assert!(
                audit(&solution, &rules).is_empty(),
                "seed {seed}: {:?}",
                audit(&solution, &rules)
            );

            let total: usize = solution.duties.iter().map(|d| d.trip_count()).sum();
            assert_eq!(total, instance.trip_count());

            for duty in &solution.duties {
                assert!(duty.driving_time() <= rules.total_driving);
                assert!(duty.continuous_driving_time() <= rules.continuous_driving);
                assert!(duty.shift_duration() <= rules.shift_span);
                for pair in duty.trips().windows(2) {
                    assert_eq!(pair[0].end_loc, pair[1].start_loc);
                    assert!(pair[0].start_time < pair[1].start_time);
                }
            }
        }
    }

    #[test]
    fn test_invariants_hold_after_every_commit() {
        let rules = Regulations::new(300, 100, 15, 420);
        let config = GeneratorConfig::default()
            .with_trips(50)
            .with_depots(2)
            .with_durations(15, 60)
            .with_regulations(rules);
        let file = generate(&config, &mut StdRng::seed_from_u64(11)).unwrap();
        let instance = Instance::from_file(&file).unwrap();

        let mut coverage = Coverage::new(instance.trip_count());
        let mut id = 0;
        while !coverage.is_complete() {
            let before = coverage.covered_count();
            let mut filled = Duty::new(id, rules);
            let committed = coverage.fill(&mut filled, &instance.trips);
            assert!(committed >= 1);
            assert_eq!(coverage.covered_count(), before + committed);
            assert_eq!(filled.trip_count(), committed);

            // Rebuild the filled duty one trip at a time.
            let mut step = Duty::new(id, rules);
            for trip in filled.trips() {
                assert_eq!(coverage.duty_of(trip.id), Some(id));
                assert!(step.can_accept(trip), "trip {} refused on replay", trip.id);
                step.commit(trip);
                assert!(step.driving_time() <= rules.total_driving);
                assert!(step.continuous_driving_time() <= rules.continuous_driving);
                assert!(step.shift_duration() <= rules.shift_span);
            }
            assert_eq!(step.driving_time(), filled.driving_time());
            assert_eq!(step.continuous_driving_time(), filled.continuous_driving_time());
            assert_eq!(step.shift_duration(), filled.shift_duration());
            assert_eq!(step.breaks(), filled.breaks());
            assert_eq!(step.rests(), filled.rests());
            assert_eq!(step.available_from(), filled.available_from());
            id += 1;
        }
        assert!(id <= instance.trip_count());
    }
}
