//! Solution (duty set) model.
//!
//! Packages a finished set of duties with the trips they cover and
//! derives the flat views that reporting and exact solvers consume:
//! the trip → duty assignment, the trip × duty incidence matrix and
//! per-trip attribute arrays aligned by trip id.

use serde::Serialize;

use super::{Duty, Trip};

/// A set of duties covering an instance's trips.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    /// The instance's trips, in id order.
    pub trips: Vec<Trip>,
    /// Duties in the order they were opened.
    pub duties: Vec<Duty>,
    /// Covering duty per trip id (`None` = uncovered).
    assignment: Vec<Option<usize>>,
}

/// Per-trip attribute arrays, each indexed by trip id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TripProjections {
    /// Departure location per trip.
    pub start_locs: Vec<String>,
    /// Arrival location per trip.
    pub end_locs: Vec<String>,
    /// Departure time per trip (minutes).
    pub start_times: Vec<i64>,
    /// Arrival time per trip (minutes).
    pub end_times: Vec<i64>,
    /// Duration per trip (minutes).
    pub durations: Vec<i64>,
}

impl TripProjections {
    /// Builds the arrays from trips sorted by id.
    pub fn from_trips(trips: &[Trip]) -> Self {
        Self {
            start_locs: trips.iter().map(|t| t.start_loc.clone()).collect(),
            end_locs: trips.iter().map(|t| t.end_loc.clone()).collect(),
            start_times: trips.iter().map(|t| t.start_time).collect(),
            end_times: trips.iter().map(|t| t.end_time).collect(),
            durations: trips.iter().map(|t| t.duration).collect(),
        }
    }

    /// Number of trips.
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    /// Whether there are no trips.
    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }
}

impl Solution {
    /// Assembles a solution from trips (id order) and finished duties.
    ///
    /// A trip found in several duties is assigned to the last one;
    /// [`audit`](crate::validation::audit) reports such conflicts.
    pub fn new(trips: Vec<Trip>, duties: Vec<Duty>) -> Self {
        let mut assignment = vec![None; trips.len()];
        for duty in &duties {
            for trip in duty.trips() {
                if let Some(slot) = assignment.get_mut(trip.id) {
                    *slot = Some(duty.id());
                }
            }
        }

        Self {
            trips,
            duties,
            assignment,
        }
    }

    /// Number of duties. For a heuristic solution this is an upper bound
    /// on the minimum number of duties.
    pub fn duty_count(&self) -> usize {
        self.duties.len()
    }

    /// Number of trips in the instance.
    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    /// Duty covering trip `trip_id`.
    pub fn duty_of(&self, trip_id: usize) -> Option<usize> {
        self.assignment.get(trip_id).copied().flatten()
    }

    /// Whether trip `trip_id` is covered.
    pub fn is_covered(&self, trip_id: usize) -> bool {
        self.duty_of(trip_id).is_some()
    }

    /// Whether every trip is covered.
    pub fn is_complete(&self) -> bool {
        self.assignment.iter().all(Option::is_some)
    }

    /// Covering duty per trip id.
    pub fn assignment(&self) -> &[Option<usize>] {
        &self.assignment
    }

    /// Finds a duty by id.
    pub fn duty(&self, duty_id: usize) -> Option<&Duty> {
        self.duties.iter().find(|d| d.id() == duty_id)
    }

    /// Trip × duty incidence matrix: `m[t][d]` is true iff duty `d`
    /// (by position) contains trip `t`.
    ///
    /// For a valid solution each row has exactly one true entry.
    pub fn incidence_matrix(&self) -> Vec<Vec<bool>> {
        let mut matrix = vec![vec![false; self.duties.len()]; self.trips.len()];
        for (d, duty) in self.duties.iter().enumerate() {
            for trip in duty.trips() {
                if let Some(row) = matrix.get_mut(trip.id) {
                    row[d] = true;
                }
            }
        }
        matrix
    }

    /// Per-trip attribute arrays aligned by trip id.
    pub fn projections(&self) -> TripProjections {
        TripProjections::from_trips(&self.trips)
    }
}
