//! Bounds on the number of duties and vehicles.
//!
//! The insertion heuristic gives a feasible duty count, an upper bound.
//! Two cheap lower bounds complete the bracket an exact search works in:
//!
//! - **Driving bound**: a duty may only exceed `total_driving` when it
//!   holds a single trip that is longer than the limit on its own. Such
//!   trips take one duty each; the remaining trip time needs at least
//!   `ceil(remaining / total_driving)` more.
//! - **Peak vehicles**: the largest number of trips in service at the same
//!   instant. Every one of them needs its own vehicle, and its own driver.

use serde::Serialize;

use crate::models::{Regulations, Solution, Trip};

/// Lower bound on the number of duties.
///
/// The larger of the driving bound and the peak number of simultaneous
/// trips. Zero for an empty trip list.
pub fn lower_bound_duties(trips: &[Trip], regulations: &Regulations) -> usize {
    if trips.is_empty() {
        return 0;
    }
    let limit = regulations.total_driving.max(1);

    let (solo, rest): (Vec<&Trip>, Vec<&Trip>) =
        trips.iter().partition(|t| t.duration > limit);
    let remaining: i64 = rest.iter().map(|t| t.duration.max(0)).sum();
    let by_driving = solo.len() + ((remaining + limit - 1) / limit) as usize;

    by_driving.max(1).max(peak_vehicle_count(trips))
}

/// Maximum number of trips in service at once.
///
/// Trips are half-open `[start, end)`: one arriving at 08:00 and another
/// departing at 08:00 do not overlap.
pub fn peak_vehicle_count(trips: &[Trip]) -> usize {
    // (time, delta); arrivals sort before departures at equal times.
    let mut events: Vec<(i64, i32)> = Vec::with_capacity(trips.len() * 2);
    for trip in trips {
        events.push((trip.start_time, 1));
        events.push((trip.end_time, -1));
    }
    events.sort_unstable();

    let mut current: i32 = 0;
    let mut peak: i32 = 0;
    for (_, delta) in events {
        current += delta;
        peak = peak.max(current);
    }
    peak as usize
}

/// Bracket on the optimal number of duties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DutyBounds {
    /// Proven lower bound.
    pub lower: usize,
    /// Feasible (heuristic) upper bound.
    pub upper: usize,
}

impl DutyBounds {
    /// Combines the lower bound of `trips` with a solution's duty count.
    pub fn new(trips: &[Trip], regulations: &Regulations, solution: &Solution) -> Self {
        Self {
            lower: lower_bound_duties(trips, regulations),
            upper: solution.duty_count(),
        }
    }

    /// Absolute gap between the bounds.
    pub fn gap(&self) -> usize {
        self.upper.saturating_sub(self.lower)
    }

    /// Whether the upper bound is proven optimal.
    pub fn is_tight(&self) -> bool {
        self.gap() == 0
    }
}
