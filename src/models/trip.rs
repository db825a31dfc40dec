//! Trip model.
//!
//! A trip is one timetabled vehicle movement between two locations.
//! Trips are created once by the instance builder and never change;
//! which duty covers a trip is tracked by the construction heuristic,
//! not by the trip itself.

use serde::{Deserialize, Serialize};

/// A scheduled vehicle movement.
///
/// # Time Representation
/// Minutes since midnight of the service day. `duration` is already
/// traffic-weighted, so `end_time == start_time + duration`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    /// Position in the time-sorted instance. Used as an array index.
    pub id: usize,
    /// Timetable label (e.g. the trip number in the source timetable).
    pub label: String,
    /// Departure location/depot.
    pub start_loc: String,
    /// Arrival location/depot.
    pub end_loc: String,
    /// Departure time (minutes).
    pub start_time: i64,
    /// Arrival time (minutes).
    pub end_time: i64,
    /// Driving time (minutes).
    pub duration: i64,
    /// Shortest duration of any trip in the instance, used by the
    /// forced-break lookahead.
    pub min_duration: i64,
}

impl Trip {
    /// Creates a trip. `end_time` is derived from `start_time + duration`;
    /// `min_duration` defaults to this trip's own duration.
    pub fn new(
        id: usize,
        start_loc: impl Into<String>,
        end_loc: impl Into<String>,
        start_time: i64,
        duration: i64,
    ) -> Self {
        Self {
            id,
            label: id.to_string(),
            start_loc: start_loc.into(),
            end_loc: end_loc.into(),
            start_time,
            end_time: crate::time::trip_end_time(start_time, duration),
            duration,
            min_duration: duration,
        }
    }

    /// Sets the timetable label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the instance-wide minimum trip duration.
    pub fn with_min_duration(mut self, min_duration: i64) -> Self {
        self.min_duration = min_duration;
        self
    }
}

/// Shortest duration across `trips`, or 0 for an empty slice.
pub fn min_trip_duration(trips: &[Trip]) -> i64 {
    trips.iter().map(|t| t.duration).min().unwrap_or(0)
}
