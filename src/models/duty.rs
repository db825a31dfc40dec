//! Duty (driver shift) model.
//!
//! A duty is an ordered, location-chained sequence of trips driven by one
//! driver. It grows only through [`Duty::commit`], which must be preceded
//! by a successful [`Duty::can_accept`].
//!
//! # Bookkeeping
//!
//! | Counter | Meaning |
//! |---------|---------|
//! | `shift_duration` | Elapsed time, first departure to last arrival |
//! | `driving_time` | Sum of trip durations |
//! | `continuous_driving_time` | Driving since the last break |
//! | `rests` / `rest_time` | Idle gaps shorter than a break |
//! | `breaks` / `break_time` | Qualifying gaps plus forced breaks |
//! | `available_from` | End of a pending forced break, -1 if none |
//!
//! # Forced breaks
//! After each commit the duty checks whether the remaining continuous
//! driving allowance is smaller than the shortest trip of the instance.
//! If so, no further trip could be admitted without a break, so one is
//! inserted immediately after the committed trip and the driver is locked
//! out until it ends.

use std::fmt;

use serde::Serialize;

use super::{Regulations, Trip};
use crate::time::{trip_end_time, MINUTES_PER_DAY};

/// Why a duty refused a trip. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rejection {
    /// The trip does not depart from where the last trip arrived.
    LocationMismatch,
    /// The trip departs before the last trip arrives.
    Overlap,
    /// The trip departs during a forced break.
    OnBreak,
    /// Admitting the trip would exceed the shift span.
    ShiftSpan,
    /// Admitting the trip would exceed total driving time.
    TotalDriving,
    /// Admitting the trip would exceed continuous driving time.
    ContinuousDriving,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rejection::LocationMismatch => "location mismatch",
            Rejection::Overlap => "overlaps last trip",
            Rejection::OnBreak => "driver on forced break",
            Rejection::ShiftSpan => "shift span exceeded",
            Rejection::TotalDriving => "total driving exceeded",
            Rejection::ContinuousDriving => "continuous driving exceeded",
        };
        f.write_str(s)
    }
}

/// One driver's work shift.
///
/// # Example
/// ```
/// use u_crew::models::{Duty, Regulations, Trip};
///
/// let rules = Regulations::new(480, 180, 30, 600);
/// let mut duty = Duty::new(0, rules);
///
/// let a = Trip::new(0, "X", "Y", 0, 60);
/// let b = Trip::new(1, "Y", "Z", 60, 60);
///
/// assert!(duty.can_accept(&a));
/// duty.commit(&a);
/// assert!(duty.can_accept(&b));
/// duty.commit(&b);
///
/// assert_eq!(duty.driving_time(), 120);
/// assert_eq!(duty.breaks(), 0);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Duty {
    id: usize,
    #[serde(skip)]
    regulations: Regulations,
    start_time: i64,
    end_time: i64,
    max_end_time: i64,
    shift_duration: i64,
    driving_time: i64,
    continuous_driving_time: i64,
    rests: u32,
    rest_time: i64,
    breaks: u32,
    break_time: i64,
    available_from: i64,
    overnight: bool,
    trips: Vec<Trip>,
}

impl Duty {
    /// Creates an empty duty governed by `regulations`.
    pub fn new(id: usize, regulations: Regulations) -> Self {
        Self {
            id,
            regulations,
            start_time: 0,
            end_time: 0,
            max_end_time: 0,
            shift_duration: 0,
            driving_time: 0,
            continuous_driving_time: 0,
            rests: 0,
            rest_time: 0,
            breaks: 0,
            break_time: 0,
            available_from: -1,
            overnight: false,
            trips: Vec::new(),
        }
    }

    /// Whether `trip` can be appended without breaking any rule.
    ///
    /// Pure: never mutates the duty. An empty duty accepts every trip.
    pub fn can_accept(&self, trip: &Trip) -> bool {
        self.rejection(trip).is_none()
    }

    /// First rule `trip` would break, or `None` if it is admissible.
    pub fn rejection(&self, trip: &Trip) -> Option<Rejection> {
        let last = self.trips.last()?;

        if last.end_loc != trip.start_loc {
            return Some(Rejection::LocationMismatch);
        }

        // Non-negative whenever the overlap check below passes, since
        // `end_time` is the last trip's arrival.
        let rest = trip.start_time - last.end_time;
        let projected_shift = self.shift_duration + rest + trip.duration;
        let projected_total = self.driving_time + trip.duration;
        let projected_continuous = if rest >= self.regulations.break_time {
            trip.duration
        } else {
            self.continuous_driving_time + trip.duration
        };

        if trip.start_time < self.end_time {
            Some(Rejection::Overlap)
        } else if trip.start_time < self.available_from {
            Some(Rejection::OnBreak)
        } else if projected_shift > self.regulations.shift_span {
            Some(Rejection::ShiftSpan)
        } else if projected_total > self.regulations.total_driving {
            Some(Rejection::TotalDriving)
        } else if projected_continuous > self.regulations.continuous_driving {
            Some(Rejection::ContinuousDriving)
        } else {
            None
        }
    }

    /// Appends `trip` and updates every counter.
    ///
    /// Callers must have checked [`can_accept`](Self::can_accept) first;
    /// committing an inadmissible trip is not detected.
    pub fn commit(&mut self, trip: &Trip) {
        debug_assert!(self.can_accept(trip), "commit of inadmissible trip {}", trip.id);

        let rules = self.regulations;

        if let Some(last) = self.trips.last() {
            let rest = trip.start_time - last.end_time;

            // A forced break already ends after `last`; the gap then
            // merely serves it out.
            if rest >= rules.break_time && self.available_from < last.end_time {
                self.break_time += rules.break_time;
                self.breaks += 1;
                self.continuous_driving_time = 0;
            } else {
                self.rest_time += rest;
                self.rests += 1;
            }

            self.shift_duration += rest + trip.duration;
        } else {
            self.start_time = trip.start_time;
            self.shift_duration += trip.duration;
            self.max_end_time = trip_end_time(trip.start_time, rules.shift_span);
            self.overnight = self.max_end_time > MINUTES_PER_DAY;
        }

        self.end_time = trip.end_time;
        self.continuous_driving_time += trip.duration;
        self.driving_time += trip.duration;

        let remaining = rules.continuous_driving - self.continuous_driving_time;
        if remaining < trip.min_duration {
            self.breaks += 1;
            self.break_time += rules.break_time;
            self.available_from = trip.end_time + rules.break_time;
            self.continuous_driving_time = 0;
        }

        self.trips.push(trip.clone());
    }

    /// Duty identifier.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Regulations this duty is checked against.
    pub fn regulations(&self) -> &Regulations {
        &self.regulations
    }

    /// Departure of the first trip (minutes).
    pub fn start_time(&self) -> i64 {
        self.start_time
    }

    /// Arrival of the last trip (minutes).
    pub fn end_time(&self) -> i64 {
        self.end_time
    }

    /// Latest arrival the shift span permits (minutes).
    pub fn max_end_time(&self) -> i64 {
        self.max_end_time
    }

    /// Elapsed time including idle gaps and breaks (minutes).
    pub fn shift_duration(&self) -> i64 {
        self.shift_duration
    }

    /// Total driving (minutes).
    pub fn driving_time(&self) -> i64 {
        self.driving_time
    }

    /// Driving since the last break (minutes).
    pub fn continuous_driving_time(&self) -> i64 {
        self.continuous_driving_time
    }

    /// Number of idle gaps too short to be a break.
    pub fn rests(&self) -> u32 {
        self.rests
    }

    /// Total idle time outside breaks (minutes).
    pub fn rest_time(&self) -> i64 {
        self.rest_time
    }

    /// Number of breaks, natural and forced.
    pub fn breaks(&self) -> u32 {
        self.breaks
    }

    /// Total break time (minutes).
    pub fn break_time(&self) -> i64 {
        self.break_time
    }

    /// End of a pending forced break, or -1.
    pub fn available_from(&self) -> i64 {
        self.available_from
    }

    /// Whether the permitted end of this duty lies past midnight.
    pub fn is_overnight(&self) -> bool {
        self.overnight
    }

    /// Committed trips in chronological order.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Number of committed trips.
    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    /// Whether no trip has been committed yet.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

fn clock(minutes: i64) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

impl fmt::Display for Duty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.trips.iter().map(|t| t.label.as_str()).collect();
        write!(
            f,
            "Duty {} [{}-{}] driving={} shift={} rests={} breaks={} trips={} ({})",
            self.id,
            clock(self.start_time),
            clock(self.end_time),
            self.driving_time,
            self.shift_duration,
            self.rests,
            self.breaks,
            self.trips.len(),
            labels.join("-"),
        )
    }
}
