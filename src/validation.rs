//! Input validation and solution auditing.
//!
//! Two kinds of checks:
//!
//! - **Input integrity** ([`validate_trips`], [`validate_regulations`]):
//!   run before duty construction. Detects duplicate or out-of-range ids,
//!   inconsistent times, unsorted input and a wrong shared minimum
//!   duration. All issues are collected, not just the first.
//! - **Solution audit** ([`audit`]): re-derives every labor rule from a
//!   finished solution's trip sequences, independently of the duty
//!   counters. Works on any solution shape, including assignments
//!   produced by an external exact solver.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{min_trip_duration, Regulations, Solution, Trip};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationErrorKind {
    /// Two trips share the same id.
    DuplicateId,
    /// A trip id is not a valid index into the trip list.
    IdOutOfRange,
    /// A trip ends before it starts.
    NegativeDuration,
    /// `end_time - start_time` differs from `duration`.
    DurationMismatch,
    /// Trips are not ordered by (start time, start location).
    NotSorted,
    /// A trip has an empty location identifier.
    EmptyLocation,
    /// A trip's `min_duration` is not the instance minimum.
    MinDurationMismatch,
    /// A regulation limit is zero or negative.
    NonPositiveLimit,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a trip list before duty construction.
///
/// Checks:
/// 1. Ids are unique and each is a valid index (`id < trips.len()`)
/// 2. Locations are non-empty
/// 3. `end_time >= start_time` and `end_time - start_time == duration`
/// 4. Order is non-decreasing by `(start_time, start_loc)`
/// 5. Every `min_duration` equals the shortest duration in the list
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_trips(trips: &[Trip]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();
    let min_duration = min_trip_duration(trips);

    for trip in trips {
        if !ids.insert(trip.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate trip ID: {}", trip.id),
            ));
        }
        if trip.id >= trips.len() {
            errors.push(ValidationError::new(
                ValidationErrorKind::IdOutOfRange,
                format!("Trip ID {} out of range for {} trips", trip.id, trips.len()),
            ));
        }
        if trip.start_loc.is_empty() || trip.end_loc.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyLocation,
                format!("Trip '{}' has an empty location", trip.label),
            ));
        }
        if trip.end_time < trip.start_time {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeDuration,
                format!(
                    "Trip '{}' ends at {} before it starts at {}",
                    trip.label, trip.end_time, trip.start_time
                ),
            ));
        } else if trip.end_time - trip.start_time != trip.duration {
            errors.push(ValidationError::new(
                ValidationErrorKind::DurationMismatch,
                format!(
                    "Trip '{}' spans {} minutes but declares duration {}",
                    trip.label,
                    trip.end_time - trip.start_time,
                    trip.duration
                ),
            ));
        }
        if trip.min_duration != min_duration {
            errors.push(ValidationError::new(
                ValidationErrorKind::MinDurationMismatch,
                format!(
                    "Trip '{}' carries min_duration {} but the instance minimum is {}",
                    trip.label, trip.min_duration, min_duration
                ),
            ));
        }
    }

    for pair in trips.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if (a.start_time, a.start_loc.as_str()) > (b.start_time, b.start_loc.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::NotSorted,
                format!("Trip '{}' is listed before earlier trip '{}'", a.label, b.label),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates regulation limits: all must be positive.
pub fn validate_regulations(regulations: &Regulations) -> ValidationResult {
    let limits = [
        ("total_driving", regulations.total_driving),
        ("continuous_driving", regulations.continuous_driving),
        ("break_time", regulations.break_time),
        ("shift_span", regulations.shift_span),
    ];

    let errors: Vec<ValidationError> = limits
        .iter()
        .filter(|(_, value)| *value <= 0)
        .map(|(name, value)| {
            ValidationError::new(
                ValidationErrorKind::NonPositiveLimit,
                format!("Regulation '{name}' must be positive, got {value}"),
            )
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A labor-rule or coverage violation found in a solution.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related trip or duty id.
    pub entity_id: usize,
    /// Human-readable description.
    pub message: String,
}

/// Classification of solution violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViolationType {
    /// A trip is in no duty. `entity_id` is the trip.
    Uncovered,
    /// A trip is in more than one duty. `entity_id` is the trip.
    MultiplyCovered,
    /// Consecutive trips of a duty do not chain locations.
    LocationGap,
    /// Consecutive trips of a duty overlap in time.
    Overlap,
    /// A duty drives longer than `total_driving`.
    TotalDrivingExceeded,
    /// A duty drives longer than `continuous_driving` without a break.
    ContinuousDrivingExceeded,
    /// A duty lasts longer than `shift_span`.
    ShiftSpanExceeded,
}

impl Violation {
    fn new(violation_type: ViolationType, entity_id: usize, message: impl Into<String>) -> Self {
        Self {
            violation_type,
            entity_id,
            message: message.into(),
        }
    }
}

/// Audits a solution against `regulations`.
///
/// Continuous driving is re-derived from the trip sequence: an idle gap
/// of at least `break_time` ends a driving stretch. Forced breaks always
/// appear as such a gap, because the duty locks the driver out for
/// `break_time` after the trip that triggered them.
///
/// Returns an empty vector for a feasible, complete solution.
pub fn audit(solution: &Solution, regulations: &Regulations) -> Vec<Violation> {
    let mut violations = Vec::new();

    let mut cover_count = vec![0usize; solution.trip_count()];
    for duty in &solution.duties {
        for trip in duty.trips() {
            if let Some(c) = cover_count.get_mut(trip.id) {
                *c += 1;
            }
        }
    }
    for (trip_id, &count) in cover_count.iter().enumerate() {
        match count {
            0 => violations.push(Violation::new(
                ViolationType::Uncovered,
                trip_id,
                format!("Trip {trip_id} is not covered by any duty"),
            )),
            1 => {}
            n => violations.push(Violation::new(
                ViolationType::MultiplyCovered,
                trip_id,
                format!("Trip {trip_id} is covered by {n} duties"),
            )),
        }
    }

    for duty in &solution.duties {
        let trips = duty.trips();
        let (Some(first), Some(last)) = (trips.first(), trips.last()) else {
            continue;
        };
        let id = duty.id();

        let driving: i64 = trips.iter().map(|t| t.duration).sum();
        if driving > regulations.total_driving {
            violations.push(Violation::new(
                ViolationType::TotalDrivingExceeded,
                id,
                format!(
                    "Duty {id} drives {driving} minutes, limit {}",
                    regulations.total_driving
                ),
            ));
        }

        let span = last.end_time - first.start_time;
        if span > regulations.shift_span {
            violations.push(Violation::new(
                ViolationType::ShiftSpanExceeded,
                id,
                format!("Duty {id} spans {span} minutes, limit {}", regulations.shift_span),
            ));
        }

        let mut stretch = first.duration;
        let mut longest_stretch = stretch;
        for pair in trips.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.end_loc != b.start_loc {
                violations.push(Violation::new(
                    ViolationType::LocationGap,
                    id,
                    format!(
                        "Duty {id}: trip {} ends at '{}' but trip {} starts at '{}'",
                        a.id, a.end_loc, b.id, b.start_loc
                    ),
                ));
            }

            let gap = b.start_time - a.end_time;
            if gap < 0 {
                violations.push(Violation::new(
                    ViolationType::Overlap,
                    id,
                    format!("Duty {id}: trip {} starts before trip {} ends", b.id, a.id),
                ));
            }

            stretch = if gap >= regulations.break_time {
                b.duration
            } else {
                stretch + b.duration
            };
            longest_stretch = longest_stretch.max(stretch);
        }

        if longest_stretch > regulations.continuous_driving {
            violations.push(Violation::new(
                ViolationType::ContinuousDrivingExceeded,
                id,
                format!(
                    "Duty {id} drives {longest_stretch} minutes without a break, limit {}",
                    regulations.continuous_driving
                ),
            ));
        }
    }

    violations
}
