//! Problem instances.
//!
//! An [`Instance`] is the input contract of duty construction: the
//! regulation limits plus trips with parsed, traffic-weighted times,
//! sorted by `(start_time, start_loc)` and numbered by sorted position.
//!
//! Instances are read from JSON timetables:
//!
//! ```json
//! {
//!   "regulations": { "total_driving": 480, "continuous_driving": 240,
//!                    "break_time": 30, "shift_span": 600 },
//!   "traffic": [ { "window": { "start": 420, "end": 540 }, "factor": 1.2 } ],
//!   "trips": [
//!     { "trip": "1", "initial_depot": "A", "final_depot": "B",
//!       "time": "06:15", "trip_duration": 45 }
//!   ]
//! }
//! ```
//!
//! Trip records also accept the short keys `id`, `start_loc`, `end_loc`,
//! `start` and `duration`. `traffic` is optional.

mod generator;

pub use generator::{generate, GeneratorConfig};

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CrewError, Result};
use crate::models::{min_trip_duration, Regulations, TrafficProfile, Trip};
use crate::time::{parse_time, trip_end_time, weighted_trip_duration};
use crate::validation::{validate_regulations, validate_trips};

/// One timetable row, as read from an instance file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRecord {
    /// Timetable label.
    #[serde(alias = "trip")]
    pub id: String,
    /// Departure location.
    #[serde(alias = "initial_depot")]
    pub start_loc: String,
    /// Arrival location.
    #[serde(alias = "final_depot")]
    pub end_loc: String,
    /// Departure clock time, `"HH:MM"`.
    #[serde(alias = "time")]
    pub start: String,
    /// Nominal duration in minutes, before traffic weighting.
    #[serde(alias = "trip_duration")]
    pub duration: i64,
}

impl TripRecord {
    /// Creates a record.
    pub fn new(
        id: impl Into<String>,
        start_loc: impl Into<String>,
        end_loc: impl Into<String>,
        start: impl Into<String>,
        duration: i64,
    ) -> Self {
        Self {
            id: id.into(),
            start_loc: start_loc.into(),
            end_loc: end_loc.into(),
            start: start.into(),
            duration,
        }
    }
}

/// Serialized form of an instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceFile {
    /// Labor limits.
    pub regulations: Regulations,
    /// Congestion bands applied to nominal durations.
    #[serde(default, skip_serializing_if = "TrafficProfile::is_empty")]
    pub traffic: TrafficProfile,
    /// Timetable rows in any order.
    pub trips: Vec<TripRecord>,
}

/// A prepared duty construction problem.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Labor limits.
    pub regulations: Regulations,
    /// Trips sorted by `(start_time, start_loc)`; `trips[i].id == i`.
    pub trips: Vec<Trip>,
}

impl Instance {
    /// Prepares an instance from timetable rows.
    ///
    /// Parses departure times, applies traffic weighting, derives end
    /// times, sorts, numbers the trips and stamps the instance-wide
    /// minimum duration on each of them.
    ///
    /// # Errors
    /// - [`CrewError::InvalidRegulations`] for non-positive limits
    /// - [`CrewError::InvalidTrafficFactor`] / [`CrewError::InvalidTrafficBands`]
    ///   for a bad traffic band
    /// - [`CrewError::InvalidTimeFormat`] / [`CrewError::InvalidDuration`]
    ///   for a malformed row
    /// - [`CrewError::InvalidInstance`] if the prepared trips fail
    ///   [`validate_trips`]
    pub fn from_records(
        regulations: Regulations,
        traffic: &TrafficProfile,
        records: &[TripRecord],
    ) -> Result<Self> {
        if let Err(errors) = validate_regulations(&regulations) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(CrewError::InvalidRegulations(messages.join("; ")));
        }
        traffic.check()?;

        let mut trips = Vec::with_capacity(records.len());
        for record in records {
            let start = parse_time(&record.start)?;
            let duration = weighted_trip_duration(start, record.duration, traffic)?;
            trips.push(Trip {
                id: 0,
                label: record.id.clone(),
                start_loc: record.start_loc.clone(),
                end_loc: record.end_loc.clone(),
                start_time: start,
                end_time: trip_end_time(start, duration),
                duration,
                min_duration: 0,
            });
        }

        trips.sort_by(|a, b| {
            a.start_time
                .cmp(&b.start_time)
                .then_with(|| a.start_loc.cmp(&b.start_loc))
        });

        let min_duration = min_trip_duration(&trips);
        for (i, trip) in trips.iter_mut().enumerate() {
            trip.id = i;
            trip.min_duration = min_duration;
        }

        validate_trips(&trips).map_err(CrewError::InvalidInstance)?;

        info!(trips = trips.len(), min_duration, "instance prepared");
        Ok(Self { regulations, trips })
    }

    /// Prepares an instance from its serialized form.
    pub fn from_file(file: &InstanceFile) -> Result<Self> {
        Self::from_records(file.regulations, &file.traffic, &file.trips)
    }

    /// Parses and prepares a JSON instance.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: InstanceFile = serde_json::from_str(json)?;
        Self::from_file(&file)
    }

    /// Reads and prepares a JSON instance file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading instance");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Keeps only the first `limit` trips in sorted order.
    ///
    /// Ids stay positional; the shared minimum duration is re-stamped
    /// over the kept trips. A limit at or above the trip count is a no-op.
    pub fn truncate(&mut self, limit: usize) {
        if limit >= self.trips.len() {
            return;
        }
        self.trips.truncate(limit);
        let min_duration = min_trip_duration(&self.trips);
        for trip in &mut self.trips {
            trip.min_duration = min_duration;
        }
        debug!(trips = limit, min_duration, "instance truncated");
    }

    /// Number of trips.
    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    /// Earliest departure and latest arrival, or `None` without trips.
    pub fn horizon(&self) -> Option<(i64, i64)> {
        let start = self.trips.iter().map(|t| t.start_time).min()?;
        let end = self.trips.iter().map(|t| t.end_time).max()?;
        Some((start, end))
    }

    /// Shortest trip duration (0 without trips).
    pub fn min_duration(&self) -> i64 {
        min_trip_duration(&self.trips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TimeWindow, TrafficBand};
    use std::io::Write;

    fn records() -> Vec<TripRecord> {
        vec![
            TripRecord::new("3", "B", "A", "07:30", 40),
            TripRecord::new("1", "A", "B", "06:00", 45),
            TripRecord::new("2", "A", "B", "07:30", 50),
        ]
    }

    #[test]
    fn test_from_records_sorts_and_numbers() {
        let inst =
            Instance::from_records(Regulations::default(), &TrafficProfile::new(), &records())
                .unwrap();

        let labels: Vec<&str> = inst.trips.iter().map(|t| t.label.as_str()).collect();
        // 07:30 tie broken by start location: A before B.
        assert_eq!(labels, vec!["1", "2", "3"]);
        for (i, t) in inst.trips.iter().enumerate() {
            assert_eq!(t.id, i);
            assert_eq!(t.min_duration, 40);
        }
        assert_eq!(inst.trips[0].start_time, 360);
        assert_eq!(inst.trips[0].end_time, 405);
        assert_eq!(inst.horizon(), Some((360, 500)));
        assert_eq!(inst.min_duration(), 40);
    }

    #[test]
    fn test_truncate_keeps_earliest_trips() {
        let mut inst =
            Instance::from_records(Regulations::default(), &TrafficProfile::new(), &records())
                .unwrap();

        inst.truncate(10);
        assert_eq!(inst.trip_count(), 3);

        inst.truncate(2);
        let labels: Vec<&str> = inst.trips.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2"]);
        // Trip "3" (40 minutes) is gone; 45 is now the shortest.
        assert!(inst.trips.iter().all(|t| t.min_duration == 45));
        assert!(validate_trips(&inst.trips).is_ok());
    }

    #[test]
    fn test_traffic_weighting_applied() {
        let traffic = TrafficProfile::new()
            .with_band(TrafficBand::new(TimeWindow::new(420, 480), 1.5).unwrap());
        let inst = Instance::from_records(Regulations::default(), &traffic, &records()).unwrap();

        assert_eq!(inst.trips[0].duration, 45); // 06:00, outside the band
        assert_eq!(inst.trips[1].duration, 75); // 07:30, 50 * 1.5
        assert_eq!(inst.trips[2].duration, 60); // 07:30, 40 * 1.5
        assert_eq!(inst.min_duration(), 45);
        assert!(inst.trips.iter().all(|t| t.min_duration == 45));
    }

    #[test]
    fn test_bad_time_is_fatal() {
        let mut rows = records();
        rows[0].start = "25:10".into();
        let err = Instance::from_records(Regulations::default(), &TrafficProfile::new(), &rows)
            .unwrap_err();
        assert!(matches!(err, CrewError::InvalidTimeFormat { .. }));
    }

    #[test]
    fn test_negative_duration_is_fatal() {
        let mut rows = records();
        rows[1].duration = -5;
        let err = Instance::from_records(Regulations::default(), &TrafficProfile::new(), &rows)
            .unwrap_err();
        assert!(matches!(err, CrewError::InvalidDuration(-5)));
    }

    #[test]
    fn test_bad_regulations() {
        let err = Instance::from_records(
            Regulations::new(480, 0, 30, 600),
            &TrafficProfile::new(),
            &records(),
        )
        .unwrap_err();
        assert!(matches!(err, CrewError::InvalidRegulations(ref m) if m.contains("continuous_driving")));
    }

    #[test]
    fn test_overlapping_traffic_bands_rejected() {
        let json = r#"{
            "regulations": {"total_driving": 480, "continuous_driving": 240,
                            "break_time": 30, "shift_span": 600},
            "traffic": [
                {"window": {"start": 420, "end": 540}, "factor": 1.5},
                {"window": {"start": 500, "end": 600}, "factor": 1.2}
            ],
            "trips": [
                {"trip": "1", "initial_depot": "A", "final_depot": "B", "time": "07:10", "trip_duration": 40}
            ]
        }"#;
        let err = Instance::from_json_str(json).unwrap_err();
        assert!(matches!(err, CrewError::InvalidTrafficBands(_)));
    }

    #[test]
    fn test_empty_location_fails_validation() {
        let rows = vec![TripRecord::new("1", "", "B", "06:00", 30)];
        let err = Instance::from_records(Regulations::default(), &TrafficProfile::new(), &rows)
            .unwrap_err();
        assert!(matches!(err, CrewError::InvalidInstance(ref e) if e.len() == 1));
    }

    #[test]
    fn test_from_json_with_timetable_columns() {
        let json = r#"{
            "regulations": {"total_driving": 480, "continuous_driving": 240,
                            "break_time": 30, "shift_span": 600},
            "trips": [
                {"trip": "1", "initial_depot": "A", "final_depot": "B",
                 "time": "06:15", "trip_duration": 45},
                {"id": "2", "start_loc": "B", "end_loc": "A",
                 "start": "07:05", "duration": 40}
            ]
        }"#;
        let inst = Instance::from_json_str(json).unwrap();
        assert_eq!(inst.trip_count(), 2);
        assert_eq!(inst.trips[0].start_loc, "A");
        assert_eq!(inst.trips[1].start_time, 425);
        assert_eq!(inst.regulations.continuous_driving, 240);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            Instance::from_json_str("{ not json"),
            Err(CrewError::Json(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let file = InstanceFile {
            regulations: Regulations::default(),
            traffic: TrafficProfile::new(),
            trips: records(),
        };
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(serde_json::to_string(&file).unwrap().as_bytes())
            .unwrap();

        let inst = Instance::from_path(tmp.path()).unwrap();
        assert_eq!(inst.trip_count(), 3);

        let missing = Instance::from_path(tmp.path().with_extension("missing"));
        assert!(matches!(missing, Err(CrewError::Io(_))));
    }
}
