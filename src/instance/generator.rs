//! Random instance generation.
//!
//! Produces reproducible synthetic timetables for demos, benchmarks and
//! property tests. Departures are uniform over the service window;
//! locations are drawn from `depots` named depots `D0..D{k-1}`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{InstanceFile, TripRecord};
use crate::error::{CrewError, Result};
use crate::models::{Regulations, TrafficProfile};
use crate::time::{format_time, MINUTES_PER_DAY};

/// Shape of a generated instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of trips.
    pub trips: usize,
    /// Number of distinct locations.
    pub depots: usize,
    /// Earliest departure (minutes).
    pub first_departure: i64,
    /// Latest departure (minutes, at most 1439).
    pub last_departure: i64,
    /// Shortest nominal duration (minutes).
    pub min_duration: i64,
    /// Longest nominal duration (minutes).
    pub max_duration: i64,
    /// Limits written into the instance.
    pub regulations: Regulations,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            trips: 40,
            depots: 2,
            first_departure: 300,
            last_departure: 1320,
            min_duration: 30,
            max_duration: 90,
            regulations: Regulations::default(),
        }
    }
}

impl GeneratorConfig {
    /// Sets the number of trips.
    pub fn with_trips(mut self, trips: usize) -> Self {
        self.trips = trips;
        self
    }

    /// Sets the number of depots.
    pub fn with_depots(mut self, depots: usize) -> Self {
        self.depots = depots;
        self
    }

    /// Sets the departure window.
    pub fn with_departures(mut self, first: i64, last: i64) -> Self {
        self.first_departure = first;
        self.last_departure = last;
        self
    }

    /// Sets the nominal duration range.
    pub fn with_durations(mut self, min: i64, max: i64) -> Self {
        self.min_duration = min;
        self.max_duration = max;
        self
    }

    /// Sets the regulations.
    pub fn with_regulations(mut self, regulations: Regulations) -> Self {
        self.regulations = regulations;
        self
    }
}

/// Generates a random instance file.
///
/// # Errors
/// [`CrewError::InvalidGeneratorConfig`] if `depots` is zero or a range is
/// empty or outside the service day.
pub fn generate<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> Result<InstanceFile> {
    if config.depots == 0 {
        return Err(CrewError::InvalidGeneratorConfig(
            "generator needs at least one depot".into(),
        ));
    }
    if config.first_departure < 0
        || config.first_departure > config.last_departure
        || config.last_departure >= MINUTES_PER_DAY
    {
        return Err(CrewError::InvalidGeneratorConfig(format!(
            "departure window {}..{} is not inside the service day",
            config.first_departure, config.last_departure
        )));
    }
    if config.min_duration <= 0 || config.min_duration > config.max_duration {
        return Err(CrewError::InvalidGeneratorConfig(format!(
            "duration range {}..{} is empty",
            config.min_duration, config.max_duration
        )));
    }

    let mut trips = Vec::with_capacity(config.trips);
    for i in 0..config.trips {
        let start = rng.random_range(config.first_departure..=config.last_departure);
        let duration = rng.random_range(config.min_duration..=config.max_duration);
        let from = rng.random_range(0..config.depots);
        let to = rng.random_range(0..config.depots);

        trips.push(TripRecord::new(
            format!("T{i:03}"),
            format!("D{from}"),
            format!("D{to}"),
            format_time(start)?,
            duration,
        ));
    }

    Ok(InstanceFile {
        regulations: config.regulations,
        traffic: TrafficProfile::new(),
        trips,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_shape() {
        let config = GeneratorConfig::default().with_trips(25).with_depots(3);
        let mut rng = StdRng::seed_from_u64(7);
        let file = generate(&config, &mut rng).unwrap();

        assert_eq!(file.trips.len(), 25);
        for rec in &file.trips {
            assert!(rec.duration >= 30 && rec.duration <= 90);
            assert!(["D0", "D1", "D2"].contains(&rec.start_loc.as_str()));
            assert!(["D0", "D1", "D2"].contains(&rec.end_loc.as_str()));
        }
    }

    #[test]
    fn test_generate_is_reproducible() {
        let config = GeneratorConfig::default();
        let a = generate(&config, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate(&config, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a.trips, b.trips);
    }

    #[test]
    fn test_generated_instance_loads() {
        let config = GeneratorConfig::default().with_trips(60);
        let file = generate(&config, &mut StdRng::seed_from_u64(3)).unwrap();
        let inst = Instance::from_file(&file).unwrap();
        assert_eq!(inst.trip_count(), 60);
    }

    #[test]
    fn test_generate_rejects_bad_config() {
        let mut rng = StdRng::seed_from_u64(1);
        let bad = [
            GeneratorConfig::default().with_depots(0),
            GeneratorConfig::default().with_departures(600, 1440),
            GeneratorConfig::default().with_durations(50, 40),
        ];
        for config in &bad {
            assert!(matches!(
                generate(config, &mut rng),
                Err(CrewError::InvalidGeneratorConfig(_))
            ));
        }
    }
}
