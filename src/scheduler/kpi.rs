//! Duty set quality metrics (KPIs).
//!
//! Computes standard crew scheduling indicators from a finished solution.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Duty Count | Number of duties (drivers) |
//! | Total / Avg Driving | Sum and mean of duty driving time |
//! | Total / Avg Shift | Sum and mean of duty shift duration |
//! | Driving Utilization | Total driving / total shift |
//! | Idle Time | Total shift - total driving |
//! | Breaks / Rests | Counts across all duties |
//! | Longest Shift | Largest single shift duration |
//! | Trips per Duty | Mean trips per duty |

use serde::Serialize;

use crate::models::Solution;

/// Solution performance indicators.
///
/// All time values are in minutes.
#[derive(Debug, Clone, Serialize)]
pub struct SolutionKpi {
    /// Number of duties.
    pub duty_count: usize,
    /// Sum of driving across duties.
    pub total_driving: i64,
    /// Mean driving per duty.
    pub avg_driving: f64,
    /// Sum of shift durations.
    pub total_shift: i64,
    /// Mean shift duration.
    pub avg_shift: f64,
    /// Fraction of paid shift time spent driving (0.0..1.0).
    pub driving_utilization: f64,
    /// Shift time not spent driving.
    pub idle_time: i64,
    /// Breaks across all duties, natural and forced.
    pub total_breaks: u32,
    /// Short rests across all duties.
    pub total_rests: u32,
    /// Largest shift duration.
    pub longest_shift: i64,
    /// Mean number of trips per duty.
    pub trips_per_duty: f64,
}

impl SolutionKpi {
    /// Computes KPIs from a solution.
    pub fn calculate(solution: &Solution) -> Self {
        let duties = &solution.duties;
        let duty_count = duties.len();

        let total_driving: i64 = duties.iter().map(|d| d.driving_time()).sum();
        let total_shift: i64 = duties.iter().map(|d| d.shift_duration()).sum();
        let total_breaks: u32 = duties.iter().map(|d| d.breaks()).sum();
        let total_rests: u32 = duties.iter().map(|d| d.rests()).sum();
        let total_trips: usize = duties.iter().map(|d| d.trip_count()).sum();
        let longest_shift = duties
            .iter()
            .map(|d| d.shift_duration())
            .max()
            .unwrap_or(0);

        let per_duty = |total: f64| {
            if duty_count == 0 {
                0.0
            } else {
                total / duty_count as f64
            }
        };

        let driving_utilization = if total_shift == 0 {
            0.0
        } else {
            total_driving as f64 / total_shift as f64
        };

        Self {
            duty_count,
            total_driving,
            avg_driving: per_duty(total_driving as f64),
            total_shift,
            avg_shift: per_duty(total_shift as f64),
            driving_utilization,
            idle_time: total_shift - total_driving,
            total_breaks,
            total_rests,
            longest_shift,
            trips_per_duty: per_duty(total_trips as f64),
        }
    }

    /// Whether the solution uses at most `max_duties` duties and spends at
    /// least `min_utilization` of its shift time driving.
    pub fn meets_thresholds(&self, max_duties: usize, min_utilization: f64) -> bool {
        self.duty_count <= max_duties && self.driving_utilization >= min_utilization
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Duty, Regulations, Trip};

    fn sample() -> Solution {
        let rules = Regulations::new(480, 180, 30, 600);
        let trips = vec![
            Trip::new(0, "X", "Y", 0, 60).with_min_duration(30),
            Trip::new(1, "Y", "X", 100, 60).with_min_duration(30),
            Trip::new(2, "A", "B", 50, 30).with_min_duration(30),
        ];

        let mut d0 = Duty::new(0, rules);
        d0.commit(&trips[0]);
        d0.commit(&trips[1]);
        let mut d1 = Duty::new(1, rules);
        d1.commit(&trips[2]);

        Solution::new(trips, vec![d0, d1])
    }

    #[test]
    fn test_kpi_basic() {
        let kpi = SolutionKpi::calculate(&sample());
        assert_eq!(kpi.duty_count, 2);
        assert_eq!(kpi.total_driving, 150);
        assert_eq!(kpi.total_shift, 190); // 160 + 30
        assert_eq!(kpi.idle_time, 40);
        assert_eq!(kpi.longest_shift, 160);
        assert_eq!(kpi.total_breaks, 1); // 40-minute gap
        assert_eq!(kpi.total_rests, 0);
        assert!((kpi.avg_driving - 75.0).abs() < 1e-10);
        assert!((kpi.avg_shift - 95.0).abs() < 1e-10);
        assert!((kpi.trips_per_duty - 1.5).abs() < 1e-10);
        assert!((kpi.driving_utilization - 150.0 / 190.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = SolutionKpi::calculate(&Solution::new(Vec::new(), Vec::new()));
        assert_eq!(kpi.duty_count, 0);
        assert_eq!(kpi.total_driving, 0);
        assert!((kpi.driving_utilization - 0.0).abs() < 1e-10);
        assert!((kpi.trips_per_duty - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_meets_thresholds() {
        let kpi = SolutionKpi::calculate(&sample());
        assert!(kpi.meets_thresholds(2, 0.7));
        assert!(!kpi.meets_thresholds(1, 0.0));
        assert!(!kpi.meets_thresholds(5, 0.9));
    }
}
