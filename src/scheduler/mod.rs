//! Duty construction, bounds and KPI evaluation.
//!
//! # Algorithm
//!
//! `Insertions` builds duties one at a time with a greedy, time-ordered
//! insertion scan. It is not optimal, but provides a fast feasible
//! solution whose duty count bounds (or seeds) an exact search.
//!
//! # Bounds
//!
//! `DutyBounds` brackets the optimal duty count between a driving-time /
//! peak-vehicle lower bound and the heuristic's upper bound.
//!
//! # KPI
//!
//! `SolutionKpi` computes crew metrics: duty count, driving utilization,
//! idle time, breaks and shift lengths.

mod bounds;
mod insertions;
mod kpi;

pub use bounds::{lower_bound_duties, peak_vehicle_count, DutyBounds};
pub use insertions::{Coverage, Insertions};
pub use kpi::SolutionKpi;
