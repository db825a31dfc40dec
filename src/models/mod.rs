//! Crew scheduling domain models.
//!
//! Provides the data types for describing a duty construction problem
//! (trips, regulations, traffic) and its solution (duties).
//!
//! # Domain Mappings
//!
//! | u-crew | Urban Bus | Rail | Airline |
//! |--------|-----------|------|---------|
//! | Trip | Timetabled run | Train service leg | Flight leg |
//! | Duty | Driver shift | Driver turn | Pairing day |
//! | Regulations | Driver rules | Working time rules | Duty time limits |
//! | Location | Depot / relief point | Station | Airport |

mod duty;
mod regulations;
mod solution;
mod traffic;
mod trip;

pub use duty::{Duty, Rejection};
pub use regulations::Regulations;
pub use solution::{Solution, TripProjections};
pub use traffic::{TimeWindow, TrafficBand, TrafficProfile};
pub use trip::{min_trip_duration, Trip};
