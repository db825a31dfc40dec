//! Crew scheduling for the U-Engine ecosystem.
//!
//! Builds driver duties (work shifts) covering a day of timetabled vehicle
//! trips under labor regulations: total driving, continuous driving with
//! mandatory breaks, shift span, and location continuity between trips.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Trip`, `Regulations`, `Duty`, `Solution`,
//!   `TrafficProfile`
//! - **`scheduler`**: Greedy `Insertions` heuristic, duty-count bounds, KPIs
//! - **`instance`**: JSON timetable loading, preprocessing and generation
//! - **`validation`**: Input integrity checks and solution auditing
//! - **`time`**: `"HH:MM"` ↔ minute conversions and duration weighting
//!
//! # Example
//!
//! ```
//! use u_crew::instance::Instance;
//! use u_crew::scheduler::{DutyBounds, Insertions};
//!
//! let json = r#"{
//!     "regulations": {"total_driving": 480, "continuous_driving": 240,
//!                     "break_time": 30, "shift_span": 600},
//!     "trips": [
//!         {"trip": "1", "initial_depot": "A", "final_depot": "B", "time": "06:00", "trip_duration": 50},
//!         {"trip": "2", "initial_depot": "B", "final_depot": "A", "time": "07:00", "trip_duration": 50},
//!         {"trip": "3", "initial_depot": "A", "final_depot": "B", "time": "06:30", "trip_duration": 50}
//!     ]
//! }"#;
//!
//! let instance = Instance::from_json_str(json).unwrap();
//! let solution = Insertions::new().solve_instance(&instance);
//! let bounds = DutyBounds::new(&instance.trips, &instance.regulations, &solution);
//!
//! assert!(solution.is_complete());
//! assert_eq!(solution.duty_count(), 2);
//! assert!(bounds.lower <= bounds.upper);
//! ```
//!
//! # Architecture
//!
//! This crate sits at Layer 3 (Frameworks) in the U-Engine ecosystem. It
//! produces candidate solutions and bounds only; exact optimization of the
//! duty count belongs to a solver layer that consumes [`models::Solution`].
//!
//! # References
//!
//! - Wren & Rousseau (1995), "Bus Driver Scheduling — An Overview"
//! - Desrochers & Soumis (1989), "A Column Generation Approach to the
//!   Urban Transit Crew Scheduling Problem"

pub mod error;
pub mod instance;
pub mod models;
pub mod scheduler;
pub mod time;
pub mod validation;

pub use error::{CrewError, Result};
