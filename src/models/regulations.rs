//! Labor regulation limits.
//!
//! One `Regulations` record is loaded per problem instance and shared
//! read-only by every duty.

use serde::{Deserialize, Serialize};

/// Driver labor limits, all in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regulations {
    /// Maximum cumulative driving within one duty.
    pub total_driving: i64,
    /// Maximum driving between two breaks.
    pub continuous_driving: i64,
    /// Length of a break; an idle gap at least this long counts as one.
    pub break_time: i64,
    /// Maximum elapsed time from a duty's first departure to its last arrival.
    pub shift_span: i64,
}

impl Regulations {
    /// Creates a regulation set.
    pub fn new(total_driving: i64, continuous_driving: i64, break_time: i64, shift_span: i64) -> Self {
        Self {
            total_driving,
            continuous_driving,
            break_time,
            shift_span,
        }
    }
}

impl Default for Regulations {
    /// Typical urban bus limits: 8h driving, 4h continuous, 30min break,
    /// 10h span.
    fn default() -> Self {
        Self::new(480, 240, 30, 600)
    }
}
