//! Crate error type.
//!
//! All failures surface while preparing an instance (parsing clock times,
//! weighting durations, reading instance files). Duty construction itself
//! is infallible: infeasibility is a `false` from [`Duty::can_accept`],
//! not an error.
//!
//! [`Duty::can_accept`]: crate::models::Duty::can_accept

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while preparing a crew scheduling instance.
#[derive(Debug, Error)]
pub enum CrewError {
    /// A clock time was not `"HH:MM"` or its fields were out of range.
    #[error("invalid time '{input}': {reason}")]
    InvalidTimeFormat {
        /// The offending input text.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// A minute offset outside `[0, 1440]` was formatted as a clock time.
    #[error("minutes since midnight should be between 0 and 1440, got {0}")]
    OutOfRangeMinutes(i64),

    /// A negative trip duration was supplied to duration weighting.
    #[error("trip duration must not be negative, got {0}")]
    InvalidDuration(i64),

    /// A traffic factor was not a finite positive number.
    #[error("traffic factor must be finite and positive, got {0}")]
    InvalidTrafficFactor(f64),

    /// Traffic bands have empty or overlapping windows.
    #[error("invalid traffic bands: {0}")]
    InvalidTrafficBands(String),

    /// Regulation limits are unusable (zero or negative).
    #[error("invalid regulations: {0}")]
    InvalidRegulations(String),

    /// The trip list failed integrity checks.
    #[error("instance failed validation with {} error(s)", .0.len())]
    InvalidInstance(Vec<ValidationError>),

    /// Random instance generation was asked for an impossible shape.
    #[error("invalid generator config: {0}")]
    InvalidGeneratorConfig(String),

    /// Reading an instance file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An instance file was not valid JSON for the expected shape.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CrewError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_error_messages() {
        let e = CrewError::InvalidTimeFormat {
            input: "25:00".into(),
            reason: "hours should be between 0 and 23",
        };
        assert_eq!(
            e.to_string(),
            "invalid time '25:00': hours should be between 0 and 23"
        );

        assert!(CrewError::OutOfRangeMinutes(1500)
            .to_string()
            .contains("1500"));
        assert!(CrewError::InvalidDuration(-5).to_string().contains("-5"));
    }

    #[test]
    fn test_invalid_instance_counts_errors() {
        let e = CrewError::InvalidInstance(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "a"),
            ValidationError::new(ValidationErrorKind::NotSorted, "b"),
        ]);
        assert_eq!(e.to_string(), "instance failed validation with 2 error(s)");
    }
}
