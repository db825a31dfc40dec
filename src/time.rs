//! Clock-time utilities.
//!
//! All times in this crate are integer minutes since midnight. The
//! horizon is one service day, `[0, 1440]`; a value of 1440 is the
//! following midnight. End times are never wrapped: a trip starting at
//! 23:30 and lasting 60 minutes ends at 1470.

use crate::error::{CrewError, Result};
use crate::models::TrafficProfile;

/// Minutes in one service day.
pub const MINUTES_PER_DAY: i64 = 1440;

/// Parses an `"HH:MM"` clock time into minutes since midnight.
///
/// # Errors
/// [`CrewError::InvalidTimeFormat`] when the text is not two
/// colon-separated integers, the hour is outside `[0, 23]`, or the
/// minute is outside `[0, 59]`.
///
/// # Example
/// ```
/// use u_crew::time::parse_time;
///
/// assert_eq!(parse_time("06:45").unwrap(), 405);
/// assert!(parse_time("24:00").is_err());
/// ```
pub fn parse_time(text: &str) -> Result<i64> {
    let invalid = |reason| CrewError::InvalidTimeFormat {
        input: text.to_string(),
        reason,
    };

    let (h, m) = text
        .trim()
        .split_once(':')
        .ok_or_else(|| invalid("expected HH:MM"))?;
    let hours: i64 = h.parse().map_err(|_| invalid("hours are not a number"))?;
    let minutes: i64 = m.parse().map_err(|_| invalid("minutes are not a number"))?;

    if !(0..=23).contains(&hours) {
        return Err(invalid("hours should be between 0 and 23"));
    }
    if !(0..=59).contains(&minutes) {
        return Err(invalid("minutes should be between 0 and 59"));
    }

    Ok(hours * 60 + minutes)
}

/// Formats minutes since midnight as `"HH:MM"`.
///
/// 1440 (the following midnight) formats as `"00:00"`.
///
/// # Errors
/// [`CrewError::OutOfRangeMinutes`] when `minutes` is outside `[0, 1440]`.
pub fn format_time(minutes: i64) -> Result<String> {
    if !(0..=MINUTES_PER_DAY).contains(&minutes) {
        return Err(CrewError::OutOfRangeMinutes(minutes));
    }
    if minutes == MINUTES_PER_DAY {
        return Ok("00:00".to_string());
    }
    Ok(format!("{:02}:{:02}", minutes / 60, minutes % 60))
}

/// End time of a trip. No wraparound normalization is applied.
#[inline]
pub fn trip_end_time(start: i64, duration: i64) -> i64 {
    start + duration
}

/// Scales a timetabled duration by the traffic factor in effect at `start`.
///
/// The result is rounded to the nearest minute.
///
/// # Errors
/// [`CrewError::InvalidDuration`] when `duration` is negative.
pub fn weighted_trip_duration(start: i64, duration: i64, traffic: &TrafficProfile) -> Result<i64> {
    if duration < 0 {
        return Err(CrewError::InvalidDuration(duration));
    }
    let factor = traffic.factor_at(start);
    Ok((duration as f64 * factor).round() as i64)
}
