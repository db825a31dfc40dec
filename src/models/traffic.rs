//! Time windows and traffic weighting bands.
//!
//! Timetabled trip durations are nominal. During congested periods the
//! instance builder scales them by the factor of the band covering the
//! trip's start time.
//!
//! # Bands
//! A profile's windows are non-empty and pairwise disjoint, so at most
//! one band covers any minute. Times outside every band keep factor 1.0.

use serde::{Deserialize, Serialize};

use crate::error::{CrewError, Result};

/// Minutes `[start, end)` of the service day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    /// First minute in the window.
    pub start: i64,
    /// First minute after the window.
    pub end: i64,
}

impl TimeWindow {
    /// Window from `start` up to, not including, `end`.
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Minutes covered; zero or negative for a degenerate window.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether minute `time` falls inside.
    #[inline]
    pub fn contains(&self, time: i64) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether the windows share at least one minute. Touching windows
    /// (`a.end == b.start`) do not.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A congestion band: trips starting inside `window` take `factor` times
/// their nominal duration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrafficBand {
    /// Period the factor applies to.
    pub window: TimeWindow,
    /// Duration multiplier (> 0).
    pub factor: f64,
}

impl TrafficBand {
    /// Creates a band, rejecting non-finite or non-positive factors.
    pub fn new(window: TimeWindow, factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(CrewError::InvalidTrafficFactor(factor));
        }
        Ok(Self { window, factor })
    }
}

/// Ordered set of traffic bands for one service day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TrafficProfile {
    /// Disjoint bands.
    pub bands: Vec<TrafficBand>,
}

impl TrafficProfile {
    /// Creates an empty profile (every factor is 1.0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a band.
    pub fn with_band(mut self, band: TrafficBand) -> Self {
        self.bands.push(band);
        self
    }

    /// Factor in effect at `time`: the covering band's, else 1.0.
    pub fn factor_at(&self, time: i64) -> f64 {
        self.bands
            .iter()
            .find(|b| b.window.contains(time))
            .map(|b| b.factor)
            .unwrap_or(1.0)
    }

    /// Checks every band factor and window. Deserialized profiles bypass
    /// [`TrafficBand::new`], so loaders call this before use.
    ///
    /// # Errors
    /// - [`CrewError::InvalidTrafficFactor`] for a bad factor
    /// - [`CrewError::InvalidTrafficBands`] for an empty window or two
    ///   overlapping windows
    pub fn check(&self) -> Result<()> {
        for (i, band) in self.bands.iter().enumerate() {
            TrafficBand::new(band.window, band.factor)?;

            let w = band.window;
            if w.duration() <= 0 {
                return Err(CrewError::InvalidTrafficBands(format!(
                    "band {i} window {}..{} is empty",
                    w.start, w.end
                )));
            }
            if let Some(j) = self.bands[..i]
                .iter()
                .position(|other| other.window.overlaps(&w))
            {
                return Err(CrewError::InvalidTrafficBands(format!(
                    "band {i} overlaps band {j}"
                )));
            }
        }
        Ok(())
    }

    /// Whether the profile has no bands.
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}
