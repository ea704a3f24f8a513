//! Simulation time model.
//!
//! # Design
//!
//! Time is a real-valued count of simulated minutes since service start,
//! advanced only by the engine.  Dwell times, travel legs and stochastic
//! inter-arrival gaps are all fractional, so an integer tick would force a
//! sub-minute resolution choice on every caller; a plain `f64` carries the
//! original quantities exactly as configured.
//!
//! `SimTime` implements `Ord` via `f64::total_cmp`.  The constructors and
//! arithmetic keep NaN out (debug-checked), so the total order observed by
//! the event queue is the ordinary numeric one.

use std::fmt;
use std::ops::{Add, Sub};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulated timestamp, in minutes since service start.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Wrap a minute count.
    ///
    /// # Panics
    /// Panics in debug mode if `minutes` is NaN.
    #[inline]
    pub fn at(minutes: f64) -> SimTime {
        debug_assert!(!minutes.is_nan(), "SimTime must not be NaN");
        SimTime(minutes)
    }

    /// Minutes elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }

    /// Break the timestamp into whole (hour, minute) components past a given
    /// service start hour.  Useful for human-readable logging without a
    /// datetime library.
    pub fn clock_hm(self, service_start_hour: u32) -> (u32, u32) {
        let total_min = self.0.max(0.0) as u64 + u64::from(service_start_hour) * 60;
        (((total_min / 60) % 24) as u32, (total_min % 60) as u32)
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, minutes: f64) -> SimTime {
        SimTime::at(self.0 + minutes)
    }
}

impl Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.2}m", self.0)
    }
}

// ── TimeBand ──────────────────────────────────────────────────────────────────

/// A closed interval of durations in minutes, sampled uniformly.
///
/// Dwell, layover and robot travel delays are all configured as bands; a
/// zero-width band (`lo == hi`) makes the draw deterministic, which the
/// scenario tests rely on.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeBand {
    pub lo: f64,
    pub hi: f64,
}

impl TimeBand {
    /// Build a band, validating `0 ≤ lo ≤ hi` and finiteness.
    pub fn new(lo: f64, hi: f64) -> Result<TimeBand, crate::ConfigError> {
        if !lo.is_finite() || !hi.is_finite() || lo < 0.0 || hi < lo {
            return Err(crate::ConfigError::BadBand { lo, hi });
        }
        Ok(TimeBand { lo, hi })
    }

    /// A zero-width band that always yields `minutes`.
    pub fn fixed(minutes: f64) -> Result<TimeBand, crate::ConfigError> {
        TimeBand::new(minutes, minutes)
    }
}

impl fmt::Display for TimeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.2}, {:.2}]m", self.lo, self.hi)
    }
}
