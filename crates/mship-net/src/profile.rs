//! Time-of-day demand profile.
//!
//! The profile is a table of per-minute weights across the service day,
//! summing to 1.0.  A passenger source's instantaneous arrival rate is
//! `weight_at(now) × expected daily demand` for its stop, so the expected
//! total over the day equals the configured demand regardless of shape.

use mship_core::SimTime;

use crate::{NetError, NetResult};

/// How far the weight sum may drift from 1.0 before the profile is rejected.
const NORMALIZATION_TOLERANCE: f64 = 1e-6;

/// Per-minute demand weights over the service day.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceProfile {
    start_hour: u32,
    weights:    Vec<f64>,
}

impl ServiceProfile {
    /// Build from per-minute weights.  Weights must be finite, non-negative,
    /// non-empty, and sum to 1.0 within [`NORMALIZATION_TOLERANCE`].
    pub fn from_minutes(start_hour: u32, weights: Vec<f64>) -> NetResult<ServiceProfile> {
        if weights.is_empty() {
            return Err(NetError::EmptyProfile);
        }
        for (index, &weight) in weights.iter().enumerate() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(NetError::BadWeight { index, weight });
            }
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > NORMALIZATION_TOLERANCE {
            return Err(NetError::UnnormalizedProfile { sum });
        }
        Ok(ServiceProfile { start_hour, weights })
    }

    /// Build from per-hour shares, spreading each hour's share uniformly over
    /// its 60 minutes.
    pub fn from_hourly(start_hour: u32, shares: &[f64]) -> NetResult<ServiceProfile> {
        let mut weights = Vec::with_capacity(shares.len() * 60);
        for &share in shares {
            weights.extend(std::iter::repeat_n(share / 60.0, 60));
        }
        ServiceProfile::from_minutes(start_hour, weights)
    }

    /// The weight in effect at `now`.  Zero before minute 0 and after the
    /// service day ends, which is what makes late-evening sources fall back
    /// to their fixed probe interval.
    pub fn weight_at(&self, now: SimTime) -> f64 {
        if now.0 < 0.0 {
            return 0.0;
        }
        self.weights.get(now.0 as usize).copied().unwrap_or(0.0)
    }

    /// Length of the service day in minutes.
    pub fn service_minutes(&self) -> usize {
        self.weights.len()
    }

    /// Wall-clock hour at which minute 0 falls, for human-readable reports.
    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }
}
