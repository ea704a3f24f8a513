//! Top-level run configuration.

use crate::{ConfigError, ConfigResult, TimeBand};

// ── Timings ───────────────────────────────────────────────────────────────────

/// Service timing bands shared by every vehicle and robot in a run.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timings {
    /// Dwell at an intermediate stop.
    pub stop_dwell: TimeBand,
    /// Layover at a terminus stop; doubles as the inter-trip interval on
    /// loop routes.
    pub terminus_layover: TimeBand,
    /// Robot travel from its drop stop to the delivery address.
    pub robot_outbound: TimeBand,
    /// Robot travel back to the stop after delivering.
    pub robot_return: TimeBand,
}

impl Timings {
    fn validate(&self) -> ConfigResult<()> {
        for band in [
            self.stop_dwell,
            self.terminus_layover,
            self.robot_outbound,
            self.robot_return,
        ] {
            // Re-validate: the fields are pub, so literals can bypass TimeBand::new.
            TimeBand::new(band.lo, band.hi)?;
        }
        Ok(())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Engine-level knobs for one simulation run.
///
/// Typically built in the application crate and passed to `SimBuilder`; the
/// route network and fleet plan are configured separately.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Simulation horizon, in minutes.  Events scheduled at or past this
    /// instant are never dispatched.
    pub horizon_min: f64,

    /// Master RNG seed.  The same seed always produces identical records.
    pub seed: u64,

    /// Passengers arriving after this instant are discarded — no vehicle
    /// would serve them before the horizon.
    pub passenger_cutoff_min: f64,

    /// The package source stops producing at this instant.
    pub package_cutoff_min: f64,

    /// Mean package arrivals per minute at the warehouse.  Zero disables
    /// the package flow entirely.
    pub package_rate_per_min: f64,

    /// Number of delivery robots pooled at the warehouse.
    pub robot_pool: u32,

    /// Dwell/layover/robot timing bands.
    pub timings: Timings,
}

impl SimConfig {
    /// Fail-fast validation: a bad value here is a data-consistency bug, not
    /// a runtime condition.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.horizon_min.is_finite() || self.horizon_min <= 0.0 {
            return Err(ConfigError::BadHorizon { horizon: self.horizon_min });
        }
        for (name, value) in [
            ("passenger_cutoff_min", self.passenger_cutoff_min),
            ("package_cutoff_min", self.package_cutoff_min),
        ] {
            if !value.is_finite() || value < 0.0 || value > self.horizon_min {
                return Err(ConfigError::BadCutoff {
                    name,
                    value,
                    horizon: self.horizon_min,
                });
            }
        }
        if !self.package_rate_per_min.is_finite() || self.package_rate_per_min < 0.0 {
            return Err(ConfigError::BadRate { rate: self.package_rate_per_min });
        }
        self.timings.validate()
    }
}
