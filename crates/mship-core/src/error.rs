//! Configuration error type.
//!
//! Sub-crates define their own error enums and either convert `ConfigError`
//! in via `#[from]` or wrap it as one variant; `mship-sim` aggregates them
//! all at the run boundary.

use thiserror::Error;

/// Fail-fast validation errors for run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("horizon must be finite and positive, got {horizon}")]
    BadHorizon { horizon: f64 },

    #[error("{name} = {value} must lie within [0, horizon = {horizon}]")]
    BadCutoff {
        name: &'static str,
        value: f64,
        horizon: f64,
    },

    #[error("time band [{lo}, {hi}] must satisfy 0 <= lo <= hi and be finite")]
    BadBand { lo: f64, hi: f64 },

    #[error("package rate must be finite and non-negative, got {rate}")]
    BadRate { rate: f64 },
}

/// Shorthand result type for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;
