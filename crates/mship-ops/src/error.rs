//! Fleet-plan validation errors.
//!
//! All fail-fast: a bad plan is a data-consistency bug caught before
//! the engine dispatches a single event.

use thiserror::Error;

/// Rejections raised by [`FleetPlan::validate`](crate::FleetPlan::validate).
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("phase {index} offset {offset} must be finite, non-negative, and after the previous phase")]
    BadOffset { index: usize, offset: f64 },

    #[error("phase {index} neither launches nor retires any vehicles")]
    EmptyPhase { index: usize },

    #[error("launch group '{label}' has a zero vehicle count")]
    EmptyGroup { label: String },

    #[error("launch group '{label}' run duration {minutes} must be finite and positive")]
    BadRunDuration { label: String, minutes: f64 },

    #[error("launch group '{label}' needs a positive passenger capacity")]
    NoCapacity { label: String },

    #[error("launch group '{label}' references route {route}, but only {count} routes exist")]
    UnknownRoute {
        label: String,
        route: u32,
        count: usize,
    },
}

pub type PlanResult<T> = Result<T, PlanError>;
