use thiserror::Error;

/// Network configuration errors.
///
/// All of these indicate inconsistent static data and fail the build before
/// any process runs; none of them can occur mid-simulation.
#[derive(Debug, Error)]
pub enum NetError {
    #[error("route {label:?} declared twice")]
    DuplicateRoute { label: String },

    #[error("route {label:?} needs at least two stops, got {got}")]
    TooFewStops { label: String, got: usize },

    #[error("route {label:?} visits stop {stop:?} twice")]
    DuplicateStop { label: String, stop: String },

    #[error("route {label:?} edge {index} has non-positive travel time {minutes}")]
    BadEdge {
        label:   String,
        index:   usize,
        minutes: f64,
    },

    #[error("route {label:?} stop {stop:?} has invalid daily demand {demand}")]
    BadDemand {
        label:  String,
        stop:   String,
        demand: f64,
    },

    #[error("stop {stop:?} has invalid attraction factor {factor}")]
    BadAttraction { stop: String, factor: f64 },

    #[error("network built without a demand profile")]
    MissingProfile,

    #[error("demand profile has no weights")]
    EmptyProfile,

    #[error("demand profile weight {index} is invalid: {weight}")]
    BadWeight { index: usize, weight: f64 },

    #[error("demand profile weights sum to {sum}, expected 1.0")]
    UnnormalizedProfile { sum: f64 },

    #[error("demand profile hours must be consecutive, got {prev} then {next}")]
    NonConsecutiveHours { prev: u32, next: u32 },

    #[error("unknown topology {value:?} (expected \"reversing\" or \"loop\")")]
    BadTopology { value: String },

    #[error("route {label:?} mixes topologies across its rows")]
    MixedTopology { label: String },

    #[error("unknown stop {name:?}")]
    UnknownStop { name: String },

    #[error("unknown route {label:?}")]
    UnknownRoute { label: String },

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
}

pub type NetResult<T> = Result<T, NetError>;
