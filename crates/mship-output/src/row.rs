//! Plain data row types written by output backends.
//!
//! Ids are resolved to names at export time so the tables read on their
//! own, without the network at hand.

/// One passenger's full journey record.
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerRow {
    pub passenger_id: u32,
    pub origin:       String,
    pub destination:  String,
    pub route:        String,
    pub direction:    &'static str,
    pub arrival_min:  f64,
    /// Empty in the files when the passenger never boarded.
    pub pickup_min:   Option<f64>,
    /// Empty in the files when the passenger never alighted.
    pub dropoff_min:  Option<f64>,
    /// `served`, `riding`, or `missed`.
    pub outcome:      &'static str,
}

/// One package's lifecycle record.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageRow {
    pub package_id:    u32,
    pub stop:          String,
    pub route:         String,
    pub arrival_min:   f64,
    /// Empty in the files when the package was never handed over.
    pub delivered_min: Option<f64>,
    /// `at_depot`, `onboard`, or `delivered`.
    pub status:        &'static str,
}

/// One per-stop utilization observation, taken at departure.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRow {
    pub time_min:    f64,
    pub vehicle:     String,
    pub stop:        String,
    pub onboard:     u32,
    pub capacity:    u32,
    pub picked_up:   u32,
    pub dropped_off: u32,
    pub robots:      u32,
}
