//! Per-stop utilization snapshots.
//!
//! A vehicle records one row per stop visit, taken after boarding
//! finishes and before it departs.  The log is append-only; analysis
//! and export read it back in recording order.

use mship_core::ids::{StopId, VehicleId};
use mship_core::time::SimTime;

/// One departure-time observation at a stop.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Instant the vehicle departed the stop.
    pub time: SimTime,
    /// Vehicle that took the observation.
    pub vehicle: VehicleId,
    /// Stop being departed.
    pub stop: StopId,
    /// Passengers on board at departure.
    pub onboard: u32,
    /// Seat capacity of the vehicle.
    pub capacity: u32,
    /// Passengers boarded during this visit.
    pub picked_up: u32,
    /// Passengers alighted during this visit.
    pub dropped_off: u32,
    /// Robots riding along at departure.
    pub robots: u32,
}

impl Snapshot {
    /// Onboard share of seat capacity at departure.
    pub fn utilization(&self) -> f64 {
        f64::from(self.onboard) / f64::from(self.capacity)
    }
}

/// Append-only log of every snapshot taken during a run.
#[derive(Debug, Default)]
pub struct SnapshotLog {
    rows: Vec<Snapshot>,
}

impl SnapshotLog {
    pub fn new() -> SnapshotLog {
        SnapshotLog::default()
    }

    pub fn record(&mut self, row: Snapshot) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in recording order.
    pub fn rows(&self) -> &[Snapshot] {
        &self.rows
    }
}
