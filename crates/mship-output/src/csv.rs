//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `passengers.csv`
//! - `packages.csv`
//! - `vehicle_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, PackageRow, PassengerRow, SnapshotRow};

/// Absent timestamps become empty CSV fields.
fn opt(minutes: Option<f64>) -> String {
    minutes.map(|m| m.to_string()).unwrap_or_default()
}

/// Writes run records to three CSV files.
pub struct CsvWriter {
    passengers: Writer<File>,
    packages:   Writer<File>,
    snapshots:  Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut passengers = Writer::from_path(dir.join("passengers.csv"))?;
        passengers.write_record([
            "passenger_id", "origin", "destination", "route", "direction",
            "arrival_min", "pickup_min", "dropoff_min", "outcome",
        ])?;

        let mut packages = Writer::from_path(dir.join("packages.csv"))?;
        packages.write_record([
            "package_id", "stop", "route", "arrival_min", "delivered_min", "status",
        ])?;

        let mut snapshots = Writer::from_path(dir.join("vehicle_snapshots.csv"))?;
        snapshots.write_record([
            "time_min", "vehicle", "stop", "onboard", "capacity",
            "picked_up", "dropped_off", "robots",
        ])?;

        Ok(Self {
            passengers,
            packages,
            snapshots,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_passengers(&mut self, rows: &[PassengerRow]) -> OutputResult<()> {
        for row in rows {
            self.passengers.write_record(&[
                row.passenger_id.to_string(),
                row.origin.clone(),
                row.destination.clone(),
                row.route.clone(),
                row.direction.to_string(),
                row.arrival_min.to_string(),
                opt(row.pickup_min),
                opt(row.dropoff_min),
                row.outcome.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_packages(&mut self, rows: &[PackageRow]) -> OutputResult<()> {
        for row in rows {
            self.packages.write_record(&[
                row.package_id.to_string(),
                row.stop.clone(),
                row.route.clone(),
                row.arrival_min.to_string(),
                opt(row.delivered_min),
                row.status.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[SnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.time_min.to_string(),
                row.vehicle.clone(),
                row.stop.clone(),
                row.onboard.to_string(),
                row.capacity.to_string(),
                row.picked_up.to_string(),
                row.dropped_off.to_string(),
                row.robots.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.passengers.flush()?;
        self.packages.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
