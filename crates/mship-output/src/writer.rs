//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, PackageRow, PassengerRow, SnapshotRow};

/// Trait implemented by the CSV and Parquet writers.
///
/// Call order is free, but [`finish`][OutputWriter::finish] must come
/// last — Parquet files are unreadable without their footer.
pub trait OutputWriter {
    /// Write a batch of passenger journey rows.
    fn write_passengers(&mut self, rows: &[PassengerRow]) -> OutputResult<()>;

    /// Write a batch of package lifecycle rows.
    fn write_packages(&mut self, rows: &[PackageRow]) -> OutputResult<()>;

    /// Write a batch of per-stop utilization rows.
    fn write_snapshots(&mut self, rows: &[SnapshotRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
