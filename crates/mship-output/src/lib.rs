//! `mship-output` — run record export for the mship transit simulator.
//!
//! Two backends are provided, one behind a Cargo feature:
//!
//! | Feature   | Backend | Files created                                              |
//! |-----------|---------|------------------------------------------------------------|
//! | *(none)*  | CSV     | `passengers.csv`, `packages.csv`, `vehicle_snapshots.csv`  |
//! | `parquet` | Parquet | same three tables as `.parquet` (SNAPPY)                   |
//!
//! Both backends implement [`OutputWriter`]; [`export_world`] drives one
//! from a finished run's `World`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mship_output::{CsvWriter, export_world};
//!
//! let report = sim.run()?;
//! let mut writer = CsvWriter::new(Path::new("./output"))?;
//! export_world(&mut writer, sim.world())?;
//! ```

pub mod csv;
pub mod error;
pub mod export;
pub mod row;
pub mod writer;

#[cfg(feature = "parquet")]
pub mod parquet;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use export::{export_world, package_rows, passenger_rows, snapshot_rows};
pub use row::{PackageRow, PassengerRow, SnapshotRow};
pub use writer::OutputWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
