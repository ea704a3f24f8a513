//! Parquet output backend (feature `parquet`).
//!
//! Creates three files in the configured output directory:
//! - `passengers.parquet`
//! - `packages.parquet`
//! - `vehicle_snapshots.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Builder, StringBuilder, UInt32Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{OutputResult, PackageRow, PassengerRow, SnapshotRow};

fn passenger_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("passenger_id", DataType::UInt32,  false),
        Field::new("origin",       DataType::Utf8,    false),
        Field::new("destination",  DataType::Utf8,    false),
        Field::new("route",        DataType::Utf8,    false),
        Field::new("direction",    DataType::Utf8,    false),
        Field::new("arrival_min",  DataType::Float64, false),
        Field::new("pickup_min",   DataType::Float64, true),
        Field::new("dropoff_min",  DataType::Float64, true),
        Field::new("outcome",      DataType::Utf8,    false),
    ]))
}

fn package_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("package_id",    DataType::UInt32,  false),
        Field::new("stop",          DataType::Utf8,    false),
        Field::new("route",         DataType::Utf8,    false),
        Field::new("arrival_min",   DataType::Float64, false),
        Field::new("delivered_min", DataType::Float64, true),
        Field::new("status",        DataType::Utf8,    false),
    ]))
}

fn snapshot_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("time_min",    DataType::Float64, false),
        Field::new("vehicle",     DataType::Utf8,    false),
        Field::new("stop",        DataType::Utf8,    false),
        Field::new("onboard",     DataType::UInt32,  false),
        Field::new("capacity",    DataType::UInt32,  false),
        Field::new("picked_up",   DataType::UInt32,  false),
        Field::new("dropped_off", DataType::UInt32,  false),
        Field::new("robots",      DataType::UInt32,  false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes run records to three Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footers; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    passengers:       Option<ArrowWriter<File>>,
    packages:         Option<ArrowWriter<File>>,
    snapshots:        Option<ArrowWriter<File>>,
    passenger_schema: Arc<Schema>,
    package_schema:   Arc<Schema>,
    snapshot_schema:  Arc<Schema>,
}

impl ParquetWriter {
    /// Create all three Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let passenger_schema = passenger_schema();
        let package_schema = package_schema();
        let snapshot_schema = snapshot_schema();

        let passengers = ArrowWriter::try_new(
            File::create(dir.join("passengers.parquet"))?,
            Arc::clone(&passenger_schema),
            Some(snappy_props()),
        )?;
        let packages = ArrowWriter::try_new(
            File::create(dir.join("packages.parquet"))?,
            Arc::clone(&package_schema),
            Some(snappy_props()),
        )?;
        let snapshots = ArrowWriter::try_new(
            File::create(dir.join("vehicle_snapshots.parquet"))?,
            Arc::clone(&snapshot_schema),
            Some(snappy_props()),
        )?;

        Ok(Self {
            passengers: Some(passengers),
            packages: Some(packages),
            snapshots: Some(snapshots),
            passenger_schema,
            package_schema,
            snapshot_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_passengers(&mut self, rows: &[PassengerRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.passengers.as_mut() else {
            return Ok(());
        };

        let mut ids          = UInt32Builder::new();
        let mut origins      = StringBuilder::new();
        let mut destinations = StringBuilder::new();
        let mut routes       = StringBuilder::new();
        let mut directions   = StringBuilder::new();
        let mut arrivals     = Float64Builder::new();
        let mut pickups      = Float64Builder::new();
        let mut dropoffs     = Float64Builder::new();
        let mut outcomes     = StringBuilder::new();

        for row in rows {
            ids.append_value(row.passenger_id);
            origins.append_value(&row.origin);
            destinations.append_value(&row.destination);
            routes.append_value(&row.route);
            directions.append_value(row.direction);
            arrivals.append_value(row.arrival_min);
            pickups.append_option(row.pickup_min);
            dropoffs.append_option(row.dropoff_min);
            outcomes.append_value(row.outcome);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.passenger_schema),
            vec![
                Arc::new(ids.finish()),
                Arc::new(origins.finish()),
                Arc::new(destinations.finish()),
                Arc::new(routes.finish()),
                Arc::new(directions.finish()),
                Arc::new(arrivals.finish()),
                Arc::new(pickups.finish()),
                Arc::new(dropoffs.finish()),
                Arc::new(outcomes.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_packages(&mut self, rows: &[PackageRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.packages.as_mut() else {
            return Ok(());
        };

        let mut ids       = UInt32Builder::new();
        let mut stops     = StringBuilder::new();
        let mut routes    = StringBuilder::new();
        let mut arrivals  = Float64Builder::new();
        let mut delivered = Float64Builder::new();
        let mut statuses  = StringBuilder::new();

        for row in rows {
            ids.append_value(row.package_id);
            stops.append_value(&row.stop);
            routes.append_value(&row.route);
            arrivals.append_value(row.arrival_min);
            delivered.append_option(row.delivered_min);
            statuses.append_value(row.status);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.package_schema),
            vec![
                Arc::new(ids.finish()),
                Arc::new(stops.finish()),
                Arc::new(routes.finish()),
                Arc::new(arrivals.finish()),
                Arc::new(delivered.finish()),
                Arc::new(statuses.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[SnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.snapshots.as_mut() else {
            return Ok(());
        };

        let mut times       = Float64Builder::new();
        let mut vehicles    = StringBuilder::new();
        let mut stops       = StringBuilder::new();
        let mut onboard     = UInt32Builder::new();
        let mut capacity    = UInt32Builder::new();
        let mut picked_up   = UInt32Builder::new();
        let mut dropped_off = UInt32Builder::new();
        let mut robots      = UInt32Builder::new();

        for row in rows {
            times.append_value(row.time_min);
            vehicles.append_value(&row.vehicle);
            stops.append_value(&row.stop);
            onboard.append_value(row.onboard);
            capacity.append_value(row.capacity);
            picked_up.append_value(row.picked_up);
            dropped_off.append_value(row.dropped_off);
            robots.append_value(row.robots);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.snapshot_schema),
            vec![
                Arc::new(times.finish()),
                Arc::new(vehicles.finish()),
                Arc::new(stops.finish()),
                Arc::new(onboard.finish()),
                Arc::new(capacity.finish()),
                Arc::new(picked_up.finish()),
                Arc::new(dropped_off.finish()),
                Arc::new(robots.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.passengers.take() {
            w.close()?;
        }
        if let Some(w) = self.packages.take() {
            w.close()?;
        }
        if let Some(w) = self.snapshots.take() {
            w.close()?;
        }
        Ok(())
    }
}
