//! Ledger-to-row conversion.

use mship_world::World;

use crate::row::{PackageRow, PassengerRow, SnapshotRow};
use crate::writer::OutputWriter;
use crate::OutputResult;

/// All passenger records as export rows, in creation order.
pub fn passenger_rows(world: &World) -> Vec<PassengerRow> {
    world
        .passengers
        .iter()
        .map(|(id, p)| PassengerRow {
            passenger_id: id.0,
            origin:       world.net.stop(p.origin).name.clone(),
            destination:  world.net.stop(p.destination).name.clone(),
            route:        world.net.route(p.route).label().to_owned(),
            direction:    p.direction.as_str(),
            arrival_min:  p.arrival_time.0,
            pickup_min:   p.pickup_time().map(|t| t.0),
            dropoff_min:  p.dropoff_time().map(|t| t.0),
            outcome:      p.outcome().as_str(),
        })
        .collect()
}

/// All package records as export rows, in warehouse arrival order.
pub fn package_rows(world: &World) -> Vec<PackageRow> {
    world
        .packages
        .iter()
        .map(|(id, p)| PackageRow {
            package_id:    id.0,
            stop:          world.net.stop(p.stop).name.clone(),
            route:         world.net.route(p.route).label().to_owned(),
            arrival_min:   p.arrival_time.0,
            delivered_min: p.delivery_time().map(|t| t.0),
            status:        p.status().as_str(),
        })
        .collect()
}

/// The snapshot log as export rows, in recording order.
pub fn snapshot_rows(world: &World) -> Vec<SnapshotRow> {
    world
        .snapshots
        .rows()
        .iter()
        .map(|s| SnapshotRow {
            time_min:    s.time.0,
            vehicle:     world.fleet.get(s.vehicle).label.clone(),
            stop:        world.net.stop(s.stop).name.clone(),
            onboard:     s.onboard,
            capacity:    s.capacity,
            picked_up:   s.picked_up,
            dropped_off: s.dropped_off,
            robots:      s.robots,
        })
        .collect()
}

/// Export all three tables through `writer` and finish it.
pub fn export_world<W: OutputWriter>(writer: &mut W, world: &World) -> OutputResult<()> {
    writer.write_passengers(&passenger_rows(world))?;
    writer.write_packages(&package_rows(world))?;
    writer.write_snapshots(&snapshot_rows(world))?;
    writer.finish()
}
