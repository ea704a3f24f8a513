//! Package records and their three-state lifecycle ledger.
//!
//! Packages move strictly at-depot -> onboard -> delivered.  The ledger
//! owns the status field and rejects every other transition, so a claim
//! that double-loads a package or a robot that delivers one twice
//! surfaces as a hard error instead of a silently wrong count.

use std::fmt;

use mship_core::ids::{PackageId, RouteId, StopId};
use mship_core::time::SimTime;

use crate::error::{WorldError, WorldResult};

/// Lifecycle stage of a package.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PackageStatus {
    /// Waiting at the warehouse for a robot and a vehicle.
    AtDepot,
    /// Loaded on a robot riding a vehicle.
    Onboard,
    /// Handed over at its target stop.
    Delivered,
}

impl PackageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageStatus::AtDepot   => "at_depot",
            PackageStatus::Onboard   => "onboard",
            PackageStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One package, addressed to a stop on a specific route.
#[derive(Clone, Debug)]
pub struct Package {
    /// Target stop of the delivery.
    pub stop: StopId,
    /// Route whose vehicles can carry it there.
    pub route: RouteId,
    /// Instant it arrived at the warehouse.
    pub arrival_time: SimTime,
    status: PackageStatus,
    delivery_time: Option<SimTime>,
}

impl Package {
    pub fn status(&self) -> PackageStatus {
        self.status
    }

    /// Instant the robot handed it over, once delivered.
    pub fn delivery_time(&self) -> Option<SimTime> {
        self.delivery_time
    }
}

/// Append-only store of every package, indexed by [`PackageId`] in
/// warehouse arrival order.
#[derive(Debug, Default)]
pub struct PackageLedger {
    records: Vec<Package>,
}

impl PackageLedger {
    pub fn new() -> PackageLedger {
        PackageLedger::default()
    }

    /// Record a warehouse arrival and hand back the package id.
    pub fn create(&mut self, stop: StopId, route: RouteId, arrival_time: SimTime) -> PackageId {
        let id = PackageId(self.records.len() as u32);
        self.records.push(Package {
            stop,
            route,
            arrival_time,
            status: PackageStatus::AtDepot,
            delivery_time: None,
        });
        id
    }

    /// Move an at-depot package onto a robot.
    pub fn mark_onboard(&mut self, id: PackageId) -> WorldResult<()> {
        self.transition(id, PackageStatus::AtDepot, PackageStatus::Onboard)
    }

    /// Move an onboard package to delivered and stamp the handover instant.
    pub fn mark_delivered(&mut self, id: PackageId, at: SimTime) -> WorldResult<()> {
        self.transition(id, PackageStatus::Onboard, PackageStatus::Delivered)?;
        self.records[id.index()].delivery_time = Some(at);
        Ok(())
    }

    fn transition(&mut self, id: PackageId, from: PackageStatus, to: PackageStatus) -> WorldResult<()> {
        let record = &mut self.records[id.index()];
        if record.status != from {
            return Err(WorldError::BadPackageTransition {
                package: id,
                from: record.status,
                to,
            });
        }
        record.status = to;
        Ok(())
    }

    pub fn get(&self, id: PackageId) -> &Package {
        &self.records[id.index()]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = (PackageId, &Package)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, p)| (PackageId(i as u32), p))
    }

    /// Packages currently in the given lifecycle stage.
    pub fn count_in(&self, status: PackageStatus) -> usize {
        self.records.iter().filter(|p| p.status == status).count()
    }
}
