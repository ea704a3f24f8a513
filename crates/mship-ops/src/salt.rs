//! Stable RNG stream salts.
//!
//! Each process family gets its own tag byte, and each process within a
//! family is salted by a fact that survives configuration changes (its
//! queue, vehicle or package id).  Adding a route or an extra launch
//! therefore never shifts the draws of existing streams.

use mship_core::{PackageId, QueueId, VehicleId};

const fn salt(tag: u64, index: u64) -> u64 {
    (tag << 56) | index
}

pub(crate) fn passenger_source(queue: QueueId) -> u64 {
    salt(1, queue.0 as u64)
}

pub(crate) fn package_source() -> u64 {
    salt(2, 0)
}

pub(crate) fn vehicle(id: VehicleId) -> u64 {
    salt(3, id.0 as u64)
}

pub(crate) fn robot_run(package: PackageId) -> u64 {
    salt(4, package.0 as u64)
}
