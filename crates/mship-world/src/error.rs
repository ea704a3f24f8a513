//! World-state error type.
//!
//! Every variant marks a broken run invariant, not a recoverable
//! condition.  Processes that hit one abort the whole run, so each
//! message carries the ids needed to reconstruct what went wrong.

use mship_core::ids::{PackageId, PassengerId, VehicleId};
use mship_core::time::SimTime;
use thiserror::Error;

use crate::packages::PackageStatus;

/// Invariant breaches raised by ledger and depot mutations.
#[derive(Debug, Error)]
pub enum WorldError {
    /// A pickup stamped earlier than the passenger joined the queue.
    #[error("{passenger} picked up at {at} before arriving at {arrival}")]
    PickupBeforeArrival {
        passenger: PassengerId,
        at:        SimTime,
        arrival:   SimTime,
    },

    /// A second pickup for a passenger already on board.
    #[error("{passenger} picked up twice")]
    DoublePickup { passenger: PassengerId },

    /// A dropoff for a passenger who never boarded.
    #[error("{passenger} dropped off without a pickup")]
    DropoffWithoutPickup { passenger: PassengerId },

    /// A second dropoff for a passenger already served.
    #[error("{passenger} dropped off twice")]
    DoubleDropoff { passenger: PassengerId },

    /// A dropoff that does not land strictly after the pickup.
    #[error("{passenger} dropped off at {at}, not after the pickup at {pickup}")]
    RideNotForward {
        passenger: PassengerId,
        at:        SimTime,
        pickup:    SimTime,
    },

    /// A package status change outside at-depot -> onboard -> delivered.
    #[error("{package} cannot move from {from} to {to}")]
    BadPackageTransition {
        package: PackageId,
        from:    PackageStatus,
        to:      PackageStatus,
    },

    /// More robots handed back than the depot ever minted.
    #[error("robot returned to a depot already holding all {total} of its robots")]
    PoolOverflow { total: u32 },

    /// A retirement stamped on a vehicle that already retired.
    #[error("{vehicle} retired twice")]
    DoubleRetire { vehicle: VehicleId },
}

pub type WorldResult<T> = Result<T, WorldError>;
