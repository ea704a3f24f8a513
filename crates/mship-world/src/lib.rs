//! mship-world — mutable run state shared by every simulation process.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | `queues`     | Dense per-stop passenger queues and robot docks       |
//! | `passengers` | Passenger records and their timestamp ledger          |
//! | `packages`   | Package records and their lifecycle ledger            |
//! | `depot`      | Warehouse robot pool and atomic claim logic           |
//! | `fleet`      | Vehicle registry and early-shutdown flags             |
//! | `snapshot`   | Per-stop utilization log                              |
//! | `world`      | The [`World`] struct tying it all together            |
//! | `error`      | [`WorldError`] invariant-breach type                  |
//!
//! # Design notes
//!
//! State is dumb on purpose.  Nothing in this crate sleeps, spawns or
//! acquires; processes in the operations crate drive every mutation and
//! this crate only enforces that the mutations are legal.  Ledgers are
//! the sole writers of their status fields, which is what turns a logic
//! bug upstream into a typed error instead of a corrupt result table.

pub mod depot;
pub mod error;
pub mod fleet;
pub mod packages;
pub mod passengers;
pub mod queues;
pub mod snapshot;
pub mod world;

#[cfg(test)]
mod tests;

pub use depot::{Claim, Depot};
pub use error::{WorldError, WorldResult};
pub use fleet::{FleetBoard, VehicleEntry};
pub use packages::{Package, PackageLedger, PackageStatus};
pub use passengers::{Passenger, PassengerLedger, PassengerOutcome};
pub use queues::StopQueues;
pub use snapshot::{Snapshot, SnapshotLog};
pub use world::{Missed, World};
