//! The world: every piece of mutable run state in one struct.
//!
//! Processes receive `&mut World` for the duration of one resume, so
//! anything a vehicle, source or scheduler touches lives here.  Fields
//! are public; the structs behind them guard their own invariants.

use mship_core::ids::{LockId, PackageId, PassengerId};
use mship_net::Network;

use crate::depot::Depot;
use crate::fleet::FleetBoard;
use crate::packages::PackageLedger;
use crate::passengers::PassengerLedger;
use crate::queues::StopQueues;
use crate::snapshot::SnapshotLog;

/// Entities still waiting when the clock froze, in deterministic
/// drain order.
#[derive(Debug, Default)]
pub struct Missed {
    /// Queued passengers, dense queue-id order.
    pub passengers: Vec<PassengerId>,
    /// Warehouse packages, arrival order.
    pub packages: Vec<PackageId>,
}

/// Immutable network plus all mutable state of one run.
#[derive(Debug)]
pub struct World {
    /// Resolved route network the run plays out on.
    pub net: Network,
    /// Passenger queues and robot docks, per stop.
    pub queues: StopQueues,
    /// Warehouse robot pool and waiting packages.
    pub depot: Depot,
    /// Every passenger ever queued.
    pub passengers: PassengerLedger,
    /// Every package ever received.
    pub packages: PackageLedger,
    /// Every vehicle ever launched.
    pub fleet: FleetBoard,
    /// Per-stop utilization observations.
    pub snapshots: SnapshotLog,
}

impl World {
    /// Fresh state for `net`, with the depot guarded by `depot_lock`
    /// and `robot_pool` robots minted idle.
    pub fn new(net: Network, depot_lock: LockId, robot_pool: u32) -> World {
        let queues = StopQueues::new(net.queue_count(), net.dock_count());
        World {
            net,
            queues,
            depot: Depot::new(depot_lock, robot_pool),
            passengers: PassengerLedger::new(),
            packages: PackageLedger::new(),
            fleet: FleetBoard::new(),
            snapshots: SnapshotLog::new(),
        }
    }

    /// Sweep every queue and the warehouse after the clock froze.
    /// Whatever comes out was never served.
    pub fn drain_missed(&mut self) -> Missed {
        Missed {
            passengers: self.queues.drain_passengers(),
            packages:   self.depot.drain_waiting(),
        }
    }
}
