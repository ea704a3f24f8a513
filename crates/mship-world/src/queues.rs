//! Per-stop FIFO queues, densely indexed.
//!
//! The network resolves every (route, direction, stop) to a [`QueueId`]
//! and every (route, stop) to a [`DockId`] at build time, so this module
//! is nothing but two flat `Vec<VecDeque<_>>` keyed by those ids.  No
//! maps, no name lookups on the hot path.
//!
//! # Design notes
//!
//! Queues only ever pop from the front.  Boarding order, robot handoff
//! order and the horizon drain all inherit their determinism from that
//! one rule plus the dense id order.

use std::collections::VecDeque;

use mship_core::ids::{DockId, PassengerId, QueueId, RobotId};

/// Waiting passengers and docked robots for every stop in the network.
#[derive(Debug)]
pub struct StopQueues {
    /// One passenger queue per (route, direction, stop), by [`QueueId`].
    passengers: Vec<VecDeque<PassengerId>>,
    /// One robot dock per (route, stop), by [`DockId`].
    robots: Vec<VecDeque<RobotId>>,
}

impl StopQueues {
    /// Empty queues sized for a network with the given queue and dock counts.
    pub fn new(queue_count: usize, dock_count: usize) -> StopQueues {
        StopQueues {
            passengers: (0..queue_count).map(|_| VecDeque::new()).collect(),
            robots:     (0..dock_count).map(|_| VecDeque::new()).collect(),
        }
    }

    /// Append a passenger to the back of a queue.
    pub fn enqueue(&mut self, queue: QueueId, passenger: PassengerId) {
        self.passengers[queue.index()].push_back(passenger);
    }

    /// Pop up to `max` passengers from the front of a queue, in queue order.
    pub fn take_up_to(&mut self, queue: QueueId, max: usize) -> Vec<PassengerId> {
        let q = &mut self.passengers[queue.index()];
        let n = max.min(q.len());
        q.drain(..n).collect()
    }

    /// Number of passengers currently waiting in a queue.
    pub fn queue_len(&self, queue: QueueId) -> usize {
        self.passengers[queue.index()].len()
    }

    /// Park a robot at the back of a dock.
    pub fn dock_push(&mut self, dock: DockId, robot: RobotId) {
        self.robots[dock.index()].push_back(robot);
    }

    /// Pop up to `max` robots from the front of a dock, in docking order.
    pub fn dock_take_up_to(&mut self, dock: DockId, max: usize) -> Vec<RobotId> {
        let d = &mut self.robots[dock.index()];
        let n = max.min(d.len());
        d.drain(..n).collect()
    }

    /// Number of robots currently parked at a dock.
    pub fn dock_len(&self, dock: DockId) -> usize {
        self.robots[dock.index()].len()
    }

    /// Total passengers waiting across all queues.
    pub fn waiting_total(&self) -> usize {
        self.passengers.iter().map(VecDeque::len).sum()
    }

    /// Empty every passenger queue, returning the leftovers in dense
    /// queue-id order, front to back within each queue.  Called once at
    /// the horizon to account for passengers no vehicle ever reached.
    pub fn drain_passengers(&mut self) -> Vec<PassengerId> {
        self.passengers
            .iter_mut()
            .flat_map(|q| q.drain(..))
            .collect()
    }
}
