//! The warehouse depot: idle robot pool plus the waiting-package queue.
//!
//! Everything in here assumes the caller holds the depot's engine lock.
//! The engine never grants that lock across a time step, so a claim or
//! a robot return always runs as one atomic slice of simulated time and
//! two vehicles can never pair the same robot or package.
//!
//! # Design notes
//!
//! The depot exposes exactly two mutations to vehicles, [`Depot::claim`]
//! and [`Depot::return_robots`].  Package status changes ride along
//! inside `claim` so the waiting queue and the ledger can never
//! disagree about what is still at the depot.

use std::collections::VecDeque;

use mship_core::ids::{LockId, PackageId, RobotId, RouteId};
use mship_core::time::SimTime;

use crate::error::{WorldError, WorldResult};
use crate::packages::PackageLedger;

/// One robot paired with the package it will deliver.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Claim {
    pub robot:   RobotId,
    pub package: PackageId,
}

/// Robot pool and waiting packages at the warehouse.
#[derive(Debug)]
pub struct Depot {
    /// Engine lock serializing claims and returns.
    lock: LockId,
    /// Robots minted at construction; the pool never grows past this.
    total: u32,
    /// Idle robots, reused in FIFO order.
    idle: VecDeque<RobotId>,
    /// At-depot packages in warehouse arrival order.
    waiting: VecDeque<PackageId>,
}

impl Depot {
    /// A depot guarded by `lock`, with `pool` robots minted idle.
    pub fn new(lock: LockId, pool: u32) -> Depot {
        Depot {
            lock,
            total: pool,
            idle: (0..pool).map(RobotId).collect(),
            waiting: VecDeque::new(),
        }
    }

    /// Lock a vehicle must hold before touching the depot.
    pub fn lock(&self) -> LockId {
        self.lock
    }

    /// Robots minted at construction.
    pub fn total_robots(&self) -> u32 {
        self.total
    }

    /// Robots currently idle in the pool.
    pub fn idle_robots(&self) -> usize {
        self.idle.len()
    }

    /// Packages currently waiting at the warehouse.
    pub fn waiting_packages(&self) -> usize {
        self.waiting.len()
    }

    /// Queue a newly arrived package behind the ones already waiting.
    pub fn receive(&mut self, package: PackageId) {
        self.waiting.push_back(package);
    }

    /// Scan the waiting queue in arrival order and pair each package
    /// bound for `route` whose arrival has elapsed with an idle robot,
    /// up to `limit` pairings.  Claimed packages are marked onboard;
    /// everything else keeps its place in the queue.
    pub fn claim(
        &mut self,
        packages: &mut PackageLedger,
        route: RouteId,
        now: SimTime,
        limit: usize,
    ) -> WorldResult<Vec<Claim>> {
        let mut claims = Vec::new();
        let mut kept = VecDeque::with_capacity(self.waiting.len());

        while let Some(package) = self.waiting.pop_front() {
            let record = packages.get(package);
            let wanted = claims.len() < limit
                && record.route == route
                && record.arrival_time <= now;
            if !wanted {
                kept.push_back(package);
                continue;
            }
            match self.idle.pop_front() {
                Some(robot) => {
                    packages.mark_onboard(package)?;
                    claims.push(Claim { robot, package });
                }
                // Pool ran dry; the package waits for a later pass.
                None => kept.push_back(package),
            }
        }

        self.waiting = kept;
        Ok(claims)
    }

    /// Hand robots back to the idle pool after their return trip.
    pub fn return_robots(&mut self, robots: impl IntoIterator<Item = RobotId>) -> WorldResult<()> {
        for robot in robots {
            if self.idle.len() >= self.total as usize {
                return Err(WorldError::PoolOverflow { total: self.total });
            }
            self.idle.push_back(robot);
        }
        Ok(())
    }

    /// Empty the waiting queue in arrival order.  Called once at the
    /// horizon to account for packages no vehicle ever carried.
    pub fn drain_waiting(&mut self) -> Vec<PackageId> {
        self.waiting.drain(..).collect()
    }
}
