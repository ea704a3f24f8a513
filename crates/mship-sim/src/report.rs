//! End-of-run summary.

use mship_core::SimTime;
use mship_world::{PackageStatus, PassengerOutcome, World};

/// Aggregate counts over the final ledgers.
///
/// Derived entirely from [`World`] after the horizon drain; the full
/// per-record data stays readable through [`Sim::world`][crate::Sim::world]
/// (and exportable via `mship-output`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunTotals {
    /// Passengers materialized into a queue.
    pub passengers: usize,
    /// Boarded and alighted at their destination.
    pub served: usize,
    /// Still aboard when their vehicle terminated or the clock froze.
    pub riding: usize,
    /// Still queued at the horizon.
    pub missed_passengers: usize,
    /// Arrivals past the late cutoff, never queued.
    pub discarded: u64,

    /// Packages received at the warehouse.
    pub packages: usize,
    /// Handed over at their target stop.
    pub delivered: usize,
    /// Aboard a terminated vehicle, never handed over.
    pub stranded: usize,
    /// Still waiting at the warehouse at the horizon.
    pub missed_packages: usize,

    /// Vehicles launched over the run.
    pub vehicles: usize,
    /// Utilization snapshots recorded.
    pub snapshots: usize,
}

impl RunTotals {
    /// Tally the drained world.  Call after [`World::drain_missed`]; before
    /// the drain, queued entities still count as missed here anyway, since
    /// the tally reads ledger outcomes rather than queue membership.
    pub fn collect(world: &World) -> RunTotals {
        let mut totals = RunTotals {
            passengers: world.passengers.len(),
            discarded:  world.passengers.discarded(),
            packages:   world.packages.len(),
            vehicles:   world.fleet.len(),
            snapshots:  world.snapshots.len(),
            ..RunTotals::default()
        };
        for (_, passenger) in world.passengers.iter() {
            match passenger.outcome() {
                PassengerOutcome::Served => totals.served += 1,
                PassengerOutcome::Riding => totals.riding += 1,
                PassengerOutcome::Missed => totals.missed_passengers += 1,
            }
        }
        for (_, package) in world.packages.iter() {
            match package.status() {
                PackageStatus::Delivered => totals.delivered += 1,
                PackageStatus::Onboard   => totals.stranded += 1,
                PackageStatus::AtDepot   => totals.missed_packages += 1,
            }
        }
        totals
    }
}

/// What one finished run amounted to.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Instant the clock froze: the horizon, or the last event if the
    /// queue emptied early.
    pub ran_until: SimTime,
    /// Events dispatched over the whole run.
    pub dispatched: u64,
    /// Ledger tallies after the horizon drain.
    pub totals: RunTotals,
}
