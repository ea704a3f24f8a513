//! The `Sim` struct and its event loop.

use mship_core::SimConfig;
use mship_kernel::Engine;
use mship_world::World;

use crate::report::{RunReport, RunTotals};
use crate::{NoopObserver, SimObserver, SimResult};

/// One assembled run: engine, world, and the config that shaped them.
///
/// Create via [`SimBuilder`][crate::SimBuilder].  Multiple `Sim` values
/// can coexist — every piece of run state lives inside this struct.
pub struct Sim {
    config: SimConfig,
    engine: Engine<World>,
    world:  World,
}

impl Sim {
    pub(crate) fn assemble(config: SimConfig, engine: Engine<World>, world: World) -> Sim {
        Sim { config, engine, world }
    }

    /// Run every event up to the horizon and report.
    pub fn run(&mut self) -> SimResult<RunReport> {
        self.run_with(&mut NoopObserver)
    }

    /// Like [`run`][Sim::run], with observer callbacks around every
    /// dispatched event.
    pub fn run_with<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunReport> {
        observer.on_start(&self.world);
        while let Some((at, pid)) = self.engine.step(&mut self.world)? {
            observer.on_event(at, pid, &self.world);
        }

        // The clock is frozen; whatever is still queued was never served.
        self.world.drain_missed();
        let report = RunReport {
            ran_until:  self.engine.now(),
            dispatched: self.engine.dispatched(),
            totals:     RunTotals::collect(&self.world),
        };
        observer.on_end(&report, &self.world);
        Ok(report)
    }

    /// The configuration this run was built with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Final (or in-progress, between `step`-driven observers) run state:
    /// ledgers, snapshot log, fleet board.
    pub fn world(&self) -> &World {
        &self.world
    }
}

// ── Replication sweeps ────────────────────────────────────────────────────────

/// Run the same scenario once per seed, in parallel, and collect the
/// reports in seed order.
///
/// Each replication is an independent `Sim` on its own thread; nothing
/// inside a single run is parallel, so every report is identical to what
/// a sequential run with that seed would produce.
#[cfg(feature = "parallel")]
pub fn run_replications(
    config: &SimConfig,
    network: &mship_net::Network,
    plan: &mship_ops::FleetPlan,
    seeds: &[u64],
) -> SimResult<Vec<RunReport>> {
    use rayon::prelude::*;

    use crate::SimBuilder;

    seeds
        .par_iter()
        .map(|&seed| {
            let config = SimConfig { seed, ..config.clone() };
            let mut sim = SimBuilder::new(config, network.clone(), plan.clone()).build()?;
            sim.run()
        })
        .collect()
}
