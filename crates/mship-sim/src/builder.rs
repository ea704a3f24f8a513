//! Builder for constructing a [`Sim`].

use mship_core::{SimConfig, SimTime};
use mship_kernel::Engine;
use mship_net::Network;
use mship_ops::{FleetPlan, FleetScheduler, PackageSource, PassengerSource};
use mship_world::World;

use crate::{Sim, SimResult};

/// Builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — horizon, seed, cutoffs, package rate, pool size, timings
/// - [`Network`] — from [`mship_net::NetworkBuilder`] or the CSV loaders
/// - [`FleetPlan`] — launch phases and retire orders
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, network, plan).build()?;
/// let report = sim.run()?;
/// ```
pub struct SimBuilder {
    config:  SimConfig,
    network: Network,
    plan:    FleetPlan,
}

impl SimBuilder {
    pub fn new(config: SimConfig, network: Network, plan: FleetPlan) -> SimBuilder {
        SimBuilder { config, network, plan }
    }

    /// Validate the inputs, wire the world, and spawn every process.
    ///
    /// Spawn order is fixed — passenger sources in (route, direction,
    /// position) order, then the package source, then the fleet scheduler,
    /// all at t=0 — so the kernel's registration-order tie-breaking makes
    /// same-seed runs replay identically.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        self.plan.validate(self.network.route_count())?;

        let mut engine = Engine::new(SimTime::at(self.config.horizon_min));
        let depot_lock = engine.add_lock();
        let world = World::new(self.network, depot_lock, self.config.robot_pool);

        let seed = self.config.seed;
        let passenger_cutoff = SimTime::at(self.config.passenger_cutoff_min);
        for (route_id, route) in world.net.routes() {
            for &direction in route.directions() {
                for position in 0..route.plan(direction).visits.len() {
                    let source = PassengerSource::new(
                        &world.net,
                        route_id,
                        direction,
                        position,
                        passenger_cutoff,
                        seed,
                    );
                    // None where the plan position boards nobody.
                    if let Some(source) = source {
                        engine.spawn(SimTime::ZERO, Box::new(source));
                    }
                }
            }
        }

        let package_source = PackageSource::new(
            &world.net,
            self.config.package_rate_per_min,
            SimTime::at(self.config.package_cutoff_min),
            seed,
        );
        if let Some(source) = package_source {
            engine.spawn(SimTime::ZERO, Box::new(source));
        }

        engine.spawn(
            SimTime::ZERO,
            Box::new(FleetScheduler::new(self.plan, self.config.timings, seed)),
        );

        Ok(Sim::assemble(self.config, engine, world))
    }
}
