//! The warehouse package source.
//!
//! A single process for the whole network: exponential gaps at a fixed
//! rate, each tick dropping one package into the depot for a uniformly
//! chosen (route, stop) target.  Stops served by two routes appear
//! twice in the target list and receive twice the parcel share.

use mship_core::{RouteId, SimTime, StopId, StreamRng};
use mship_kernel::{EngineCtx, KernelResult, Process, Suspend};
use mship_net::Network;
use mship_world::World;

use crate::salt;

/// Package arrival process feeding the depot.
pub struct PackageSource {
    targets: Vec<(RouteId, StopId)>,
    rate:    f64,
    cutoff:  SimTime,
    rng:     StreamRng,
    armed:   bool,
}

impl PackageSource {
    /// Build the source, or `None` when the flow is disabled (zero rate)
    /// or the network offers nowhere to deliver.
    pub fn new(
        net:         &Network,
        rate:        f64,
        cutoff:      SimTime,
        global_seed: u64,
    ) -> Option<PackageSource> {
        let targets = net.delivery_targets();
        if targets.is_empty() || rate <= 0.0 {
            return None;
        }
        Some(PackageSource {
            targets,
            rate,
            cutoff,
            rng: StreamRng::new(global_seed, salt::package_source()),
            armed: false,
        })
    }
}

impl Process<World> for PackageSource {
    fn resume(&mut self, world: &mut World, ctx: &mut EngineCtx<'_, World>) -> KernelResult<Suspend> {
        let now = ctx.now();
        if now > self.cutoff {
            return Ok(Suspend::Done);
        }
        if self.armed {
            let (route, stop) = self.targets[self.rng.gen_range(0..self.targets.len())];
            let id = world.packages.create(stop, route, now);
            world.depot.receive(id);
        }
        self.armed = true;
        Ok(Suspend::Sleep(self.rng.exp_gap(self.rate)))
    }

    fn label(&self) -> &'static str {
        "package source"
    }
}
