//! The fleet scheduler: one process walking the fleet plan.
//!
//! Sleeps from phase offset to phase offset.  Launching registers each
//! vehicle on the fleet board and spawns its process at the current
//! instant; retiring raises the early-shutdown flag on the oldest
//! active vehicles, which they poll at their next pass start.  The
//! scheduler never touches a vehicle mid-route.

use mship_core::{SimTime, Timings};
use mship_kernel::{EngineCtx, KernelResult, Process, Suspend};
use mship_world::World;
use rustc_hash::FxHashMap;

use crate::plan::{FleetPlan, Phase};
use crate::vehicle::Vehicle;

/// Launch/retire orchestration for one run.
pub struct FleetScheduler {
    plan:       FleetPlan,
    timings:    Timings,
    seed:       u64,
    next_phase: usize,
    /// Launches per label prefix so far, for `label-N` numbering across
    /// phases.
    launched:   FxHashMap<String, u32>,
}

impl FleetScheduler {
    /// A scheduler for a plan already validated against the network.
    pub fn new(plan: FleetPlan, timings: Timings, seed: u64) -> FleetScheduler {
        FleetScheduler {
            plan,
            timings,
            seed,
            next_phase: 0,
            launched: FxHashMap::default(),
        }
    }

    fn fire(&mut self, phase: &Phase, world: &mut World, ctx: &mut EngineCtx<'_, World>) {
        let now = ctx.now();
        for group in &phase.launches {
            for _ in 0..group.count {
                let ordinal = self.launched.entry(group.label.clone()).or_insert(0);
                *ordinal += 1;
                let label = format!("{}-{}", group.label, ordinal);
                let end_time = now + group.run_minutes;
                let id = world.fleet.register(label, group.route, now, end_time);
                ctx.spawn(Box::new(Vehicle::new(
                    id,
                    group.route,
                    group.capacity,
                    group.robot_bays,
                    end_time,
                    self.timings,
                    self.seed,
                )));
            }
        }
        if phase.retire > 0 {
            world.fleet.flag_oldest_active(phase.retire as usize);
        }
    }
}

impl Process<World> for FleetScheduler {
    fn resume(&mut self, world: &mut World, ctx: &mut EngineCtx<'_, World>) -> KernelResult<Suspend> {
        let now = ctx.now();
        while let Some(phase) = self.plan.phases.get(self.next_phase) {
            if SimTime::at(phase.offset_min) > now {
                break;
            }
            let phase = phase.clone();
            self.fire(&phase, world, ctx);
            self.next_phase += 1;
        }
        match self.plan.phases.get(self.next_phase) {
            Some(phase) => Ok(Suspend::Sleep(SimTime::at(phase.offset_min) - now)),
            None => Ok(Suspend::Done),
        }
    }

    fn label(&self) -> &'static str {
        "fleet scheduler"
    }
}
