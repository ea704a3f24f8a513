//! One robot's delivery round trip.
//!
//! Spawned by a vehicle the instant it hands the robot off at the
//! package's target stop.  Three suspension points: travel out, travel
//! back, then park at the stop's dock and wait for a later vehicle.
//! Docked robots ride their collecting vehicle until it terminates and
//! only then rejoin the warehouse pool — the dock push here is the last
//! thing this process does.

use mship_core::{DockId, StreamRng, Timings};
use mship_kernel::{EngineCtx, KernelError, KernelResult, Process, Suspend};
use mship_world::{Claim, World};

/// Where the round trip stands, named by what the next resume does.
enum RobotStage {
    /// Just handed off; next resume starts the outbound leg.
    Depart,
    /// Outbound leg elapsed; next resume stamps the delivery.
    Handover,
    /// Return leg elapsed; next resume parks at the dock.
    Dock,
}

/// One claimed robot delivering one package from a stop.
pub struct RobotRun {
    claim:   Claim,
    dock:    DockId,
    timings: Timings,
    rng:     StreamRng,
    stage:   RobotStage,
}

impl RobotRun {
    /// A run for `claim`, dropped at the stop owning `dock`.
    pub fn new(claim: Claim, dock: DockId, timings: Timings, rng: StreamRng) -> RobotRun {
        RobotRun { claim, dock, timings, rng, stage: RobotStage::Depart }
    }
}

impl Process<World> for RobotRun {
    fn resume(&mut self, world: &mut World, ctx: &mut EngineCtx<'_, World>) -> KernelResult<Suspend> {
        match self.stage {
            RobotStage::Depart => {
                self.stage = RobotStage::Handover;
                Ok(Suspend::Sleep(self.rng.band(self.timings.robot_outbound)))
            }
            RobotStage::Handover => {
                world
                    .packages
                    .mark_delivered(self.claim.package, ctx.now())
                    .map_err(KernelError::process)?;
                self.stage = RobotStage::Dock;
                Ok(Suspend::Sleep(self.rng.band(self.timings.robot_return)))
            }
            RobotStage::Dock => {
                world.queues.dock_push(self.dock, self.claim.robot);
                Ok(Suspend::Done)
            }
        }
    }

    fn label(&self) -> &'static str {
        "robot run"
    }
}
