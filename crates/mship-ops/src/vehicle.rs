//! The vehicle process: a route-walking state machine.
//!
//! # Lifecycle
//!
//! A vehicle walks its direction plan visit by visit: arrive (drop off
//! passengers, hand off robots), dwell, depart (board, collect docked
//! robots, snapshot), travel.  Passing its `end_time` flips it into the
//! closing state — drop-offs continue, boarding stops — and the next
//! terminus it *arrives at* ends the run.  The fleet board's
//! early-shutdown flag, polled at the top of each pass, ends it the
//! same way without waiting for a terminus.
//!
//! Either exit returns every carried robot to the warehouse pool as one
//! batch under the depot lock before the process finishes.
//!
//! # Suspension points
//!
//! `Stage` names exactly the instants this process can be suspended at,
//! so every `resume` arm reads as "what happens when that wait ends".

use mship_core::{PassengerId, RobotId, RouteId, SimTime, StreamRng, Timings, VehicleId};
use mship_kernel::{EngineCtx, KernelError, KernelResult, Process, Suspend};
use mship_net::{Direction, Topology, Visit};
use mship_world::{Claim, Snapshot, World};

use crate::robot::RobotRun;
use crate::salt;

/// Where the vehicle stands, named by what the next resume does.
enum Stage {
    /// Top of a pass: poll the shutdown flag, maybe claim robots.
    StartPass,
    /// Depot lock granted; claim packages, then arrive at the first stop.
    LoadRobots,
    /// Travel elapsed; process arrival at the current visit.
    Arrive,
    /// Dwell elapsed; board, snapshot, and depart the current visit.
    Depart,
    /// Depot lock granted at termination; bank robots and finish.
    ReturnRobots,
}

/// One dispatched mothership vehicle.
pub struct Vehicle {
    id:         VehicleId,
    route:      RouteId,
    capacity:   u32,
    robot_bays: u32,
    end_time:   SimTime,
    timings:    Timings,
    /// Run seed, kept to salt the streams of spawned robot runs.
    seed:       u64,
    rng:        StreamRng,

    direction: Direction,
    position:  usize,
    closing:   bool,
    stage:     Stage,

    onboard:    Vec<PassengerId>,
    /// Claimed (robot, package) pairs riding toward their drop stops.
    deliveries: Vec<Claim>,
    /// Dock-collected robots riding home to the warehouse.
    returners:  Vec<RobotId>,
    /// Alightings of the visit in progress, carried across the dwell for
    /// the departure snapshot.
    dropped_this_visit: u32,
}

impl Vehicle {
    pub fn new(
        id:         VehicleId,
        route:      RouteId,
        capacity:   u32,
        robot_bays: u32,
        end_time:   SimTime,
        timings:    Timings,
        seed:       u64,
    ) -> Vehicle {
        Vehicle {
            id,
            route,
            capacity,
            robot_bays,
            end_time,
            timings,
            seed,
            rng: StreamRng::new(seed, salt::vehicle(id)),
            direction: Direction::Forward,
            position: 0,
            closing: false,
            stage: Stage::StartPass,
            onboard: Vec::new(),
            deliveries: Vec::new(),
            returners: Vec::new(),
            dropped_this_visit: 0,
        }
    }

    fn visit(&self, world: &World) -> Visit {
        world.net.route(self.route).plan(self.direction).visits[self.position]
    }

    fn free_bays(&self) -> usize {
        self.robot_bays as usize - self.deliveries.len() - self.returners.len()
    }

    /// Exit the run: bank carried robots under the depot lock, then
    /// retire.  With nothing carried the lock is skipped entirely.
    fn begin_termination(
        &mut self,
        world: &mut World,
        ctx:   &mut EngineCtx<'_, World>,
    ) -> KernelResult<Suspend> {
        if self.deliveries.is_empty() && self.returners.is_empty() {
            world
                .fleet
                .mark_retired(self.id, ctx.now())
                .map_err(KernelError::process)?;
            return Ok(Suspend::Done);
        }
        self.stage = Stage::ReturnRobots;
        Ok(Suspend::Acquire(world.depot.lock()))
    }

    /// Top of a pass: shutdown flag first, then robot loading on
    /// designated legs, then straight into the first arrival.
    fn start_pass(
        &mut self,
        world: &mut World,
        ctx:   &mut EngineCtx<'_, World>,
    ) -> KernelResult<Suspend> {
        if world.fleet.is_flagged(self.id) {
            return self.begin_termination(world, ctx);
        }
        let ops = world.net.route(self.route).robot_ops(self.direction);
        if ops.load && !self.closing && self.free_bays() > 0 {
            self.stage = Stage::LoadRobots;
            return Ok(Suspend::Acquire(world.depot.lock()));
        }
        self.arrive(world, ctx)
    }

    /// Holding the depot lock: scan-and-claim, release, then process the
    /// first stop of the pass within this same resume.
    fn load_robots(
        &mut self,
        world: &mut World,
        ctx:   &mut EngineCtx<'_, World>,
    ) -> KernelResult<Suspend> {
        let claims = world
            .depot
            .claim(&mut world.packages, self.route, ctx.now(), self.free_bays())
            .map_err(KernelError::process)?;
        self.deliveries.extend(claims);
        ctx.release(world.depot.lock());
        self.arrive(world, ctx)
    }

    /// Arrival at the current visit: closing check, alightings, robot
    /// handoffs, then the dwell.
    fn arrive(
        &mut self,
        world: &mut World,
        ctx:   &mut EngineCtx<'_, World>,
    ) -> KernelResult<Suspend> {
        let now = ctx.now();
        let visit = self.visit(world);

        if now >= self.end_time {
            self.closing = true;
        }

        // Alight everyone whose destination is this stop.
        let mut alighting = Vec::new();
        self.onboard.retain(|&id| {
            let here = world.passengers.get(id).destination == visit.stop;
            if here {
                alighting.push(id);
            }
            !here
        });
        self.dropped_this_visit = alighting.len() as u32;
        for id in alighting {
            world
                .passengers
                .record_dropoff(id, now)
                .map_err(KernelError::process)?;
        }

        // Hand off robots targeting this stop; a closing vehicle carries
        // its remaining robots home instead.
        if !self.closing {
            let mut index = 0;
            while index < self.deliveries.len() {
                if world.packages.get(self.deliveries[index].package).stop == visit.stop {
                    let claim = self.deliveries.remove(index);
                    let rng = StreamRng::new(self.seed, salt::robot_run(claim.package));
                    ctx.spawn(Box::new(RobotRun::new(claim, visit.dock, self.timings, rng)));
                } else {
                    index += 1;
                }
            }
        }

        if self.closing && visit.terminus {
            return self.begin_termination(world, ctx);
        }

        self.stage = Stage::Depart;
        let band = if visit.terminus {
            self.timings.terminus_layover
        } else {
            self.timings.stop_dwell
        };
        Ok(Suspend::Sleep(self.rng.band(band)))
    }

    /// Departure from the current visit: boarding, dock pickup, the
    /// utilization snapshot, then the travel leg.
    fn depart(
        &mut self,
        world: &mut World,
        ctx:   &mut EngineCtx<'_, World>,
    ) -> KernelResult<Suspend> {
        let now = ctx.now();
        let visit = self.visit(world);
        let ops = world.net.route(self.route).robot_ops(self.direction);

        let mut picked_up = 0u32;
        if !self.closing {
            let free_seats = self.capacity as usize - self.onboard.len();
            for id in world.queues.take_up_to(visit.queue, free_seats) {
                world
                    .passengers
                    .record_pickup(id, now)
                    .map_err(KernelError::process)?;
                self.onboard.push(id);
                picked_up += 1;
            }
            if ops.pickup {
                self.returners
                    .extend(world.queues.dock_take_up_to(visit.dock, self.free_bays()));
            }
        }

        world.snapshots.record(Snapshot {
            time:        now,
            vehicle:     self.id,
            stop:        visit.stop,
            onboard:     self.onboard.len() as u32,
            capacity:    self.capacity,
            picked_up,
            dropped_off: self.dropped_this_visit,
            robots:      (self.deliveries.len() + self.returners.len()) as u32,
        });

        let route = world.net.route(self.route);
        let pass_over = self.position + 1 == route.plan(self.direction).visits.len();
        if pass_over {
            match route.topology() {
                Topology::Reversing => {
                    // The terminus just departed doubles as position 0 of
                    // the flipped plan; the new pass starts past it.
                    self.direction = self.direction.flip();
                    self.position = 1;
                }
                Topology::Loop => {
                    self.position = 0;
                }
            }
            self.stage = Stage::StartPass;
        } else {
            self.position += 1;
            self.stage = Stage::Arrive;
        }
        Ok(Suspend::Sleep(visit.travel_to_next))
    }

    /// Holding the depot lock at termination: one batched robot return.
    fn return_robots(
        &mut self,
        world: &mut World,
        ctx:   &mut EngineCtx<'_, World>,
    ) -> KernelResult<Suspend> {
        let robots: Vec<RobotId> = self
            .deliveries
            .drain(..)
            .map(|claim| claim.robot)
            .chain(self.returners.drain(..))
            .collect();
        world.depot.return_robots(robots).map_err(KernelError::process)?;
        ctx.release(world.depot.lock());
        world
            .fleet
            .mark_retired(self.id, ctx.now())
            .map_err(KernelError::process)?;
        Ok(Suspend::Done)
    }
}

impl Process<World> for Vehicle {
    fn resume(&mut self, world: &mut World, ctx: &mut EngineCtx<'_, World>) -> KernelResult<Suspend> {
        match self.stage {
            Stage::StartPass    => self.start_pass(world, ctx),
            Stage::LoadRobots   => self.load_robots(world, ctx),
            Stage::Arrive       => self.arrive(world, ctx),
            Stage::Depart       => self.depart(world, ctx),
            Stage::ReturnRobots => self.return_robots(world, ctx),
        }
    }

    fn label(&self) -> &'static str {
        "vehicle"
    }
}
