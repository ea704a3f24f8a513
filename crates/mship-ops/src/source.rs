//! Passenger arrival sources.
//!
//! One source per boarding queue, looping for the whole run: read the
//! instantaneous arrival rate off the demand profile, sleep an
//! exponential gap at that rate, materialize one passenger.  A zero
//! rate (before service, after the profile ends) degrades to a fixed
//! probe interval so the source picks back up when demand returns.

use mship_core::{QueueId, RouteId, SimTime, StopId, StreamRng};
use mship_kernel::{EngineCtx, KernelResult, Process, Suspend};
use mship_net::{Direction, Network};
use mship_world::World;
use rand::distributions::{Distribution, WeightedIndex};

use crate::salt;

/// Minutes between rate probes while the instantaneous rate is zero.
const PROBE_INTERVAL_MIN: f64 = 5.0;

/// Arrival process for one (route, direction, boarding position).
pub struct PassengerSource {
    route:        RouteId,
    direction:    Direction,
    stop:         StopId,
    queue:        QueueId,
    daily_demand: f64,
    /// Candidate destinations in preference order, fixed at construction.
    candidates:   Vec<StopId>,
    weights:      WeightedIndex<f64>,
    cutoff:       SimTime,
    rng:          StreamRng,
    /// An arrival gap just elapsed: the current wake materializes a
    /// passenger before scheduling the next one.
    armed:        bool,
}

impl PassengerSource {
    /// Build the source for plan `position` of `route`/`direction`.
    ///
    /// Returns `None` where no source belongs: the final visit of a
    /// reversing plan has no onward destination, so nobody arrives there
    /// to travel this way.
    pub fn new(
        net:         &Network,
        route:       RouteId,
        direction:   Direction,
        position:    usize,
        cutoff:      SimTime,
        global_seed: u64,
    ) -> Option<PassengerSource> {
        let candidates = net.destination_weights(route, direction, position);
        if candidates.is_empty() {
            return None;
        }
        let visit = net.route(route).plan(direction).visits[position];
        let weights = WeightedIndex::new(candidates.iter().map(|&(_, w)| w)).ok()?;
        Some(PassengerSource {
            route,
            direction,
            stop: visit.stop,
            queue: visit.queue,
            daily_demand: visit.daily_demand,
            candidates: candidates.into_iter().map(|(stop, _)| stop).collect(),
            weights,
            cutoff,
            rng: StreamRng::new(global_seed, salt::passenger_source(visit.queue)),
            armed: false,
        })
    }

    /// The queue this source feeds.
    pub fn queue(&self) -> QueueId {
        self.queue
    }
}

impl Process<World> for PassengerSource {
    fn resume(&mut self, world: &mut World, ctx: &mut EngineCtx<'_, World>) -> KernelResult<Suspend> {
        let now = ctx.now();

        if self.armed {
            self.armed = false;
            if now > self.cutoff {
                // No vehicle would reach them before the horizon.
                world.passengers.note_discarded();
            } else {
                let destination = self.candidates[self.weights.sample(self.rng.inner())];
                let id = world.passengers.create(
                    self.stop,
                    destination,
                    self.route,
                    self.direction,
                    now,
                );
                world.queues.enqueue(self.queue, id);
            }
        }

        let rate = world.net.profile().weight_at(now) * self.daily_demand;
        if rate > 0.0 {
            self.armed = true;
            Ok(Suspend::Sleep(self.rng.exp_gap(rate)))
        } else {
            Ok(Suspend::Sleep(PROBE_INTERVAL_MIN))
        }
    }

    fn label(&self) -> &'static str {
        "passenger source"
    }
}
