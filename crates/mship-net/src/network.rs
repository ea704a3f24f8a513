//! The built, validated network.

use mship_core::{DockId, QueueId, RouteId, StopId};
use rustc_hash::FxHashMap;

use crate::{Direction, NetError, NetResult, Route, ServiceProfile, Topology};

// ── Static registries ─────────────────────────────────────────────────────────

/// One entry of the stop registry.
#[derive(Debug, Clone)]
pub struct Stop {
    pub name: String,
    /// Destination-weight multiplier; 1.0 for an ordinary stop, above 1.0
    /// for extra-attractive places (a city centre, a shopping street).
    pub attraction: f64,
}

/// Static description of one passenger queue.
#[derive(Copy, Clone, Debug)]
pub struct QueueInfo {
    pub route:     RouteId,
    pub direction: Direction,
    pub stop:      StopId,
}

/// Static description of one return-robot dock.
#[derive(Copy, Clone, Debug)]
pub struct DockInfo {
    pub route: RouteId,
    pub stop:  StopId,
}

// ── Network ───────────────────────────────────────────────────────────────────

/// The immutable network a run executes against: interned stops, built
/// routes with per-direction visit plans, the demand profile, and dense
/// queue/dock registries sized for direct indexing.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) stops:      Vec<Stop>,
    pub(crate) by_name:    FxHashMap<String, StopId>,
    pub(crate) routes:     Vec<Route>,
    pub(crate) profile:    ServiceProfile,
    pub(crate) queue_info: Vec<QueueInfo>,
    pub(crate) dock_info:  Vec<DockInfo>,
}

impl Network {
    // ── Stops ─────────────────────────────────────────────────────────────

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.index()]
    }

    pub fn stop_by_name(&self, name: &str) -> NetResult<StopId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| NetError::UnknownStop { name: name.to_owned() })
    }

    // ── Routes ────────────────────────────────────────────────────────────

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn route(&self, id: RouteId) -> &Route {
        &self.routes[id.index()]
    }

    pub fn routes(&self) -> impl Iterator<Item = (RouteId, &Route)> {
        self.routes
            .iter()
            .enumerate()
            .map(|(i, r)| (RouteId(i as u32), r))
    }

    pub fn route_by_name(&self, label: &str) -> NetResult<RouteId> {
        self.routes
            .iter()
            .position(|r| r.label == label)
            .map(|i| RouteId(i as u32))
            .ok_or_else(|| NetError::UnknownRoute { label: label.to_owned() })
    }

    // ── Demand ────────────────────────────────────────────────────────────

    pub fn profile(&self) -> &ServiceProfile {
        &self.profile
    }

    /// Weighted destination candidates for a passenger boarding at plan
    /// position `position` of `route`/`direction`.
    ///
    /// Reversing routes offer the downstream stops in travel order; loop
    /// routes offer every other stop in wrap-around order.  Weight decays as
    /// `exp(-i)` with list position `i`, times the candidate stop's
    /// attraction factor.  Empty exactly at the final position of a
    /// reversing plan, where no vehicle can carry the passenger further.
    pub fn destination_weights(
        &self,
        route:     RouteId,
        direction: Direction,
        position:  usize,
    ) -> Vec<(StopId, f64)> {
        let route = &self.routes[route.index()];
        let plan = route.plan(direction);
        let visits = &plan.visits;

        let mut out = Vec::new();
        match route.topology {
            Topology::Reversing => {
                for (i, visit) in visits[position + 1..].iter().enumerate() {
                    out.push((visit.stop, self.candidate_weight(i, visit.stop)));
                }
            }
            Topology::Loop => {
                let n = visits.len();
                for i in 0..n - 1 {
                    let stop = visits[(position + 1 + i) % n].stop;
                    out.push((stop, self.candidate_weight(i, stop)));
                }
            }
        }
        out
    }

    fn candidate_weight(&self, list_position: usize, stop: StopId) -> f64 {
        (-(list_position as f64)).exp() * self.stops[stop.index()].attraction
    }

    /// Every (route, stop) pair a package can target, in route-then-position
    /// order.  The package source draws uniformly from this list, so stops
    /// served by two routes receive twice the parcel share.
    pub fn delivery_targets(&self) -> Vec<(RouteId, StopId)> {
        let mut out = Vec::new();
        for (id, route) in self.routes() {
            for &stop in route.stops() {
                out.push((id, stop));
            }
        }
        out
    }

    // ── Dense registries ──────────────────────────────────────────────────

    pub fn queue_count(&self) -> usize {
        self.queue_info.len()
    }

    pub fn queue_info(&self, id: QueueId) -> QueueInfo {
        self.queue_info[id.index()]
    }

    pub fn dock_count(&self) -> usize {
        self.dock_info.len()
    }

    pub fn dock_info(&self, id: DockId) -> DockInfo {
        self.dock_info[id.index()]
    }
}
