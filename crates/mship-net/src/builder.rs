//! Network construction and validation.
//!
//! The builder interns stop names, accumulates route drafts, and defers all
//! validation to [`NetworkBuilder::build`], the single fail-fast point for
//! configuration errors.  Building also precomputes the per-direction visit
//! plans and assigns every dense id the run will index by.

use mship_core::{DockId, QueueId, RouteId, StopId};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    Direction, DirectionPlan, DockInfo, NetError, NetResult, Network, QueueInfo, RobotOps, Route,
    ServiceProfile, Stop, Topology, Visit,
};

// ── Builder ───────────────────────────────────────────────────────────────────

struct RouteDraft {
    label:     String,
    topology:  Topology,
    stops:     Vec<StopId>,
    travels:   Vec<f64>,
    demand:    Vec<f64>,
    robot_ops: [RobotOps; 2],
}

#[derive(Default)]
pub struct NetworkBuilder {
    stops:   Vec<Stop>,
    by_name: FxHashMap<String, StopId>,
    drafts:  Vec<RouteDraft>,
    profile: Option<ServiceProfile>,
}

impl NetworkBuilder {
    pub fn new() -> NetworkBuilder {
        NetworkBuilder::default()
    }

    /// Intern a stop name, creating it with attraction 1.0 on first use.
    pub fn stop(&mut self, name: &str) -> StopId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = StopId(self.stops.len() as u32);
        self.stops.push(Stop { name: name.to_owned(), attraction: 1.0 });
        self.by_name.insert(name.to_owned(), id);
        id
    }

    /// Override a stop's destination attraction factor.  Validated at build.
    pub fn set_attraction(&mut self, stop: StopId, factor: f64) {
        self.stops[stop.index()].attraction = factor;
    }

    /// Append a route.  Rows are `(stop name, travel to next, daily demand)`
    /// in stop order; the final travel value is the wrap-home edge on loops
    /// and unused on reversing routes.  Validated at build.
    pub fn add_route(
        &mut self,
        label:    &str,
        topology: Topology,
        rows:     &[(&str, f64, f64)],
    ) -> RouteId {
        let id = RouteId(self.drafts.len() as u32);
        let mut draft = RouteDraft {
            label: label.to_owned(),
            topology,
            stops: Vec::with_capacity(rows.len()),
            travels: Vec::with_capacity(rows.len()),
            demand: Vec::with_capacity(rows.len()),
            robot_ops: [RobotOps::default(); 2],
        };
        for &(name, travel, demand) in rows {
            draft.stops.push(self.stop(name));
            draft.travels.push(travel);
            draft.demand.push(demand);
        }
        self.drafts.push(draft);
        id
    }

    /// Designate robot operations for one (route, direction) leg.
    pub fn set_robot_ops(&mut self, route: RouteId, direction: Direction, ops: RobotOps) {
        self.drafts[route.index()].robot_ops[direction.index()] = ops;
    }

    /// Install the time-of-day demand profile.  Required before build.
    pub fn set_profile(&mut self, profile: ServiceProfile) {
        self.profile = Some(profile);
    }

    /// Validate everything and assemble the immutable [`Network`].
    pub fn build(self) -> NetResult<Network> {
        let Some(profile) = self.profile else {
            return Err(NetError::MissingProfile);
        };

        for stop in &self.stops {
            if !stop.attraction.is_finite() || stop.attraction <= 0.0 {
                return Err(NetError::BadAttraction {
                    stop:   stop.name.clone(),
                    factor: stop.attraction,
                });
            }
        }

        let mut labels: FxHashSet<&str> = FxHashSet::default();
        let mut routes = Vec::with_capacity(self.drafts.len());
        let mut queue_info = Vec::new();
        let mut dock_info = Vec::new();

        for (index, draft) in self.drafts.iter().enumerate() {
            let route_id = RouteId(index as u32);
            if !labels.insert(&draft.label) {
                return Err(NetError::DuplicateRoute { label: draft.label.clone() });
            }
            validate_route(draft, &self.stops)?;

            let docks: Vec<DockId> = draft
                .stops
                .iter()
                .map(|&stop| {
                    let id = DockId(dock_info.len() as u32);
                    dock_info.push(DockInfo { route: route_id, stop });
                    id
                })
                .collect();

            let plans = build_plans(draft, route_id, &docks, &mut queue_info);

            routes.push(Route {
                label:     draft.label.clone(),
                topology:  draft.topology,
                stops:     draft.stops.clone(),
                docks,
                robot_ops: draft.robot_ops,
                plans,
            });
        }

        Ok(Network {
            stops: self.stops,
            by_name: self.by_name,
            routes,
            profile,
            queue_info,
            dock_info,
        })
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

fn validate_route(draft: &RouteDraft, stops: &[Stop]) -> NetResult<()> {
    let n = draft.stops.len();
    if n < 2 {
        return Err(NetError::TooFewStops { label: draft.label.clone(), got: n });
    }

    // Drop-off matches by stop identity, so a route may not visit a stop
    // twice.
    let mut seen = FxHashSet::default();
    for &stop in &draft.stops {
        if !seen.insert(stop) {
            return Err(NetError::DuplicateStop {
                label: draft.label.clone(),
                stop:  stops[stop.index()].name.clone(),
            });
        }
    }

    // Positive used edges are also what guarantees a passenger's dropoff
    // time strictly exceeds their pickup time.
    let used_edges = match draft.topology {
        Topology::Reversing => n - 1,
        Topology::Loop      => n,
    };
    for index in 0..used_edges {
        let minutes = draft.travels[index];
        if !minutes.is_finite() || minutes <= 0.0 {
            return Err(NetError::BadEdge { label: draft.label.clone(), index, minutes });
        }
    }

    for (position, &demand) in draft.demand.iter().enumerate() {
        if !demand.is_finite() || demand < 0.0 {
            return Err(NetError::BadDemand {
                label: draft.label.clone(),
                stop:  stops[draft.stops[position].index()].name.clone(),
                demand,
            });
        }
    }
    Ok(())
}

// ── Plan construction ─────────────────────────────────────────────────────────

fn build_plans(
    draft:      &RouteDraft,
    route_id:   RouteId,
    docks:      &[DockId],
    queue_info: &mut Vec<QueueInfo>,
) -> Vec<DirectionPlan> {
    let n = draft.stops.len();

    // One queue per (direction, boarding position).  The final position of a
    // reversing plan boards nobody in its own direction (no stop lies beyond
    // it), so no queue is minted there; its visit instead polls the flipped
    // direction's position-0 queue.  That is how return travellers waiting at
    // a turn-around terminus board without the terminus being processed twice
    // per round trip.
    let boarding = match draft.topology {
        Topology::Reversing => n - 1,
        Topology::Loop      => n,
    };
    let mut queues: Vec<Vec<QueueId>> = Vec::new();
    for &direction in draft.topology.directions() {
        let mut ids = Vec::with_capacity(boarding);
        for position in 0..boarding {
            let sp = stop_position(direction, position, n);
            let id = QueueId(queue_info.len() as u32);
            queue_info.push(QueueInfo { route: route_id, direction, stop: draft.stops[sp] });
            ids.push(id);
        }
        queues.push(ids);
    }

    let mut plans = Vec::new();
    for (d, &direction) in draft.topology.directions().iter().enumerate() {
        let mut visits = Vec::with_capacity(n);
        for position in 0..n {
            let sp = stop_position(direction, position, n);
            let queue = if position < boarding {
                queues[d][position]
            } else {
                // Reversing turn-around: board the opposite direction.
                queues[1 - d][0]
            };
            visits.push(Visit {
                stop:           draft.stops[sp],
                queue,
                dock:           docks[sp],
                daily_demand:   draft.demand[sp],
                travel_to_next: travel_to_next(draft, direction, position),
                terminus:       is_terminus(draft.topology, position, n),
            });
        }
        plans.push(DirectionPlan { direction, visits });
    }
    plans
}

/// Forward-coordinates stop index for plan `position` in `direction`.
fn stop_position(direction: Direction, position: usize, n: usize) -> usize {
    match direction {
        Direction::Forward  => position,
        Direction::Backward => n - 1 - position,
    }
}

/// Minutes from plan position `position` to the next processed stop.
///
/// A reversing pass turns around on its final visit: the hop out re-crosses
/// the edge just traversed, toward the first processed stop of the flipped
/// pass.  A loop pass wraps home over the final configured edge.
fn travel_to_next(draft: &RouteDraft, direction: Direction, position: usize) -> f64 {
    let n = draft.stops.len();
    match (draft.topology, direction) {
        (Topology::Loop, _) => draft.travels[position],
        (Topology::Reversing, Direction::Forward) => {
            if position < n - 1 {
                draft.travels[position]
            } else {
                draft.travels[n - 2]
            }
        }
        (Topology::Reversing, Direction::Backward) => {
            let sp = n - 1 - position;
            if sp > 0 { draft.travels[sp - 1] } else { draft.travels[0] }
        }
    }
}

fn is_terminus(topology: Topology, position: usize, n: usize) -> bool {
    match topology {
        Topology::Reversing => position == 0 || position == n - 1,
        Topology::Loop      => position == 0,
    }
}
