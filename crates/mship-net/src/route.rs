//! Routes, directions, and precomputed visit plans.
//!
//! # Design
//!
//! A route is an ordered stop list with per-edge travel times and one of two
//! topologies: *reversing* (the vehicle turns around at each end terminus)
//! or *loop* (the last edge wraps back to the first stop).  Everything a
//! vehicle needs at a stop — queue, dock, travel time out, terminus flag —
//! is resolved once at network build into per-direction [`Visit`] lists, so
//! the hot path never reconstructs sequences or compares stop names.

use std::fmt;

use mship_core::{DockId, QueueId, StopId};

// ── Direction ─────────────────────────────────────────────────────────────────

/// Travel direction along a route's stop order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn flip(self) -> Direction {
        match self {
            Direction::Forward  => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Dense index for per-direction tables.
    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            Direction::Forward  => 0,
            Direction::Backward => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward  => "forward",
            Direction::Backward => "backward",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Topology ──────────────────────────────────────────────────────────────────

/// How a route's passes connect end to end.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Topology {
    /// The vehicle reverses at each terminus; both directions are served.
    Reversing,
    /// The last edge wraps back to the first stop; only forward is served.
    Loop,
}

impl Topology {
    /// The directions a vehicle on this topology actually runs.
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Topology::Reversing => &[Direction::Forward, Direction::Backward],
            Topology::Loop      => &[Direction::Forward],
        }
    }
}

// ── RobotOps ──────────────────────────────────────────────────────────────────

/// Robot operations designated for one (route, direction) leg.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct RobotOps {
    /// Claim loaded robots from the depot at pass start.
    pub load: bool,
    /// Collect docked return-robots during stop pickup.
    pub pickup: bool,
}

// ── Visit ─────────────────────────────────────────────────────────────────────

/// One precomputed stop visit within a direction plan.
#[derive(Copy, Clone, Debug)]
pub struct Visit {
    pub stop: StopId,
    /// Passenger queue polled at this visit.  The final visit of a reversing
    /// plan polls the flipped direction's position-0 queue, since boarders at
    /// a turn-around terminus are travelling back the other way.
    pub queue: QueueId,
    /// Return-robot dock for this (route, stop); shared between directions.
    pub dock: DockId,
    /// Expected daily boardings at this stop on this route.
    pub daily_demand: f64,
    /// Minutes to the first stop processed after this one — the next visit
    /// of this pass, or the first processed stop of the following pass.
    pub travel_to_next: f64,
    /// Layover dwell applies here, and a closing vehicle terminates on
    /// arrival.
    pub terminus: bool,
}

/// The visit sequence for one direction of travel.
#[derive(Debug, Clone)]
pub struct DirectionPlan {
    pub direction: Direction,
    pub visits:    Vec<Visit>,
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// A built route.  Constructed by `NetworkBuilder::build` only.
#[derive(Debug, Clone)]
pub struct Route {
    pub(crate) label:     String,
    pub(crate) topology:  Topology,
    pub(crate) stops:     Vec<StopId>,
    pub(crate) docks:     Vec<DockId>,
    pub(crate) robot_ops: [RobotOps; 2],
    /// One plan for loops, forward then backward for reversing routes.
    pub(crate) plans:     Vec<DirectionPlan>,
}

impl Route {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Stops in forward order.
    pub fn stops(&self) -> &[StopId] {
        &self.stops
    }

    /// Dock at a forward stop position.
    pub fn dock_at(&self, position: usize) -> DockId {
        self.docks[position]
    }

    pub fn robot_ops(&self, direction: Direction) -> RobotOps {
        self.robot_ops[direction.index()]
    }

    /// The directions this route actually serves.
    pub fn directions(&self) -> &'static [Direction] {
        self.topology.directions()
    }

    /// The visit plan for one direction.  Loop routes have a single plan,
    /// returned for either direction argument.
    pub fn plan(&self, direction: Direction) -> &DirectionPlan {
        match self.topology {
            Topology::Loop      => &self.plans[0],
            Topology::Reversing => &self.plans[direction.index()],
        }
    }
}
