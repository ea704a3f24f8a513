//! The fleet plan: what launches when, and what retires.
//!
//! A plan is an ascending sequence of phases at fixed simulated-time
//! offsets.  Each phase launches labelled vehicle batches and/or flags
//! the oldest active vehicles for early shutdown, which is how a
//! peak/off-peak capacity policy is written down.

use mship_core::RouteId;

use crate::error::{PlanError, PlanResult};

/// One batch of identical vehicles launched together.
#[derive(Debug, Clone)]
pub struct LaunchGroup {
    /// Vehicles in the batch.
    pub count: u32,
    /// Label prefix; vehicles are registered as `label-1`, `label-2`, …
    /// counted across the whole run.
    pub label: String,
    /// Route every vehicle in the batch serves.
    pub route: RouteId,
    /// Service window in minutes; the vehicle closes after this elapses.
    pub run_minutes: f64,
    /// Passenger seats per vehicle.
    pub capacity: u32,
    /// Robot bays per vehicle.
    pub robot_bays: u32,
}

/// One scheduler action instant.
#[derive(Debug, Clone, Default)]
pub struct Phase {
    /// Minutes after service start at which this phase fires.
    pub offset_min: f64,
    /// Batches launched at this instant.
    pub launches: Vec<LaunchGroup>,
    /// Oldest active vehicles flagged for early shutdown at this instant.
    pub retire: u32,
}

/// The whole launch/retire policy for a run.
#[derive(Debug, Clone, Default)]
pub struct FleetPlan {
    pub phases: Vec<Phase>,
}

impl FleetPlan {
    pub fn new(phases: Vec<Phase>) -> FleetPlan {
        FleetPlan { phases }
    }

    /// Fail-fast validation against a network with `route_count` routes.
    pub fn validate(&self, route_count: usize) -> PlanResult<()> {
        let mut previous = f64::NEG_INFINITY;
        for (index, phase) in self.phases.iter().enumerate() {
            if !phase.offset_min.is_finite() || phase.offset_min < 0.0 || phase.offset_min <= previous
            {
                return Err(PlanError::BadOffset { index, offset: phase.offset_min });
            }
            previous = phase.offset_min;

            if phase.launches.is_empty() && phase.retire == 0 {
                return Err(PlanError::EmptyPhase { index });
            }
            for group in &phase.launches {
                if group.count == 0 {
                    return Err(PlanError::EmptyGroup { label: group.label.clone() });
                }
                if !group.run_minutes.is_finite() || group.run_minutes <= 0.0 {
                    return Err(PlanError::BadRunDuration {
                        label:   group.label.clone(),
                        minutes: group.run_minutes,
                    });
                }
                if group.capacity == 0 {
                    return Err(PlanError::NoCapacity { label: group.label.clone() });
                }
                if group.route.index() >= route_count {
                    return Err(PlanError::UnknownRoute {
                        label: group.label.clone(),
                        route: group.route.0,
                        count: route_count,
                    });
                }
            }
        }
        Ok(())
    }

    /// Total vehicles the plan will ever launch.
    pub fn total_vehicles(&self) -> u32 {
        self.phases
            .iter()
            .flat_map(|phase| phase.launches.iter())
            .map(|group| group.count)
            .sum()
    }
}
