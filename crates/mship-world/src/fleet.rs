//! Fleet board: the registry of every vehicle launched during a run.
//!
//! Vehicles register here at launch and stamp their retirement here
//! when they terminate.  The scheduler raises early-shutdown flags
//! through the board; vehicles poll their own flag at each terminus.

use mship_core::ids::{RouteId, VehicleId};
use mship_core::time::SimTime;

use crate::error::{WorldError, WorldResult};

/// One vehicle's registration, from launch to retirement.
#[derive(Clone, Debug)]
pub struct VehicleEntry {
    /// Human-readable tag, e.g. `red-2`.
    pub label: String,
    /// Route the vehicle serves.
    pub route: RouteId,
    /// Instant the vehicle entered service.
    pub launched_at: SimTime,
    /// Instant its scheduled service window closes.
    pub end_time: SimTime,
    flagged:    bool,
    retired_at: Option<SimTime>,
}

impl VehicleEntry {
    /// Whether the scheduler asked this vehicle to shut down early.
    pub fn flagged(&self) -> bool {
        self.flagged
    }

    /// Instant the vehicle terminated, once it has.
    pub fn retired_at(&self) -> Option<SimTime> {
        self.retired_at
    }

    /// Still in service: launched and not yet retired.
    pub fn is_active(&self) -> bool {
        self.retired_at.is_none()
    }
}

/// Launch-ordered registry of vehicles, indexed by [`VehicleId`].
#[derive(Debug, Default)]
pub struct FleetBoard {
    entries: Vec<VehicleEntry>,
}

impl FleetBoard {
    pub fn new() -> FleetBoard {
        FleetBoard::default()
    }

    /// Register a launch; the id is the launch ordinal.
    pub fn register(
        &mut self,
        label: String,
        route: RouteId,
        launched_at: SimTime,
        end_time: SimTime,
    ) -> VehicleId {
        let id = VehicleId(self.entries.len() as u32);
        self.entries.push(VehicleEntry {
            label,
            route,
            launched_at,
            end_time,
            flagged:    false,
            retired_at: None,
        });
        id
    }

    pub fn get(&self, id: VehicleId) -> &VehicleEntry {
        &self.entries[id.index()]
    }

    /// Whether the early-shutdown flag is raised for a vehicle.
    pub fn is_flagged(&self, id: VehicleId) -> bool {
        self.entries[id.index()].flagged
    }

    /// Raise the early-shutdown flag on the `count` oldest vehicles that
    /// are still active and not yet flagged, in launch order.  Returns
    /// the ids actually flagged, which may be fewer than asked for.
    pub fn flag_oldest_active(&mut self, count: usize) -> Vec<VehicleId> {
        let mut flagged = Vec::new();
        for (i, entry) in self.entries.iter_mut().enumerate() {
            if flagged.len() == count {
                break;
            }
            if entry.is_active() && !entry.flagged {
                entry.flagged = true;
                flagged.push(VehicleId(i as u32));
            }
        }
        flagged
    }

    /// Stamp a vehicle's retirement instant.
    pub fn mark_retired(&mut self, id: VehicleId, at: SimTime) -> WorldResult<()> {
        let entry = &mut self.entries[id.index()];
        if entry.retired_at.is_some() {
            return Err(WorldError::DoubleRetire { vehicle: id });
        }
        entry.retired_at = Some(at);
        Ok(())
    }

    /// Vehicles launched so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Vehicles still in service.
    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_active()).count()
    }

    /// All entries in launch order.
    pub fn iter(&self) -> impl Iterator<Item = (VehicleId, &VehicleEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (VehicleId(i as u32), e))
    }
}
