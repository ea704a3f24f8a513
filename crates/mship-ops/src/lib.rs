//! `mship-ops` — the logical processes that drive a run.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`source`]    | `PassengerSource` — one arrival process per boarding queue |
//! | [`parcels`]   | `PackageSource` — warehouse package arrivals               |
//! | [`vehicle`]   | `Vehicle` — the route-walking state machine                |
//! | [`robot`]     | `RobotRun` — one last-mile delivery round trip             |
//! | [`scheduler`] | `FleetScheduler` — launches and retires vehicles           |
//! | [`plan`]      | `FleetPlan`, `Phase`, `LaunchGroup`                        |
//! | [`error`]     | `PlanError`, `PlanResult<T>`                               |
//!
//! # Design notes
//!
//! Every process here is an explicit state machine over the kernel's
//! suspension points: each `resume` runs one atomic slice of simulated
//! time and returns a `Suspend` naming the next wake condition.  State
//! shared between processes lives in `mship_world::World`; process-local
//! state (route position, carried robots, RNG stream) lives in the
//! process struct itself.
//!
//! Determinism comes from two rules: processes draw from private
//! [`StreamRng`](mship_core::StreamRng) streams salted by stable facts
//! (queue id, vehicle id, package id — see [`salt`]), and everything is
//! spawned in a fixed order, so the kernel's registration-order
//! tie-breaking replays identically under one seed.

pub mod error;
pub mod parcels;
pub mod plan;
pub mod robot;
pub mod salt;
pub mod scheduler;
pub mod source;
pub mod vehicle;


pub use error::{PlanError, PlanResult};
pub use parcels::PackageSource;
pub use plan::{FleetPlan, LaunchGroup, Phase};
pub use robot::RobotRun;
pub use scheduler::FleetScheduler;
pub use source::PassengerSource;
pub use vehicle::Vehicle;
