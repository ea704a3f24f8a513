//! `mship-core` — foundational types for the mship transit simulator.
//!
//! This crate is a dependency of every other `mship-*` crate.  It
//! intentionally has no `mship-*` dependencies and minimal external ones
//! (only `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `StopId`, `RouteId`, `VehicleId`, `PassengerId`, …        |
//! | [`time`]   | `SimTime` (minutes, totally ordered), `TimeBand`          |
//! | [`rng`]    | `StreamRng` — per-process deterministic streams           |
//! | [`config`] | `SimConfig`, `Timings`                                    |
//! | [`error`]  | `ConfigError`, `ConfigResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.          |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{SimConfig, Timings};
pub use error::{ConfigError, ConfigResult};
pub use ids::{
    DockId, LockId, PackageId, PassengerId, ProcessId, QueueId, RobotId, RouteId, StopId,
    VehicleId,
};
pub use rng::{StreamRng, mix_seed};
pub use time::{SimTime, TimeBand};
