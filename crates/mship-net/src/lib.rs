//! `mship-net` — the static network a simulation runs against.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`route`]   | `Direction`, `Topology`, `RobotOps`, `Route`, `Visit`, plans |
//! | [`network`] | `Network` — stops, routes, registries, destination weights   |
//! | [`builder`] | `NetworkBuilder` — interning, validation, plan construction  |
//! | [`profile`] | `ServiceProfile` — per-minute demand weights                 |
//! | [`loader`]  | CSV loaders (`load_routes`, `load_hourly_profile`)           |
//! | [`error`]   | `NetError`, `NetResult<T>`                                   |
//!
//! # Design notes
//!
//! Everything dynamic is resolved here, once, at build time: stop names
//! intern to `StopId`s, (route, direction, stop) triples to dense `QueueId`s,
//! (route, stop) pairs to `DockId`s, and each direction of travel to a
//! [`Visit`] list carrying queue, dock, demand, travel and terminus data.
//! Processes downstream never look anything up by name.

pub mod builder;
pub mod error;
pub mod loader;
pub mod network;
pub mod profile;
pub mod route;


pub use builder::NetworkBuilder;
pub use error::{NetError, NetResult};
pub use loader::{ProfileRecord, RouteRecord, load_hourly_profile, load_routes};
pub use network::{DockInfo, Network, QueueInfo, Stop};
pub use profile::ServiceProfile;
pub use route::{Direction, DirectionPlan, RobotOps, Route, Topology, Visit};
