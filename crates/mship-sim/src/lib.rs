//! `mship-sim` — run orchestration for the mship transit simulator.
//!
//! # Assembling a run
//!
//! ```text
//! SimConfig  ─┐
//! Network    ─┼─ SimBuilder::build() ──► Sim { engine, world }
//! FleetPlan  ─┘        │
//!                      ├─ spawns one PassengerSource per boarding queue
//!                      ├─ spawns the PackageSource (unless rate = 0)
//!                      └─ spawns the FleetScheduler
//! Sim::run() ──► events to the horizon ──► drain ──► RunReport
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | [`run_replications`] — Rayon sweep over seeds, one      |
//! |            | independent `Sim` per thread.                           |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mship_sim::SimBuilder;
//!
//! let mut sim = SimBuilder::new(config, network, plan).build()?;
//! let report = sim.run()?;
//! println!("served {} of {}", report.totals.served, report.totals.passengers);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::{RunReport, RunTotals};
pub use sim::Sim;

#[cfg(feature = "parallel")]
pub use sim::run_replications;
