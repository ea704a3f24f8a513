//! Run observer trait for progress reporting.

use mship_core::{ProcessId, SimTime};
use mship_world::World;

use crate::report::RunReport;

/// Callbacks invoked by [`Sim::run_with`][crate::Sim::run_with] around the
/// event loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval_min: f64, next: f64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_event(&mut self, at: SimTime, _pid: ProcessId, world: &World) {
///         if at.0 >= self.next {
///             println!("t={at}: {} passengers so far", world.passengers.len());
///             self.next += self.interval_min;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before the first event is dispatched.
    fn on_start(&mut self, _world: &World) {}

    /// Called after every dispatched event, with the world as the event
    /// left it.  `at` is the event's instant, `pid` the resumed process.
    fn on_event(&mut self, _at: SimTime, _pid: ProcessId, _world: &World) {}

    /// Called once after the horizon drain, with the final report.
    fn on_end(&mut self, _report: &RunReport, _world: &World) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call
/// `run_with` but don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
