//! The process trait and its suspension protocol.

use mship_core::LockId;

use crate::{EngineCtx, KernelResult};

// ── Suspend ───────────────────────────────────────────────────────────────────

/// What a process asks the engine to do once its current resume returns.
///
/// The engine applies any commands queued through [`EngineCtx`] first, then
/// acts on the suspension.  A process must not suspend while holding a lock;
/// the engine treats that as a fatal discipline error.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Suspend {
    /// Sleep for a relative delay in minutes (zero is allowed), then resume.
    Sleep(f64),
    /// Join the wait queue of a FIFO lock; resume once it is granted.  On
    /// resumption the process holds the lock and must release it before its
    /// next suspension.
    Acquire(LockId),
    /// Voluntary termination.  The process is dropped and never resumes.
    Done,
}

// ── Process ───────────────────────────────────────────────────────────────────

/// A cooperative logical process driven by the engine.
///
/// `resume` runs without preemption: everything it does — reading and writing
/// the world, spawning children, releasing locks — happens atomically at the
/// current instant.  Returning a [`Suspend`] is the only way to yield, so a
/// process is a state machine whose states are its suspension points.
///
/// `W` is the shared world the processes coordinate through.
pub trait Process<W> {
    /// Advance the process from its last suspension point.
    fn resume(&mut self, world: &mut W, ctx: &mut EngineCtx<'_, W>) -> KernelResult<Suspend>;

    /// Short human-readable tag used in discipline error messages.
    fn label(&self) -> &'static str {
        "process"
    }
}
