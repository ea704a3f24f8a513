//! Per-resume context handed to processes.

use mship_core::{LockId, ProcessId, SimTime};

use crate::Process;

// ── Command ───────────────────────────────────────────────────────────────────

/// A deferred engine action queued during one resume.
///
/// Commands apply in the order they were queued, after the resume returns and
/// before its suspension takes effect.
pub enum Command<W> {
    /// Register the boxed process under its pre-assigned ID, first wake at
    /// the current instant.
    Spawn(ProcessId, Box<dyn Process<W>>),
    /// Hand the lock to its next waiter (or free it).
    Release(LockId),
}

// ── EngineCtx ─────────────────────────────────────────────────────────────────

/// Engine services available to a process while it runs.
///
/// The context borrows the engine's command buffer, so everything requested
/// here is staged rather than applied: the engine works through the staged
/// commands as soon as the resume returns.
pub struct EngineCtx<'a, W> {
    now:          SimTime,
    current:      ProcessId,
    commands:     &'a mut Vec<Command<W>>,
    next_process: &'a mut u32,
}

impl<'a, W> EngineCtx<'a, W> {
    pub(crate) fn new(
        now:          SimTime,
        current:      ProcessId,
        commands:     &'a mut Vec<Command<W>>,
        next_process: &'a mut u32,
    ) -> EngineCtx<'a, W> {
        EngineCtx { now, current, commands, next_process }
    }

    /// Current simulation time.
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// ID of the process currently resumed.
    pub fn pid(&self) -> ProcessId {
        self.current
    }

    /// Register a child process.
    ///
    /// The ID is assigned immediately (spawn order is ID order), so the
    /// caller can record it before the child ever runs.  The child's first
    /// resume happens at the current instant, sequenced after every wake
    /// already pending for this instant.
    pub fn spawn(&mut self, process: Box<dyn Process<W>>) -> ProcessId {
        let id = ProcessId(*self.next_process);
        *self.next_process += 1;
        self.commands.push(Command::Spawn(id, process));
        id
    }

    /// Queue the release of a lock held by this process.
    ///
    /// Applied once the resume returns: the longest-waiting process (if any)
    /// is granted the lock and woken at the current instant.  Releasing a
    /// lock this process does not hold is a fatal discipline error.
    pub fn release(&mut self, lock: LockId) {
        self.commands.push(Command::Release(lock));
    }
}
