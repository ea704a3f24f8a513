//! The engine: event dispatch, lock grants, process lifecycle.
//!
//! # Design
//!
//! One `step` pops the earliest wake event, resumes that process against the
//! shared world, applies the commands it staged (spawns, releases) in call
//! order, and finally acts on its suspension.  Nothing else runs while a
//! process is resumed, so every resume is an atomic slice of simulated time.
//!
//! The horizon freezes the clock: events scheduled at or after it stay in the
//! queue undispatched, and `now` lands exactly on the horizon.  Processes are
//! expected to wind down cooperatively well before that point; the freeze is
//! the backstop that bounds a run no matter what they do.

use mship_core::{LockId, ProcessId, SimTime};

use crate::{Command, EngineCtx, EventQueue, FifoLock, KernelError, KernelResult, Process, Suspend};

// ── Engine ────────────────────────────────────────────────────────────────────

/// Cooperative discrete-event engine over a world type `W`.
pub struct Engine<W> {
    now:          SimTime,
    horizon:      SimTime,
    queue:        EventQueue,
    /// Process slots indexed by `ProcessId`; `None` once a process finished.
    /// IDs are never reused.
    procs:        Vec<Option<Box<dyn Process<W>>>>,
    locks:        Vec<FifoLock>,
    /// Reusable staging buffer for commands queued during a resume.
    commands:     Vec<Command<W>>,
    next_process: u32,
    dispatched:   u64,
}

impl<W> Engine<W> {
    pub fn new(horizon: SimTime) -> Engine<W> {
        Engine {
            now:          SimTime::ZERO,
            horizon,
            queue:        EventQueue::new(),
            procs:        Vec::new(),
            locks:        Vec::new(),
            commands:     Vec::new(),
            next_process: 0,
            dispatched:   0,
        }
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    /// Register a FIFO lock.  Locks live for the whole run.
    pub fn add_lock(&mut self) -> LockId {
        let id = LockId(self.locks.len() as u32);
        self.locks.push(FifoLock::default());
        id
    }

    /// Register a root process with its first resume at `at`.
    ///
    /// Root processes are spawned before the run; processes spawned while the
    /// engine is running go through [`EngineCtx::spawn`] instead.
    pub fn spawn(&mut self, at: SimTime, process: Box<dyn Process<W>>) -> ProcessId {
        let id = ProcessId(self.next_process);
        self.next_process += 1;
        debug_assert_eq!(id.index(), self.procs.len());
        self.procs.push(Some(process));
        self.queue.push(at, id);
        id
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    /// Dispatch the single earliest event.
    ///
    /// Returns the instant and process dispatched, or `None` once the queue
    /// has drained or the next event lies at or beyond the horizon.  In both
    /// terminal cases the clock is left exactly on the horizon.
    pub fn step(&mut self, world: &mut W) -> KernelResult<Option<(SimTime, ProcessId)>> {
        let Some(ev) = self.queue.peek().copied() else {
            self.now = self.horizon;
            return Ok(None);
        };
        if ev.at >= self.horizon {
            self.now = self.horizon;
            return Ok(None);
        }
        self.queue.pop();
        self.now = ev.at;
        let process = ev.process;

        let Some(mut proc) = self.procs[process.index()].take() else {
            return Err(KernelError::StaleWake { process });
        };
        let label = proc.label();

        let resumed = {
            let mut ctx =
                EngineCtx::new(self.now, process, &mut self.commands, &mut self.next_process);
            proc.resume(world, &mut ctx)
        };
        let suspend = match resumed {
            Ok(suspend) => suspend,
            Err(err) => {
                // A failed resume must not leave staged commands behind.
                self.commands.clear();
                return Err(err);
            }
        };

        // Commands first, in call order; the suspension takes effect last.
        for command in self.commands.drain(..) {
            match command {
                Command::Spawn(id, child) => {
                    debug_assert_eq!(id.index(), self.procs.len());
                    self.procs.push(Some(child));
                    self.queue.push(self.now, id);
                }
                Command::Release(lock) => {
                    let Some(state) = self.locks.get_mut(lock.index()) else {
                        return Err(KernelError::UnknownLock { process, label, lock });
                    };
                    if state.holder != Some(process) {
                        return Err(KernelError::ReleaseWithoutHold { process, label, lock });
                    }
                    state.holder = state.waiters.pop_front();
                    if let Some(next) = state.holder {
                        self.queue.push(self.now, next);
                    }
                }
            }
        }

        match suspend {
            Suspend::Sleep(minutes) => {
                if !minutes.is_finite() || minutes < 0.0 {
                    return Err(KernelError::InvalidDelay { process, label, minutes });
                }
                if let Some(lock) = self.lock_held_by(process) {
                    return Err(KernelError::SuspendedWhileHolding { process, label, lock });
                }
                self.queue.push(self.now + minutes, process);
                self.procs[process.index()] = Some(proc);
            }
            Suspend::Acquire(lock) => {
                if let Some(held) = self.lock_held_by(process) {
                    return Err(KernelError::SuspendedWhileHolding { process, label, lock: held });
                }
                let Some(state) = self.locks.get_mut(lock.index()) else {
                    return Err(KernelError::UnknownLock { process, label, lock });
                };
                if state.holder.is_none() {
                    debug_assert!(state.waiters.is_empty());
                    state.holder = Some(process);
                    self.queue.push(self.now, process);
                } else {
                    state.waiters.push_back(process);
                }
                self.procs[process.index()] = Some(proc);
            }
            Suspend::Done => {
                if let Some(lock) = self.lock_held_by(process) {
                    return Err(KernelError::FinishedWhileHolding { process, label, lock });
                }
                // Slot stays vacant.
            }
        }

        self.dispatched += 1;
        Ok(Some((self.now, process)))
    }

    /// Dispatch events in time order until the queue drains or the horizon
    /// freezes the clock.  Returns the number of events dispatched.
    pub fn run(&mut self, world: &mut W) -> KernelResult<u64> {
        let before = self.dispatched;
        while self.step(world)?.is_some() {}
        Ok(self.dispatched - before)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Current simulation time.
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// The freeze point this engine was built with.
    pub fn horizon(&self) -> SimTime {
        self.horizon
    }

    /// Total events dispatched so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Pending wake events (lock waiters have none).
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Inspect a lock's holder and wait queue.
    pub fn lock(&self, lock: LockId) -> Option<&FifoLock> {
        self.locks.get(lock.index())
    }

    /// The lock `process` currently holds, if any.
    ///
    /// # Performance note
    ///
    /// Linear in the lock count, which is one per warehouse in practice.
    fn lock_held_by(&self, process: ProcessId) -> Option<LockId> {
        self.locks
            .iter()
            .position(|l| l.holder == Some(process))
            .map(|i| LockId(i as u32))
    }
}
