//! FIFO mutual-exclusion locks.
//!
//! # Grant discipline
//!
//! A free lock is granted on the spot; a busy one queues the requester,
//! oldest first.  Release hands the lock to the longest waiter and wakes it
//! at the current instant, so the critical section that follows runs inside a
//! single resume and is atomic with respect to every other process.

use std::collections::VecDeque;

use mship_core::ProcessId;

/// State of one FIFO lock.  Grant and release live in the engine because
/// they schedule wakes; this type only owns the bookkeeping.
#[derive(Debug, Default)]
pub struct FifoLock {
    /// Process currently holding the lock, if any.
    pub(crate) holder: Option<ProcessId>,
    /// Processes waiting for the lock, oldest first.
    pub(crate) waiters: VecDeque<ProcessId>,
}

impl FifoLock {
    /// True when no process holds the lock.
    pub fn is_free(&self) -> bool {
        self.holder.is_none()
    }

    /// Process currently holding the lock.
    pub fn holder(&self) -> Option<ProcessId> {
        self.holder
    }

    /// Number of processes queued behind the current holder.
    pub fn queue_len(&self) -> usize {
        self.waiters.len()
    }
}
