use mship_core::{LockId, ProcessId};
use thiserror::Error;

/// Fatal engine errors.
///
/// Discipline violations abort the run: they indicate a miswritten process,
/// not a recoverable simulation condition.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error("{label} {process} slept for an invalid delay of {minutes} minutes")]
    InvalidDelay {
        process: ProcessId,
        label:   &'static str,
        minutes: f64,
    },

    #[error("{label} {process} suspended while still holding {lock}")]
    SuspendedWhileHolding {
        process: ProcessId,
        label:   &'static str,
        lock:    LockId,
    },

    #[error("{label} {process} finished while still holding {lock}")]
    FinishedWhileHolding {
        process: ProcessId,
        label:   &'static str,
        lock:    LockId,
    },

    #[error("{label} {process} released {lock}, which it does not hold")]
    ReleaseWithoutHold {
        process: ProcessId,
        label:   &'static str,
        lock:    LockId,
    },

    #[error("{label} {process} referenced unregistered {lock}")]
    UnknownLock {
        process: ProcessId,
        label:   &'static str,
        lock:    LockId,
    },

    /// A wake event referenced a vacated process slot.  Unreachable while the
    /// one-pending-wake-per-process invariant holds.
    #[error("wake event for {process}, whose slot is vacant")]
    StaleWake { process: ProcessId },

    /// Domain error raised inside a process body.
    #[error(transparent)]
    Process(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl KernelError {
    /// Wrap a domain error raised inside a process body.
    pub fn process<E>(err: E) -> KernelError
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        KernelError::Process(Box::new(err))
    }
}

pub type KernelResult<T> = Result<T, KernelError>;
