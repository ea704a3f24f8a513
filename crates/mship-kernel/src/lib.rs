//! `mship-kernel` — cooperative discrete-event engine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`event`]   | `WakeEvent`, `EventQueue` — (time, sequence) ordered min-heap |
//! | [`process`] | `Process` trait and the `Suspend` protocol                    |
//! | [`context`] | `EngineCtx` — spawn/release services during a resume          |
//! | [`lock`]    | `FifoLock` — first-come-first-served mutual exclusion         |
//! | [`engine`]  | `Engine` — dispatch loop, grants, lifecycle, horizon freeze   |
//! | [`error`]   | `KernelError`, `KernelResult<T>`                              |
//!
//! # Design notes
//!
//! Logical processes suspend by *returning* from [`Process::resume`] rather
//! than by blocking, so the whole simulation runs on one thread with no
//! synchronization.  Three rules make runs reproducible:
//!
//! 1. Events dispatch in `(time, sequence)` order; the sequence counter is
//!    monotonic, so same-instant events run in the order they were scheduled.
//! 2. Spawns and lock grants wake the target at the current instant with a
//!    fresh sequence number, placing it after everything already scheduled
//!    for that instant.
//! 3. A resume is never preempted: state read and written inside one resume
//!    is atomic, which is what makes hold-the-lock scan-and-mutate sections
//!    race-free without any further machinery.

pub mod context;
pub mod engine;
pub mod error;
pub mod event;
pub mod lock;
pub mod process;

#[cfg(test)]
mod tests;

pub use context::{Command, EngineCtx};
pub use engine::Engine;
pub use error::{KernelError, KernelResult};
pub use event::{EventQueue, WakeEvent};
pub use lock::FifoLock;
pub use process::{Process, Suspend};
