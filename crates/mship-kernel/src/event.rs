//! Pending-wake priority queue.
//!
//! # Why a heap, not a tick map
//!
//! Wake times are fractional minutes (stochastic dwell draws, exponential
//! arrival gaps), so there is no integer tick to bucket by.  A binary heap
//! keyed on `(time, sequence)` pops the earliest resumption in O(log n) and
//! keeps same-instant resumptions in the order they were scheduled.
//!
//! # Performance note
//!
//! Every live process has at most one pending wake, so the heap never grows
//! past the process count plus lock grants issued at the current instant.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use mship_core::{ProcessId, SimTime};

// ── WakeEvent ─────────────────────────────────────────────────────────────────

/// One scheduled resumption of one process.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct WakeEvent {
    /// Instant at which the process resumes.
    pub at: SimTime,
    /// Monotonic scheduling counter; the tie-breaker between same-instant
    /// events.
    pub seq: u64,
    /// The process to resume.
    pub process: ProcessId,
}

impl Ord for WakeEvent {
    /// Reversed so `BinaryHeap` (a max-heap) pops the earliest `at`, then the
    /// lowest `seq`, first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.at.cmp(&self.at).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for WakeEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ── EventQueue ────────────────────────────────────────────────────────────────

/// Min-heap of pending wake events with a monotonic tie-break counter.
///
/// Two events pushed at the same instant pop in push order, so processes
/// scheduled earlier resume earlier.  The counter never resets and never
/// decreases, which is what makes the dispatch order total.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap:     BinaryHeap<WakeEvent>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> EventQueue {
        EventQueue::default()
    }

    /// Schedule `process` to resume at `at`.
    pub fn push(&mut self, at: SimTime, process: ProcessId) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(WakeEvent { at, seq, process });
    }

    /// The earliest pending event, without removing it.
    pub fn peek(&self) -> Option<&WakeEvent> {
        self.heap.peek()
    }

    /// Remove and return the earliest pending event.
    pub fn pop(&mut self) -> Option<WakeEvent> {
        self.heap.pop()
    }

    /// The instant of the earliest pending event.
    pub fn next_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|ev| ev.at)
    }

    /// Total pending events.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
