//! Unit tests for the event queue, dispatch order, FIFO locks, and the
//! engine's discipline checks.

use mship_core::{LockId, ProcessId, SimTime};

use crate::{Engine, EngineCtx, EventQueue, KernelError, KernelResult, Process, Suspend};

// ── Shared test world and processes ───────────────────────────────────────────

/// World shared by the test processes: an append-only trace of marks.
#[derive(Default)]
struct Trace {
    marks: Vec<(f64, &'static str)>,
}

impl Trace {
    fn mark(&mut self, now: SimTime, tag: &'static str) {
        self.marks.push((now.0, tag));
    }

    fn tags(&self) -> Vec<&'static str> {
        self.marks.iter().map(|&(_, tag)| tag).collect()
    }
}

/// Marks its tag on every resume, sleeping through `gaps` in order, then
/// finishes.
struct Ticker {
    tag:  &'static str,
    gaps: Vec<f64>,
    next: usize,
}

impl Ticker {
    fn new(tag: &'static str, gaps: &[f64]) -> Box<Ticker> {
        Box::new(Ticker { tag, gaps: gaps.to_vec(), next: 0 })
    }
}

impl Process<Trace> for Ticker {
    fn resume(
        &mut self,
        world: &mut Trace,
        ctx:   &mut EngineCtx<'_, Trace>,
    ) -> KernelResult<Suspend> {
        world.mark(ctx.now(), self.tag);
        if self.next < self.gaps.len() {
            self.next += 1;
            Ok(Suspend::Sleep(self.gaps[self.next - 1]))
        } else {
            Ok(Suspend::Done)
        }
    }

    fn label(&self) -> &'static str {
        "ticker"
    }
}

/// Requests the lock, marks its tag inside the critical section, releases.
struct Claimer {
    tag:       &'static str,
    lock:      LockId,
    requested: bool,
}

impl Claimer {
    fn new(tag: &'static str, lock: LockId) -> Box<Claimer> {
        Box::new(Claimer { tag, lock, requested: false })
    }
}

impl Process<Trace> for Claimer {
    fn resume(
        &mut self,
        world: &mut Trace,
        ctx:   &mut EngineCtx<'_, Trace>,
    ) -> KernelResult<Suspend> {
        if !self.requested {
            self.requested = true;
            return Ok(Suspend::Acquire(self.lock));
        }
        world.mark(ctx.now(), self.tag);
        ctx.release(self.lock);
        Ok(Suspend::Done)
    }

    fn label(&self) -> &'static str {
        "claimer"
    }
}

/// Marks its tag, spawns a child ticker, finishes.
struct Spawner {
    tag:       &'static str,
    child_tag: &'static str,
}

impl Process<Trace> for Spawner {
    fn resume(
        &mut self,
        world: &mut Trace,
        ctx:   &mut EngineCtx<'_, Trace>,
    ) -> KernelResult<Suspend> {
        world.mark(ctx.now(), self.tag);
        ctx.spawn(Ticker::new(self.child_tag, &[]));
        Ok(Suspend::Done)
    }

    fn label(&self) -> &'static str {
        "spawner"
    }
}

// ── Event queue ───────────────────────────────────────────────────────────────

mod event_queue {
    use super::*;

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.push(SimTime::at(5.0), ProcessId(0));
        q.push(SimTime::at(3.0), ProcessId(1));
        q.push(SimTime::at(8.0), ProcessId(2));

        assert_eq!(q.next_time(), Some(SimTime::at(3.0)));
        assert_eq!(q.pop().unwrap().process, ProcessId(1));
        assert_eq!(q.pop().unwrap().process, ProcessId(0));
        assert_eq!(q.pop().unwrap().process, ProcessId(2));
        assert!(q.pop().is_none());
    }

    #[test]
    fn same_instant_pops_in_push_order() {
        let mut q = EventQueue::new();
        q.push(SimTime::at(5.0), ProcessId(7));
        q.push(SimTime::at(5.0), ProcessId(3));
        q.push(SimTime::at(5.0), ProcessId(9));

        assert_eq!(q.pop().unwrap().process, ProcessId(7));
        assert_eq!(q.pop().unwrap().process, ProcessId(3));
        assert_eq!(q.pop().unwrap().process, ProcessId(9));
    }

    #[test]
    fn len_tracks_pushes_and_pops() {
        let mut q = EventQueue::new();
        assert!(q.is_empty());
        q.push(SimTime::ZERO, ProcessId(0));
        q.push(SimTime::at(1.0), ProcessId(1));
        assert_eq!(q.len(), 2);
        q.pop();
        assert_eq!(q.len(), 1);
    }
}

// ── Dispatch order ────────────────────────────────────────────────────────────

mod dispatch {
    use super::*;

    #[test]
    fn processes_interleave_by_wake_time() {
        let mut world = Trace::default();
        let mut engine = Engine::new(SimTime::at(100.0));
        engine.spawn(SimTime::ZERO, Ticker::new("a", &[10.0, 10.0]));
        engine.spawn(SimTime::ZERO, Ticker::new("b", &[15.0]));

        engine.run(&mut world).unwrap();

        assert_eq!(
            world.marks,
            vec![(0.0, "a"), (0.0, "b"), (10.0, "a"), (15.0, "b"), (20.0, "a")],
        );
    }

    #[test]
    fn zero_delay_resumes_after_pending_same_instant_events() {
        let mut world = Trace::default();
        let mut engine = Engine::new(SimTime::at(100.0));
        engine.spawn(SimTime::at(1.0), Ticker::new("a", &[0.0]));
        engine.spawn(SimTime::at(1.0), Ticker::new("b", &[]));

        engine.run(&mut world).unwrap();

        // The zero-delay re-wake of "a" sorts behind "b"'s already-pending wake.
        assert_eq!(world.tags(), vec!["a", "b", "a"]);
        assert_eq!(world.marks[2].0, 1.0);
    }

    #[test]
    fn spawned_child_runs_after_events_already_scheduled_for_the_instant() {
        let mut world = Trace::default();
        let mut engine = Engine::new(SimTime::at(100.0));
        engine.spawn(SimTime::at(5.0), Ticker::new("a", &[]));
        engine.spawn(SimTime::at(5.0), Box::new(Spawner { tag: "b", child_tag: "c" }));
        engine.spawn(SimTime::at(5.0), Ticker::new("d", &[]));

        engine.run(&mut world).unwrap();

        // "c" is spawned during "b"'s resume but still runs after "d".
        assert_eq!(world.tags(), vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn step_reports_instant_and_process_in_spawn_order() {
        let mut world = Trace::default();
        let mut engine = Engine::new(SimTime::at(100.0));
        let a = engine.spawn(SimTime::at(5.0), Ticker::new("a", &[]));
        let b = engine.spawn(SimTime::at(5.0), Box::new(Spawner { tag: "b", child_tag: "c" }));

        assert_eq!(a, ProcessId(0));
        assert_eq!(b, ProcessId(1));
        assert_eq!(engine.step(&mut world).unwrap(), Some((SimTime::at(5.0), a)));
        assert_eq!(engine.step(&mut world).unwrap(), Some((SimTime::at(5.0), b)));
        // The child was pre-assigned the next ID when `b` spawned it.
        assert_eq!(
            engine.step(&mut world).unwrap(),
            Some((SimTime::at(5.0), ProcessId(2))),
        );
        assert_eq!(engine.step(&mut world).unwrap(), None);
        assert_eq!(engine.dispatched(), 3);
    }
}

// ── FIFO locks ────────────────────────────────────────────────────────────────

mod locks {
    use super::*;

    #[test]
    fn same_instant_contention_grants_in_request_order() {
        let mut world = Trace::default();
        let mut engine = Engine::new(SimTime::at(100.0));
        let lock = engine.add_lock();
        engine.spawn(SimTime::ZERO, Claimer::new("x", lock));
        engine.spawn(SimTime::ZERO, Claimer::new("y", lock));
        engine.spawn(SimTime::ZERO, Claimer::new("z", lock));

        engine.run(&mut world).unwrap();

        assert_eq!(world.tags(), vec!["x", "y", "z"]);
        assert!(engine.lock(lock).unwrap().is_free());
    }

    #[test]
    fn waiters_queue_behind_the_holder() {
        let mut world = Trace::default();
        let mut engine = Engine::new(SimTime::at(100.0));
        let lock = engine.add_lock();
        let x = engine.spawn(SimTime::ZERO, Claimer::new("x", lock));
        engine.spawn(SimTime::ZERO, Claimer::new("y", lock));
        engine.spawn(SimTime::ZERO, Claimer::new("z", lock));

        // Three request resumes: "x" is granted on the spot, the rest queue.
        for _ in 0..3 {
            engine.step(&mut world).unwrap();
        }
        let state = engine.lock(lock).unwrap();
        assert_eq!(state.holder(), Some(x));
        assert_eq!(state.queue_len(), 2);

        engine.run(&mut world).unwrap();
        assert_eq!(engine.lock(lock).unwrap().queue_len(), 0);
    }
}

// ── Discipline errors ─────────────────────────────────────────────────────────

mod discipline {
    use super::*;

    /// Requests the lock, then commits the violation named by `violation`.
    struct Rogue {
        lock:      LockId,
        requested: bool,
        violation: Violation,
    }

    enum Violation {
        SleepHolding,
        FinishHolding,
    }

    impl Process<Trace> for Rogue {
        fn resume(
            &mut self,
            _world: &mut Trace,
            _ctx:   &mut EngineCtx<'_, Trace>,
        ) -> KernelResult<Suspend> {
            if !self.requested {
                self.requested = true;
                return Ok(Suspend::Acquire(self.lock));
            }
            match self.violation {
                Violation::SleepHolding  => Ok(Suspend::Sleep(1.0)),
                Violation::FinishHolding => Ok(Suspend::Done),
            }
        }

        fn label(&self) -> &'static str {
            "rogue"
        }
    }

    /// Releases a lock it never acquired.
    struct Releaser {
        lock: LockId,
    }

    impl Process<Trace> for Releaser {
        fn resume(
            &mut self,
            _world: &mut Trace,
            ctx:    &mut EngineCtx<'_, Trace>,
        ) -> KernelResult<Suspend> {
            ctx.release(self.lock);
            Ok(Suspend::Sleep(1.0))
        }

        fn label(&self) -> &'static str {
            "releaser"
        }
    }

    /// Fails immediately with a wrapped domain error.
    struct Exploder;

    impl Process<Trace> for Exploder {
        fn resume(
            &mut self,
            _world: &mut Trace,
            _ctx:   &mut EngineCtx<'_, Trace>,
        ) -> KernelResult<Suspend> {
            Err(KernelError::process(std::io::Error::other("boom")))
        }

        fn label(&self) -> &'static str {
            "exploder"
        }
    }

    #[test]
    fn sleeping_while_holding_is_fatal() {
        let mut world = Trace::default();
        let mut engine = Engine::new(SimTime::at(100.0));
        let lock = engine.add_lock();
        engine.spawn(SimTime::ZERO, Box::new(Rogue {
            lock,
            requested: false,
            violation: Violation::SleepHolding,
        }));

        let err = engine.run(&mut world).unwrap_err();
        assert!(matches!(err, KernelError::SuspendedWhileHolding { .. }));
    }

    #[test]
    fn finishing_while_holding_is_fatal() {
        let mut world = Trace::default();
        let mut engine = Engine::new(SimTime::at(100.0));
        let lock = engine.add_lock();
        engine.spawn(SimTime::ZERO, Box::new(Rogue {
            lock,
            requested: false,
            violation: Violation::FinishHolding,
        }));

        let err = engine.run(&mut world).unwrap_err();
        assert!(matches!(err, KernelError::FinishedWhileHolding { .. }));
    }

    #[test]
    fn releasing_an_unheld_lock_is_fatal() {
        let mut world = Trace::default();
        let mut engine = Engine::new(SimTime::at(100.0));
        let lock = engine.add_lock();
        engine.spawn(SimTime::ZERO, Box::new(Releaser { lock }));

        let err = engine.run(&mut world).unwrap_err();
        assert!(matches!(err, KernelError::ReleaseWithoutHold { .. }));
    }

    #[test]
    fn negative_delay_is_fatal() {
        let mut world = Trace::default();
        let mut engine = Engine::new(SimTime::at(100.0));
        engine.spawn(SimTime::ZERO, Ticker::new("a", &[-1.0]));

        let err = engine.run(&mut world).unwrap_err();
        assert!(matches!(
            err,
            KernelError::InvalidDelay { minutes, .. } if minutes == -1.0,
        ));
    }

    #[test]
    fn nan_delay_is_fatal() {
        let mut world = Trace::default();
        let mut engine = Engine::new(SimTime::at(100.0));
        engine.spawn(SimTime::ZERO, Ticker::new("a", &[f64::NAN]));

        let err = engine.run(&mut world).unwrap_err();
        assert!(matches!(err, KernelError::InvalidDelay { .. }));
    }

    #[test]
    fn acquiring_an_unregistered_lock_is_fatal() {
        let mut world = Trace::default();
        let mut engine = Engine::new(SimTime::at(100.0));
        engine.spawn(SimTime::ZERO, Claimer::new("x", LockId(7)));

        let err = engine.run(&mut world).unwrap_err();
        assert!(matches!(err, KernelError::UnknownLock { lock: LockId(7), .. }));
    }

    #[test]
    fn domain_errors_propagate_transparently() {
        let mut world = Trace::default();
        let mut engine = Engine::new(SimTime::at(100.0));
        engine.spawn(SimTime::ZERO, Box::new(Exploder));

        let err = engine.run(&mut world).unwrap_err();
        assert!(matches!(err, KernelError::Process(_)));
        assert_eq!(err.to_string(), "boom");
    }
}

// ── Horizon ───────────────────────────────────────────────────────────────────

mod horizon {
    use super::*;

    #[test]
    fn clock_freezes_at_the_horizon() {
        let mut world = Trace::default();
        let mut engine = Engine::new(SimTime::at(10.0));
        engine.spawn(SimTime::ZERO, Ticker::new("a", &[4.0, 4.0, 4.0, 4.0]));

        let dispatched = engine.run(&mut world).unwrap();

        assert_eq!(dispatched, 3);
        assert_eq!(world.marks, vec![(0.0, "a"), (4.0, "a"), (8.0, "a")]);
        assert_eq!(engine.now(), SimTime::at(10.0));
        // The wake at t=12 stays queued, undispatched.
        assert_eq!(engine.pending(), 1);
    }

    #[test]
    fn event_exactly_at_the_horizon_does_not_run() {
        let mut world = Trace::default();
        let mut engine = Engine::new(SimTime::at(10.0));
        engine.spawn(SimTime::ZERO, Ticker::new("a", &[10.0]));

        engine.run(&mut world).unwrap();

        assert_eq!(world.tags(), vec!["a"]);
        assert_eq!(engine.now(), SimTime::at(10.0));
        assert_eq!(engine.pending(), 1);
    }

    #[test]
    fn draining_the_queue_lands_on_the_horizon() {
        let mut world = Trace::default();
        let mut engine = Engine::new(SimTime::at(10.0));
        engine.spawn(SimTime::ZERO, Ticker::new("a", &[]));

        engine.run(&mut world).unwrap();

        assert_eq!(engine.now(), SimTime::at(10.0));
        assert_eq!(engine.pending(), 0);
        assert_eq!(engine.run(&mut world).unwrap(), 0);
    }
}
