use mship_core::ids::{DockId, LockId, PackageId, PassengerId, QueueId, RobotId, RouteId, StopId, VehicleId};
use mship_core::time::SimTime;
use mship_net::{Direction, NetworkBuilder, ServiceProfile, Topology};

use crate::depot::{Claim, Depot};
use crate::error::WorldError;
use crate::fleet::FleetBoard;
use crate::packages::{PackageLedger, PackageStatus};
use crate::passengers::{PassengerLedger, PassengerOutcome};
use crate::queues::StopQueues;
use crate::snapshot::{Snapshot, SnapshotLog};
use crate::world::World;

/// Ledger preloaded with packages for (route, arrival minute) pairs.
fn packages_for(spec: &[(u32, f64)]) -> (PackageLedger, Vec<PackageId>) {
    let mut ledger = PackageLedger::new();
    let ids = spec
        .iter()
        .enumerate()
        .map(|(i, &(route, at))| {
            ledger.create(StopId(i as u32), RouteId(route), SimTime::at(at))
        })
        .collect();
    (ledger, ids)
}

/// Depot with `pool` robots, holding the given packages in order.
fn depot_with(pool: u32, waiting: &[PackageId]) -> Depot {
    let mut depot = Depot::new(LockId(0), pool);
    for &package in waiting {
        depot.receive(package);
    }
    depot
}

mod queues {
    use super::*;

    #[test]
    fn passengers_pop_in_arrival_order() {
        let mut q = StopQueues::new(2, 0);
        q.enqueue(QueueId(0), PassengerId(7));
        q.enqueue(QueueId(0), PassengerId(3));
        q.enqueue(QueueId(1), PassengerId(9));

        assert_eq!(q.take_up_to(QueueId(0), 10), vec![PassengerId(7), PassengerId(3)]);
        assert_eq!(q.queue_len(QueueId(0)), 0);
        assert_eq!(q.queue_len(QueueId(1)), 1);
    }

    #[test]
    fn take_up_to_caps_the_batch() {
        let mut q = StopQueues::new(1, 0);
        for i in 0..5 {
            q.enqueue(QueueId(0), PassengerId(i));
        }

        assert_eq!(q.take_up_to(QueueId(0), 2), vec![PassengerId(0), PassengerId(1)]);
        assert_eq!(q.queue_len(QueueId(0)), 3);
    }

    #[test]
    fn docks_hold_robots_in_parking_order() {
        let mut q = StopQueues::new(0, 2);
        q.dock_push(DockId(1), RobotId(4));
        q.dock_push(DockId(1), RobotId(2));

        assert_eq!(q.dock_len(DockId(1)), 2);
        assert_eq!(q.dock_take_up_to(DockId(1), 1), vec![RobotId(4)]);
        assert_eq!(q.dock_take_up_to(DockId(1), 5), vec![RobotId(2)]);
        assert_eq!(q.dock_len(DockId(0)), 0);
    }

    #[test]
    fn drain_sweeps_queues_in_id_order() {
        let mut q = StopQueues::new(3, 0);
        q.enqueue(QueueId(2), PassengerId(5));
        q.enqueue(QueueId(0), PassengerId(1));
        q.enqueue(QueueId(0), PassengerId(2));

        assert_eq!(
            q.drain_passengers(),
            vec![PassengerId(1), PassengerId(2), PassengerId(5)]
        );
        assert_eq!(q.waiting_total(), 0);
    }
}

mod passengers {
    use super::*;

    /// One passenger queued at t=10, riding route 0 forward.
    fn one_waiting() -> (PassengerLedger, PassengerId) {
        let mut ledger = PassengerLedger::new();
        let id = ledger.create(
            StopId(0),
            StopId(2),
            RouteId(0),
            Direction::Forward,
            SimTime::at(10.0),
        );
        (ledger, id)
    }

    #[test]
    fn stamps_produce_wait_and_ride_times() {
        let (mut ledger, id) = one_waiting();
        ledger.record_pickup(id, SimTime::at(14.0)).unwrap();
        ledger.record_dropoff(id, SimTime::at(21.5)).unwrap();

        let p = ledger.get(id);
        assert_eq!(p.wait_minutes(), Some(4.0));
        assert_eq!(p.ride_minutes(), Some(7.5));
        assert_eq!(p.outcome(), PassengerOutcome::Served);
    }

    #[test]
    fn pickup_cannot_precede_arrival() {
        let (mut ledger, id) = one_waiting();
        let err = ledger.record_pickup(id, SimTime::at(9.0)).unwrap_err();
        assert!(matches!(err, WorldError::PickupBeforeArrival { .. }));
    }

    #[test]
    fn double_pickup_is_rejected() {
        let (mut ledger, id) = one_waiting();
        ledger.record_pickup(id, SimTime::at(12.0)).unwrap();
        let err = ledger.record_pickup(id, SimTime::at(13.0)).unwrap_err();
        assert!(matches!(err, WorldError::DoublePickup { .. }));
    }

    #[test]
    fn dropoff_requires_a_pickup() {
        let (mut ledger, id) = one_waiting();
        let err = ledger.record_dropoff(id, SimTime::at(20.0)).unwrap_err();
        assert!(matches!(err, WorldError::DropoffWithoutPickup { .. }));
    }

    #[test]
    fn double_dropoff_is_rejected() {
        let (mut ledger, id) = one_waiting();
        ledger.record_pickup(id, SimTime::at(12.0)).unwrap();
        ledger.record_dropoff(id, SimTime::at(20.0)).unwrap();
        let err = ledger.record_dropoff(id, SimTime::at(25.0)).unwrap_err();
        assert!(matches!(err, WorldError::DoubleDropoff { .. }));
    }

    #[test]
    fn rides_must_take_time() {
        let (mut ledger, id) = one_waiting();
        ledger.record_pickup(id, SimTime::at(12.0)).unwrap();
        let err = ledger.record_dropoff(id, SimTime::at(12.0)).unwrap_err();
        assert!(matches!(err, WorldError::RideNotForward { .. }));
    }

    #[test]
    fn outcomes_follow_the_stamps() {
        let (mut ledger, id) = one_waiting();
        assert_eq!(ledger.get(id).outcome(), PassengerOutcome::Missed);
        ledger.record_pickup(id, SimTime::at(12.0)).unwrap();
        assert_eq!(ledger.get(id).outcome(), PassengerOutcome::Riding);
    }

    #[test]
    fn discards_are_counted_but_never_stored() {
        let (mut ledger, _) = one_waiting();
        ledger.note_discarded();
        ledger.note_discarded();
        assert_eq!(ledger.discarded(), 2);
        assert_eq!(ledger.len(), 1);
    }
}

mod packages {
    use super::*;

    #[test]
    fn lifecycle_walks_depot_onboard_delivered() {
        let (mut ledger, ids) = packages_for(&[(0, 5.0)]);
        assert_eq!(ledger.get(ids[0]).status(), PackageStatus::AtDepot);

        ledger.mark_onboard(ids[0]).unwrap();
        assert_eq!(ledger.get(ids[0]).status(), PackageStatus::Onboard);

        ledger.mark_delivered(ids[0], SimTime::at(42.0)).unwrap();
        assert_eq!(ledger.get(ids[0]).status(), PackageStatus::Delivered);
        assert_eq!(ledger.get(ids[0]).delivery_time(), Some(SimTime::at(42.0)));
    }

    #[test]
    fn skipping_the_onboard_leg_is_rejected() {
        let (mut ledger, ids) = packages_for(&[(0, 5.0)]);
        let err = ledger.mark_delivered(ids[0], SimTime::at(42.0)).unwrap_err();
        assert!(matches!(
            err,
            WorldError::BadPackageTransition { from: PackageStatus::AtDepot, .. }
        ));
    }

    #[test]
    fn double_delivery_is_rejected() {
        let (mut ledger, ids) = packages_for(&[(0, 5.0)]);
        ledger.mark_onboard(ids[0]).unwrap();
        ledger.mark_delivered(ids[0], SimTime::at(42.0)).unwrap();
        let err = ledger.mark_delivered(ids[0], SimTime::at(50.0)).unwrap_err();
        assert!(matches!(
            err,
            WorldError::BadPackageTransition { from: PackageStatus::Delivered, .. }
        ));
    }

    #[test]
    fn status_counts_track_transitions() {
        let (mut ledger, ids) = packages_for(&[(0, 1.0), (0, 2.0), (1, 3.0)]);
        ledger.mark_onboard(ids[1]).unwrap();
        assert_eq!(ledger.count_in(PackageStatus::AtDepot), 2);
        assert_eq!(ledger.count_in(PackageStatus::Onboard), 1);
        assert_eq!(ledger.count_in(PackageStatus::Delivered), 0);
    }
}

mod depot {
    use super::*;

    #[test]
    fn claim_pairs_packages_in_arrival_order() {
        let (mut ledger, ids) = packages_for(&[(0, 1.0), (0, 2.0), (0, 3.0)]);
        let mut depot = depot_with(5, &ids);

        let claims = depot
            .claim(&mut ledger, RouteId(0), SimTime::at(10.0), 10)
            .unwrap();

        assert_eq!(
            claims,
            vec![
                Claim { robot: RobotId(0), package: ids[0] },
                Claim { robot: RobotId(1), package: ids[1] },
                Claim { robot: RobotId(2), package: ids[2] },
            ]
        );
        assert_eq!(depot.waiting_packages(), 0);
        assert_eq!(depot.idle_robots(), 2);
        assert_eq!(ledger.get(ids[0]).status(), PackageStatus::Onboard);
    }

    #[test]
    fn claim_skips_other_routes_and_future_arrivals() {
        let (mut ledger, ids) = packages_for(&[(1, 1.0), (0, 20.0), (0, 2.0)]);
        let mut depot = depot_with(5, &ids);

        let claims = depot
            .claim(&mut ledger, RouteId(0), SimTime::at(10.0), 10)
            .unwrap();

        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].package, ids[2]);
        // The skipped packages keep their place for later passes.
        assert_eq!(depot.waiting_packages(), 2);
        assert_eq!(ledger.get(ids[0]).status(), PackageStatus::AtDepot);
        assert_eq!(ledger.get(ids[1]).status(), PackageStatus::AtDepot);
    }

    #[test]
    fn claim_stops_when_the_pool_runs_dry() {
        let (mut ledger, ids) = packages_for(&[(0, 1.0), (0, 2.0), (0, 3.0)]);
        let mut depot = depot_with(2, &ids);

        let claims = depot
            .claim(&mut ledger, RouteId(0), SimTime::at(10.0), 10)
            .unwrap();

        assert_eq!(claims.len(), 2);
        assert_eq!(depot.idle_robots(), 0);
        assert_eq!(depot.waiting_packages(), 1);
        assert_eq!(ledger.get(ids[2]).status(), PackageStatus::AtDepot);
    }

    #[test]
    fn claim_respects_the_bay_limit() {
        let (mut ledger, ids) = packages_for(&[(0, 1.0), (0, 2.0), (0, 3.0)]);
        let mut depot = depot_with(5, &ids);

        let claims = depot
            .claim(&mut ledger, RouteId(0), SimTime::at(10.0), 1)
            .unwrap();

        assert_eq!(claims.len(), 1);
        assert_eq!(depot.waiting_packages(), 2);
        assert_eq!(depot.idle_robots(), 4);
    }

    #[test]
    fn returned_robots_rejoin_the_pool_in_order() {
        let (mut ledger, ids) = packages_for(&[(0, 1.0), (0, 2.0)]);
        let mut depot = depot_with(2, &ids);
        let claims = depot
            .claim(&mut ledger, RouteId(0), SimTime::at(10.0), 10)
            .unwrap();
        assert_eq!(depot.idle_robots(), 0);

        depot
            .return_robots(claims.iter().map(|c| c.robot))
            .unwrap();
        assert_eq!(depot.idle_robots(), 2);

        // The pool reuses the longest-idle robot first.
        let (mut ledger2, more) = packages_for(&[(0, 1.0)]);
        depot.receive(more[0]);
        let next = depot
            .claim(&mut ledger2, RouteId(0), SimTime::at(20.0), 10)
            .unwrap();
        assert_eq!(next[0].robot, RobotId(0));
    }

    #[test]
    fn overfilling_the_pool_is_rejected() {
        let mut depot = depot_with(1, &[]);
        let err = depot.return_robots([RobotId(9)]).unwrap_err();
        assert!(matches!(err, WorldError::PoolOverflow { total: 1 }));
    }

    #[test]
    fn drain_empties_the_waiting_queue_in_order() {
        let (_, ids) = packages_for(&[(0, 1.0), (1, 2.0)]);
        let mut depot = depot_with(3, &ids);

        assert_eq!(depot.drain_waiting(), ids);
        assert_eq!(depot.waiting_packages(), 0);
    }
}

mod fleet {
    use super::*;

    /// Board with three vehicles launched at t=0, 10, 20.
    fn three_launches() -> FleetBoard {
        let mut board = FleetBoard::new();
        for (i, at) in [0.0, 10.0, 20.0].into_iter().enumerate() {
            board.register(
                format!("red-{i}"),
                RouteId(0),
                SimTime::at(at),
                SimTime::at(at + 100.0),
            );
        }
        board
    }

    #[test]
    fn flags_land_on_the_oldest_active_vehicles() {
        let mut board = three_launches();
        assert_eq!(board.flag_oldest_active(1), vec![VehicleId(0)]);
        assert!(board.is_flagged(VehicleId(0)));
        assert!(!board.is_flagged(VehicleId(1)));

        // Already-flagged vehicles are passed over.
        assert_eq!(board.flag_oldest_active(1), vec![VehicleId(1)]);
    }

    #[test]
    fn retired_vehicles_are_never_flagged() {
        let mut board = three_launches();
        board.mark_retired(VehicleId(0), SimTime::at(30.0)).unwrap();

        assert_eq!(board.flag_oldest_active(5), vec![VehicleId(1), VehicleId(2)]);
        assert_eq!(board.active_count(), 2);
    }

    #[test]
    fn double_retirement_is_rejected() {
        let mut board = three_launches();
        board.mark_retired(VehicleId(1), SimTime::at(30.0)).unwrap();
        let err = board.mark_retired(VehicleId(1), SimTime::at(31.0)).unwrap_err();
        assert!(matches!(err, WorldError::DoubleRetire { vehicle: VehicleId(1) }));
        assert_eq!(board.get(VehicleId(1)).retired_at(), Some(SimTime::at(30.0)));
    }
}

mod snapshots {
    use super::*;

    #[test]
    fn utilization_is_onboard_over_capacity() {
        let mut log = SnapshotLog::new();
        log.record(Snapshot {
            time:        SimTime::at(12.0),
            vehicle:     VehicleId(0),
            stop:        StopId(3),
            onboard:     11,
            capacity:    22,
            picked_up:   4,
            dropped_off: 1,
            robots:      2,
        });

        assert_eq!(log.len(), 1);
        let row = log.rows()[0];
        assert!((row.utilization() - 0.5).abs() < 1e-12);
    }
}

mod world {
    use super::*;

    /// World over one reversing route a-b-c with two robots.
    fn small_world() -> World {
        let mut builder = NetworkBuilder::new();
        builder.add_route(
            "red",
            Topology::Reversing,
            &[("a", 4.0, 10.0), ("b", 6.0, 20.0), ("c", 0.0, 30.0)],
        );
        builder.set_profile(ServiceProfile::from_hourly(6, &[1.0]).unwrap());
        World::new(builder.build().unwrap(), LockId(0), 2)
    }

    #[test]
    fn queues_and_docks_match_the_network() {
        let world = small_world();
        // Two boarding positions per direction, and one dock per route stop.
        assert_eq!(world.net.queue_count(), 4);
        assert_eq!(world.net.dock_count(), 3);
        assert_eq!(world.queues.queue_len(QueueId(3)), 0);
        assert_eq!(world.queues.dock_len(DockId(2)), 0);
        assert_eq!(world.depot.total_robots(), 2);
    }

    #[test]
    fn drain_collects_queued_passengers_and_waiting_packages() {
        let mut world = small_world();
        let p = world.passengers.create(
            StopId(0),
            StopId(1),
            RouteId(0),
            Direction::Forward,
            SimTime::at(5.0),
        );
        world.queues.enqueue(QueueId(0), p);
        let k = world.packages.create(StopId(1), RouteId(0), SimTime::at(6.0));
        world.depot.receive(k);

        let missed = world.drain_missed();
        assert_eq!(missed.passengers, vec![p]);
        assert_eq!(missed.packages, vec![k]);
        assert_eq!(world.queues.waiting_total(), 0);
        assert_eq!(world.depot.waiting_packages(), 0);
    }
}
