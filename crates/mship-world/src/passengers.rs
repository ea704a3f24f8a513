//! Passenger records and the append-only ledger that owns them.
//!
//! A passenger is three immutable facts fixed at creation (where they
//! stand, where they want to go, which service they wait for) plus two
//! timestamps stamped by the vehicle that serves them.  The ledger is
//! the only writer of those timestamps and refuses any stamping order
//! that would break the arrival <= pickup < dropoff chain.

use mship_core::ids::{PassengerId, RouteId, StopId};
use mship_core::time::SimTime;
use mship_net::Direction;

use crate::error::{WorldError, WorldResult};

/// How a passenger's run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PassengerOutcome {
    /// Boarded and alighted at their destination.
    Served,
    /// Boarded but never alighted: still riding at the horizon, or their
    /// vehicle terminated with them aboard.
    Riding,
    /// Still waiting at a stop when the clock froze.
    Missed,
}

impl PassengerOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PassengerOutcome::Served => "served",
            PassengerOutcome::Riding => "riding",
            PassengerOutcome::Missed => "missed",
        }
    }
}

/// One passenger, from queue entry to (at most) one pickup and one dropoff.
#[derive(Clone, Debug)]
pub struct Passenger {
    /// Stop where the passenger entered the queue.
    pub origin: StopId,
    /// Stop the passenger wants to reach.
    pub destination: StopId,
    /// Route whose queue they joined.
    pub route: RouteId,
    /// Travel direction of that queue.
    pub direction: Direction,
    /// Instant they joined the queue.
    pub arrival_time: SimTime,
    pickup_time:  Option<SimTime>,
    dropoff_time: Option<SimTime>,
}

impl Passenger {
    /// Instant a vehicle boarded them, if any.
    pub fn pickup_time(&self) -> Option<SimTime> {
        self.pickup_time
    }

    /// Instant they alighted at their destination, if any.
    pub fn dropoff_time(&self) -> Option<SimTime> {
        self.dropoff_time
    }

    /// Minutes spent waiting at the stop, once boarded.
    pub fn wait_minutes(&self) -> Option<f64> {
        self.pickup_time.map(|t| t - self.arrival_time)
    }

    /// Minutes spent on board, once served.
    pub fn ride_minutes(&self) -> Option<f64> {
        match (self.pickup_time, self.dropoff_time) {
            (Some(on), Some(off)) => Some(off - on),
            _ => None,
        }
    }

    /// Terminal disposition, meaningful once the run has ended.
    pub fn outcome(&self) -> PassengerOutcome {
        match (self.pickup_time, self.dropoff_time) {
            (_, Some(_))    => PassengerOutcome::Served,
            (Some(_), None) => PassengerOutcome::Riding,
            (None, None)    => PassengerOutcome::Missed,
        }
    }
}

/// Append-only store of every passenger ever queued, indexed by
/// [`PassengerId`] in creation order.
#[derive(Debug, Default)]
pub struct PassengerLedger {
    records: Vec<Passenger>,
    /// Arrivals past the late cutoff, counted but never queued.
    discarded: u64,
}

impl PassengerLedger {
    pub fn new() -> PassengerLedger {
        PassengerLedger::default()
    }

    /// Record a new waiting passenger and hand back their id.
    pub fn create(
        &mut self,
        origin: StopId,
        destination: StopId,
        route: RouteId,
        direction: Direction,
        arrival_time: SimTime,
    ) -> PassengerId {
        let id = PassengerId(self.records.len() as u32);
        self.records.push(Passenger {
            origin,
            destination,
            route,
            direction,
            arrival_time,
            pickup_time:  None,
            dropoff_time: None,
        });
        id
    }

    /// Note an arrival that fell past the late cutoff and was turned away.
    pub fn note_discarded(&mut self) {
        self.discarded += 1;
    }

    /// Stamp the boarding instant.  `at` must not precede the arrival,
    /// and a passenger boards at most once.
    pub fn record_pickup(&mut self, id: PassengerId, at: SimTime) -> WorldResult<()> {
        let record = &mut self.records[id.index()];
        if record.pickup_time.is_some() {
            return Err(WorldError::DoublePickup { passenger: id });
        }
        if at < record.arrival_time {
            return Err(WorldError::PickupBeforeArrival {
                passenger: id,
                at,
                arrival: record.arrival_time,
            });
        }
        record.pickup_time = Some(at);
        Ok(())
    }

    /// Stamp the alighting instant.  Requires a prior pickup and a
    /// strictly positive ride.
    pub fn record_dropoff(&mut self, id: PassengerId, at: SimTime) -> WorldResult<()> {
        let record = &mut self.records[id.index()];
        let Some(pickup) = record.pickup_time else {
            return Err(WorldError::DropoffWithoutPickup { passenger: id });
        };
        if record.dropoff_time.is_some() {
            return Err(WorldError::DoubleDropoff { passenger: id });
        }
        if at <= pickup {
            return Err(WorldError::RideNotForward { passenger: id, at, pickup });
        }
        record.dropoff_time = Some(at);
        Ok(())
    }

    pub fn get(&self, id: PassengerId) -> &Passenger {
        &self.records[id.index()]
    }

    /// Passengers created so far (discards not included).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Arrivals turned away by the late cutoff.
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    /// All records in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (PassengerId, &Passenger)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, p)| (PassengerId(i as u32), p))
    }
}
