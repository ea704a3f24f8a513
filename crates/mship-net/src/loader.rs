//! CSV loading for route tables and demand profiles.
//!
//! Loaders read from any `io::Read`, so tests feed them in-memory strings
//! and demo binaries embed their scenario tables as string constants.

use std::io;

use mship_core::RouteId;
use serde::Deserialize;

use crate::{NetError, NetResult, NetworkBuilder, ServiceProfile, Topology};

// ── Records ───────────────────────────────────────────────────────────────────

/// One row of the route table:
/// `route,topology,stop,travel_to_next,daily_demand[,attraction]`.
#[derive(Debug, Deserialize)]
pub struct RouteRecord {
    pub route:          String,
    pub topology:       String,
    pub stop:           String,
    pub travel_to_next: f64,
    pub daily_demand:   f64,
    /// Destination-weight multiplier for this stop; 1.0 when the column is
    /// absent.
    #[serde(default = "default_attraction")]
    pub attraction: f64,
}

fn default_attraction() -> f64 {
    1.0
}

/// One row of the hourly demand profile: `hour,share`.
#[derive(Debug, Deserialize)]
pub struct ProfileRecord {
    pub hour:  u32,
    pub share: f64,
}

fn parse_topology(value: &str) -> NetResult<Topology> {
    if value.eq_ignore_ascii_case("reversing") {
        Ok(Topology::Reversing)
    } else if value.eq_ignore_ascii_case("loop") {
        Ok(Topology::Loop)
    } else {
        Err(NetError::BadTopology { value: value.to_owned() })
    }
}

// ── Loaders ───────────────────────────────────────────────────────────────────

/// Load route rows into `builder`.
///
/// Consecutive rows sharing a route label form one route; an interleaved
/// label starts a second group and fails the eventual build as a duplicate.
/// Returns the new route ids in file order.
pub fn load_routes<R: io::Read>(
    builder: &mut NetworkBuilder,
    reader:  R,
) -> NetResult<Vec<RouteId>> {
    type Group = (String, Topology, Vec<(String, f64, f64)>);

    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut group: Option<Group> = None;
    let mut groups: Vec<Group> = Vec::new();

    for record in csv_reader.deserialize() {
        let record: RouteRecord = record?;
        let topology = parse_topology(&record.topology)?;

        if record.attraction != 1.0 {
            let stop = builder.stop(&record.stop);
            builder.set_attraction(stop, record.attraction);
        }

        let row = (record.stop, record.travel_to_next, record.daily_demand);
        match &mut group {
            Some((label, group_topology, rows)) if *label == record.route => {
                if *group_topology != topology {
                    return Err(NetError::MixedTopology { label: record.route });
                }
                rows.push(row);
            }
            _ => {
                if let Some(done) = group.take() {
                    groups.push(done);
                }
                group = Some((record.route, topology, vec![row]));
            }
        }
    }
    if let Some(done) = group.take() {
        groups.push(done);
    }

    let mut ids = Vec::with_capacity(groups.len());
    for (label, topology, rows) in &groups {
        let rows: Vec<(&str, f64, f64)> =
            rows.iter().map(|(stop, travel, demand)| (stop.as_str(), *travel, *demand)).collect();
        ids.push(builder.add_route(label, *topology, &rows));
    }
    Ok(ids)
}

/// Load an hourly demand profile.  Hours must be consecutive; the first
/// row's hour becomes the profile's start hour.
pub fn load_hourly_profile<R: io::Read>(reader: R) -> NetResult<ServiceProfile> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut start_hour = 0;
    let mut last_hour: Option<u32> = None;
    let mut shares = Vec::new();

    for record in csv_reader.deserialize() {
        let record: ProfileRecord = record?;
        match last_hour {
            None => start_hour = record.hour,
            Some(prev) if record.hour != prev + 1 => {
                return Err(NetError::NonConsecutiveHours { prev, next: record.hour });
            }
            Some(_) => {}
        }
        last_hour = Some(record.hour);
        shares.push(record.share);
    }
    ServiceProfile::from_hourly(start_hour, &shares)
}
