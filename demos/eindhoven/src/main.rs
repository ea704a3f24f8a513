//! eindhoven — the two-route Eindhoven mothership scenario.
//!
//! One blue loop line and one red reversing line share the warehouse
//! terminus at Broekakkerseweg 26.  Motherships carry passengers and
//! delivery robots; robots fan packages out from the warehouse to the
//! stops.  Service runs 06:00–22:00 plus a closing hour for the last
//! vehicles to empty out.

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use mship_core::{ProcessId, SimConfig, SimTime, TimeBand, Timings};
use mship_net::{Direction, NetworkBuilder, RobotOps, load_hourly_profile, load_routes};
use mship_ops::{FleetPlan, LaunchGroup, Phase};
use mship_output::{CsvWriter, export_world};
use mship_sim::{SimBuilder, SimObserver};
use mship_world::{PackageStatus, World};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED: u64 = 42;

const SERVICE_START_HOUR: u32 = 6;
const SERVICE_MIN:        f64 = 960.0;  // 06:00–22:00
const HORIZON_MIN:        f64 = 1020.0; // plus one closing hour
const PASSENGER_CUTOFF:   f64 = 900.0;  // no boarding chance after 21:00

const VEHICLE_CAPACITY: u32 = 22;
const ROBOT_BAYS:       u32 = 2;
const ROBOT_POOL:       u32 = 6;
const DAILY_PACKAGES:   f64 = 248.0;

// ── Scenario tables ───────────────────────────────────────────────────────────

// `route,topology,stop,travel_to_next,daily_demand,attraction`, one row per
// stop in route order.  Travel times in minutes, demand in passengers/day.
// Piazza is the city-centre stop and draws double destination weight.
const ROUTES_CSV: &str = "\
route,topology,stop,travel_to_next,daily_demand,attraction\n\
blue,loop,Broekakkerseweg 26,10,10,1.0\n\
blue,loop,\"Eindhoven, Boutenslaan\",9,25,1.0\n\
blue,loop,\"Eindhoven, Kastelenplein\",5,35,1.0\n\
blue,loop,\"Eindhoven, Donizettilaan\",6,40,1.0\n\
blue,loop,\"Eindhoven, Cederlaan\",8,30,1.0\n\
blue,loop,\"Eindhoven, Piazza\",8,60,2.0\n\
blue,loop,Tongelrestraat 276,4,20,1.0\n\
red,reversing,Broekakkerseweg 26,1,10,1.0\n\
red,reversing,\"Eindhoven, Hageheldlaan\",4,30,1.0\n\
red,reversing,Tongelrestraat 392,6,40,1.0\n\
red,reversing,\"Eindhoven, Thomas A Kempislaan\",5,25,1.0\n\
red,reversing,\"Eindhoven, Heistraat\",3,20,1.0\n\
red,reversing,Jan Smitzlaan 20,5,30,1.0\n\
red,reversing,\"Eindhoven, Gagelstraat\",3,35,1.0\n\
red,reversing,Essenstraat 1,3,15,1.0\n\
red,reversing,Johannes van der Waalsweg 39,8,20,1.0\n\
red,reversing,\"Eindhoven, WoensXL/Genovevalaan\",6,45,1.0\n\
red,reversing,Ouverture 228,9,50,1.0\n\
red,reversing,\"Eindhoven, Wijnpeerstraat\",0,40,1.0\n\
";

// Share of daily demand arriving in each service hour; the profile
// validator requires the shares to sum to exactly 1.0.
const PROFILE_CSV: &str = "\
hour,share\n\
6,0.032\n\
7,0.095\n\
8,0.116\n\
9,0.074\n\
10,0.053\n\
11,0.053\n\
12,0.063\n\
13,0.063\n\
14,0.053\n\
15,0.063\n\
16,0.084\n\
17,0.105\n\
18,0.063\n\
19,0.042\n\
20,0.026\n\
21,0.015\n\
";

// ── Progress observer ─────────────────────────────────────────────────────────

/// Prints one status line per simulated hour.
struct HourlyProgress {
    next_mark: f64,
    events:    u64,
}

impl HourlyProgress {
    fn new() -> Self {
        Self { next_mark: 60.0, events: 0 }
    }
}

impl SimObserver for HourlyProgress {
    fn on_event(&mut self, at: SimTime, _pid: ProcessId, world: &World) {
        self.events += 1;
        if at.0 >= self.next_mark {
            let (hour, minute) = at.clock_hm(SERVICE_START_HOUR);
            println!(
                "  {hour:02}:{minute:02}  vehicles {:>2}  passengers {:>5}  delivered {:>4}  events {:>7}",
                world.fleet.active_count(),
                world.passengers.len(),
                world.packages.count_in(PackageStatus::Delivered),
                self.events,
            );
            while at.0 >= self.next_mark {
                self.next_mark += 60.0;
            }
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== eindhoven — mothership transit + last-mile simulation ===");
    println!(
        "Service 06:00-22:00 ({SERVICE_MIN} min) + closing hour  |  Seed: {SEED}"
    );
    println!();

    // 1. Network: two routes from the embedded tables.
    let mut builder = NetworkBuilder::new();
    let route_ids = load_routes(&mut builder, Cursor::new(ROUTES_CSV))?;
    let &[blue, red] = &route_ids[..] else {
        anyhow::bail!("expected exactly two routes, got {}", route_ids.len());
    };
    builder.set_profile(load_hourly_profile(Cursor::new(PROFILE_CSV))?);

    // Robots load at the warehouse terminus on every outbound pass and
    // docked returners are collected on any pass that goes by.
    builder.set_robot_ops(blue, Direction::Forward, RobotOps { load: true, pickup: true });
    builder.set_robot_ops(red, Direction::Forward, RobotOps { load: true, pickup: true });
    builder.set_robot_ops(red, Direction::Backward, RobotOps { load: false, pickup: true });

    let network = builder.build()?;
    println!(
        "Network: {} routes, {} passenger queues, {} delivery targets",
        network.route_count(),
        network.queue_count(),
        network.delivery_targets().len(),
    );

    // 2. Run configuration.
    let config = SimConfig {
        horizon_min:          HORIZON_MIN,
        seed:                 SEED,
        passenger_cutoff_min: PASSENGER_CUTOFF,
        package_cutoff_min:   SERVICE_MIN,
        package_rate_per_min: DAILY_PACKAGES / SERVICE_MIN,
        robot_pool:           ROBOT_POOL,
        timings: Timings {
            stop_dwell:       TimeBand::new(0.5, 1.0)?,
            terminus_layover: TimeBand::new(5.0, 10.0)?,
            robot_outbound:   TimeBand::fixed(3.0)?,
            robot_return:     TimeBand::new(5.0, 15.0)?,
        },
    };

    // 3. Fleet plan: a base fleet all day, a morning-peak wave that is
    // partially retired early, and an evening-peak wave.
    let base = |label: &str, route, count| LaunchGroup {
        count,
        label: label.to_owned(),
        route,
        run_minutes: HORIZON_MIN,
        capacity: VEHICLE_CAPACITY,
        robot_bays: ROBOT_BAYS,
    };
    let wave = |label: &str, route, count, run_minutes| LaunchGroup {
        run_minutes,
        ..base(label, route, count)
    };
    let plan = FleetPlan::new(vec![
        Phase {
            offset_min: 0.0,
            launches:   vec![base("red", red, 2), base("blue", blue, 1)],
            retire:     0,
        },
        Phase {
            offset_min: 60.0,
            launches:   vec![wave("red-am", red, 2, 240.0), wave("blue-am", blue, 1, 240.0)],
            retire:     0,
        },
        // Morning demand tails off before the peak wave's window ends.
        Phase { offset_min: 240.0, launches: vec![], retire: 2 },
        Phase {
            offset_min: 600.0,
            launches:   vec![wave("red-pm", red, 2, 180.0), wave("blue-pm", blue, 1, 180.0)],
            retire:     0,
        },
    ]);
    println!(
        "Fleet plan: {} phases, {} vehicles total, capacity {VEHICLE_CAPACITY}",
        plan.phases.len(),
        plan.total_vehicles(),
    );
    println!();

    // 4. Build and run.
    let mut sim = SimBuilder::new(config, network, plan).build()?;
    let mut progress = HourlyProgress::new();

    let t0 = Instant::now();
    let report = sim.run_with(&mut progress)?;
    let elapsed = t0.elapsed();

    // 5. Summary.
    let totals = &report.totals;
    println!();
    println!(
        "Run complete in {:.3} s — {} events, clock froze at {}",
        elapsed.as_secs_f64(),
        report.dispatched,
        report.ran_until,
    );
    println!();
    println!("{:<26} {:>6}", "passengers created", totals.passengers);
    println!("{:<26} {:>6}", "  served", totals.served);
    println!("{:<26} {:>6}", "  still riding", totals.riding);
    println!("{:<26} {:>6}", "  missed", totals.missed_passengers);
    println!("{:<26} {:>6}", "  discarded (late)", totals.discarded);
    println!("{:<26} {:>6}", "packages received", totals.packages);
    println!("{:<26} {:>6}", "  delivered", totals.delivered);
    println!("{:<26} {:>6}", "  stranded onboard", totals.stranded);
    println!("{:<26} {:>6}", "  left at warehouse", totals.missed_packages);
    println!("{:<26} {:>6}", "vehicles launched", totals.vehicles);
    println!("{:<26} {:>6}", "snapshots recorded", totals.snapshots);
    println!();

    // 6. Export.
    let out_dir = Path::new("output/eindhoven");
    std::fs::create_dir_all(out_dir)?;
    let mut csv_writer = CsvWriter::new(out_dir)?;
    export_world(&mut csv_writer, sim.world())?;
    println!("CSV written to {}", out_dir.display());

    #[cfg(feature = "parquet")]
    {
        let mut parquet_writer = mship_output::ParquetWriter::new(out_dir)?;
        export_world(&mut parquet_writer, sim.world())?;
        println!("Parquet written to {}", out_dir.display());
    }

    Ok(())
}
