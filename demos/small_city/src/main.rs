//! small_city: smallest end-to-end run of the rust_epi simulator.
//!
//! Scatters a few dozen homes, offices, schools, shops and parks over a
//! 5 km square, fills them with children, adults and seniors, and lets a
//! flu-like virus loose from three index cases for 60 days.
//!
//! ```text
//! cargo run -p small_city                      # built-in configuration
//! cargo run -p small_city -- demos/small_city/config.json
//! EPI_LOG=debug cargo run -p small_city        # per-step engine counts
//! ```

mod logging;

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use epi_behavior::BehaviorMap;
use epi_core::{Demographic, LandUse, PathogenId, PlaceCategory, Rate, SimConfig, Tick, Time, TimeDistribution};
use epi_output::{CsvWriter, OutputWriter, SimOutputObserver};
use epi_pathogen::{Compartment, Pathogen, PathogenKind, Symptom};
use epi_schedule::{Phase, load_schedule_reader};
use epi_sim::{CityModelBuilder, ModelView, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                  u64 = 42;
const SIM_DAYS:              u64 = 60;
const OUTPUT_INTERVAL_STEPS: u64 = 24; // one host snapshot per simulated day
const HOSPITAL_BEDS:         u32 = 6;
const PATIENT_ZERO:          usize = 3;

/// Side of the square the city occupies, in metres.
const EXTENT: f64 = 5_000.0;

/// (land use, count, size range)
const PLACES: [(LandUse, usize, (f64, f64)); 7] = [
    (LandUse::Dwelling,   60, (2.0, 6.0)),
    (LandUse::Office,      6, (20.0, 80.0)),
    (LandUse::School,      2, (100.0, 200.0)),
    (LandUse::Retail,      8, (10.0, 40.0)),
    (LandUse::Restaurant,  5, (10.0, 30.0)),
    (LandUse::Park,        4, (200.0, 500.0)),
    (LandUse::Hospital,    1, (50.0, 50.0)),
];

// ── Schedule CSV ──────────────────────────────────────────────────────────────

// One 24-hour day.  Every host follows the same phases; where a phase sends
// each host is the behavior map's business.
const SCHEDULE_CSV: &str = "\
phase,duration,unit\n\
sleep,7,hour\n\
home,1,hour\n\
work,9,hour\n\
errands,2,hour\n\
leisure,3,hour\n\
home,2,hour\n\
";

// ── Model presets ─────────────────────────────────────────────────────────────

fn behavior() -> Result<BehaviorMap> {
    use Demographic::*;
    use LandUse::*;
    use PlaceCategory::Tertiary;

    let mut map = BehaviorMap::new();
    for demographic in Demographic::ALL {
        map.set_map(demographic, Tertiary, Retail, 2_000.0)?
            .set_map(demographic, Tertiary, Park, 3_000.0)?;
    }
    map.set_map(Adult, Tertiary, Restaurant, 2_500.0)?
        .set_map(Senior, Tertiary, Restaurant, 1_000.0)?;

    map.set_anomaly_rate(Phase::Work, Rate::new(0.05)?)
        .set_recovery_rate(Phase::Work, Rate::new(0.9)?)
        .set_anomaly_rate(Phase::Home, Rate::new(0.1)?)
        .set_recovery_rate(Phase::Home, Rate::new(0.8)?);
    Ok(map)
}

fn flu() -> Result<Pathogen> {
    let pathogen = Pathogen::builder("flu", PathogenKind::Virus)
        .attack_rate(0.02)
        .agent_life(Time::hours(6.0))
        .incubation(TimeDistribution::new(Time::days(2.0), Time::hours(12.0))?)
        .infectious(TimeDistribution::new(Time::days(5.0), Time::days(1.0))?)
        .mortality_treated(0.002)
        .mortality_untreated(0.01)
        .mortality_untreated_for(Demographic::Senior, 0.08)
        .hospitalization(0.02)
        .hospitalization_for(Demographic::Senior, 0.25)
        .symptom(Symptom::Fever, 0.7)
        .symptom(Symptom::Cough, 0.6)
        .symptom_by_demographic(Symptom::Fatigue, [0.3, 0.5, 0.8])
        .build()?;
    Ok(pathogen)
}

fn default_config() -> SimConfig {
    SimConfig {
        time_step:             Time::hours(1.0),
        total_steps:           SIM_DAYS * 24,
        seed:                  SEED,
        num_threads:           None,
        output_interval_steps: OUTPUT_INTERVAL_STEPS,
        hospital_beds:         Some(HOSPITAL_BEDS),
    }
}

/// `SimConfig` from the JSON file named on the command line, if any.
fn load_config() -> Result<SimConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(default_config());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    Ok(config)
}

// ── Observer wrapper to count rows and track the peak ─────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:          SimOutputObserver<W>,
    pathogen:       PathogenId,
    summary_rows:   usize,
    snapshot_rows:  usize,
    peak:           (Tick, u32),
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>, pathogen: PathogenId) -> Self {
        Self { inner, pathogen, summary_rows: 0, snapshot_rows: 0, peak: (Tick::ZERO, 0) }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_step_end(&mut self, tick: Tick, view: &ModelView<'_>) {
        self.summary_rows += view.pathogens.len();
        let infectious = view.compartment_counts(self.pathogen).infectious;
        if infectious > self.peak.1 {
            self.peak = (tick, infectious);
        }
        self.inner.on_step_end(tick, view);
    }

    fn on_snapshot(&mut self, tick: Tick, view: &ModelView<'_>) {
        self.snapshot_rows += view.population.hosts.len() * view.pathogens.len();
        if tick.0.is_multiple_of(24 * 7) {
            let c = view.compartment_counts(self.pathogen);
            log::info!(
                "day {:>3}: S {} E {} I {} R {} D {}",
                tick.0 / 24,
                c.susceptible,
                c.incubating,
                c.infectious,
                c.recovered,
                c.dead()
            );
        }
        self.inner.on_snapshot(tick, view);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    logging::init()?;

    let config = load_config()?;
    println!("=== small_city | rust_epi ===");
    println!(
        "Steps: {} × {}  |  Seed: {}  |  Beds: {:?}",
        config.total_steps, config.time_step, config.seed, config.hospital_beds
    );
    println!();

    // 1. Schedule and behavior.
    let schedule = load_schedule_reader(Cursor::new(SCHEDULE_CSV))?;
    println!("Schedule: {} phases, period {}", schedule.len(), schedule.period());

    // 2. Model with one pathogen and an empty city.
    let mut model = CityModelBuilder::new(config, schedule, behavior()?)
        .pathogen(flu()?)
        .build()?;
    let flu_id = model.pathogen_id("flu").context("flu registered")?;

    // 3. Places.
    for (land_use, count, (min, max)) in PLACES {
        model.random_places(land_use, count, EXTENT, min..=max)?;
    }

    // 4. Hosts: children attend school, adults work, seniors stay local.
    model.populate(Demographic::Child, 50, LandUse::Dwelling, Some(LandUse::School))?;
    model.populate(Demographic::Adult, 120, LandUse::Dwelling, Some(LandUse::Office))?;
    model.populate(Demographic::Senior, 40, LandUse::Dwelling, None)?;
    println!("City: {} places, {} hosts", model.places().len(), model.hosts().len());

    // 5. Index cases.
    let seeded = model.patient_zero(flu_id, PATIENT_ZERO)?;
    println!("Patient zero: {seeded:?}");
    println!();

    // 6. Output.
    std::fs::create_dir_all("output/small_city")?;
    let writer = CsvWriter::new(Path::new("output/small_city"))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer), flu_id);

    // 7. Run.
    let t0 = Instant::now();
    model.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 8. Summary.
    println!("Simulation complete in {:.3} s ({})", elapsed.as_secs_f64(), model.clock());
    println!("  compartment_summaries.csv : {} rows", obs.summary_rows);
    println!("  host_snapshots.csv        : {} rows", obs.snapshot_rows);
    println!(
        "  peak infectious           : {} at {} (day {})",
        obs.peak.1,
        obs.peak.0,
        obs.peak.0.0 / 24
    );
    let hospital = model.hospital();
    match (hospital.capacity(), hospital.available()) {
        (Some(cap), Some(free)) => {
            println!("  hospital beds             : {} of {cap} in use, {free} free", hospital.occupied())
        }
        _ => println!("  hospital beds             : {} in use (unlimited)", hospital.occupied()),
    }
    println!();

    // 9. Final compartments by demographic.
    println!("{:<16} {:>8} {:>8} {:>8}", "Compartment", "child", "adult", "senior");
    println!("{}", "-".repeat(44));
    for compartment in Compartment::ALL {
        let mut row = [0u32; 3];
        for host in model.hosts() {
            if host.compartment(flu_id) == compartment {
                row[host.demographic.index()] += 1;
            }
        }
        println!("{:<16} {:>8} {:>8} {:>8}", compartment.as_str(), row[0], row[1], row[2]);
    }

    Ok(())
}
