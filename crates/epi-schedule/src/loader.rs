//! CSV schedule loader.
//!
//! # CSV format
//!
//! One row per phase, in cycle order.  The first row starts at time zero.
//!
//! ```csv
//! phase,duration,unit
//! sleep,7,hour
//! home,1,hour
//! work,9,hour
//! leisure,3,hour
//! home,2,hour
//! sleep,2,hour
//! ```
//!
//! `unit` accepts any label `TimeUnit` parses (`h`, `hours`, `min`, ...).

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use epi_core::{Time, TimeUnit};

use crate::{Phase, Schedule, ScheduleError, ScheduleResult};

#[derive(Deserialize)]
struct PhaseRecord {
    phase:    String,
    duration: f64,
    unit:     String,
}

/// Load a [`Schedule`] from a CSV file.
pub fn load_schedule_csv(path: &Path) -> ScheduleResult<Schedule> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_schedule_reader(file)
}

/// Like [`load_schedule_csv`] but accepts any `Read` source.
pub fn load_schedule_reader<R: Read>(reader: R) -> ScheduleResult<Schedule> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut schedule = Schedule::default();

    for (line, result) in csv_reader.deserialize::<PhaseRecord>().enumerate() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let phase: Phase = row.phase.parse()?;
        let unit: TimeUnit = row.unit.parse()?;
        schedule
            .add_phase(phase, Time::new(row.duration, unit))
            .map_err(|e| ScheduleError::Parse(format!("row {}: {e}", line + 1)))?;
    }

    if schedule.is_empty() {
        return Err(ScheduleError::EmptySchedule);
    }
    log::debug!(
        "loaded schedule: {} phases, period {}",
        schedule.len(),
        schedule.period()
    );
    Ok(schedule)
}
