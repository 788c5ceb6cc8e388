//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `host_snapshots.csv`
//! - `compartment_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CompartmentSummaryRow, HostSnapshotRow, OutputResult};

pub const SNAPSHOT_HEADER: [&str; 7] =
    ["tick", "host_id", "place_id", "pathogen_id", "compartment", "treated", "carried_agents"];

pub const SUMMARY_HEADER: [&str; 11] = [
    "tick",
    "time_hours",
    "phase",
    "pathogen_id",
    "susceptible",
    "incubating",
    "infectious",
    "recovered",
    "dead_treated",
    "dead_untreated",
    "hospital_occupied",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("host_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("compartment_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[HostSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.host_id.to_string(),
                row.place_id.to_string(),
                row.pathogen_id.to_string(),
                row.compartment.to_string(),
                (row.treated as u8).to_string(),
                row.carried_agents.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summaries(&mut self, rows: &[CompartmentSummaryRow]) -> OutputResult<()> {
        for row in rows {
            self.summaries.write_record(&[
                row.tick.to_string(),
                row.time_hours.to_string(),
                row.phase.to_string(),
                row.pathogen_id.to_string(),
                row.susceptible.to_string(),
                row.incubating.to_string(),
                row.infectious.to_string(),
                row.recovered.to_string(),
                row.dead_treated.to_string(),
                row.dead_untreated.to_string(),
                row.hospital_occupied.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
