//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `host_snapshots` and `compartment_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{CompartmentSummaryRow, HostSnapshotRow, OutputResult};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS host_snapshots (
                 tick           INTEGER NOT NULL,
                 host_id        INTEGER NOT NULL,
                 place_id       INTEGER NOT NULL,
                 pathogen_id    INTEGER NOT NULL,
                 compartment    TEXT    NOT NULL,
                 treated        INTEGER NOT NULL,
                 carried_agents INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS compartment_summaries (
                 tick              INTEGER NOT NULL,
                 time_hours        REAL    NOT NULL,
                 phase             TEXT    NOT NULL,
                 pathogen_id       INTEGER NOT NULL,
                 susceptible       INTEGER NOT NULL,
                 incubating        INTEGER NOT NULL,
                 infectious        INTEGER NOT NULL,
                 recovered         INTEGER NOT NULL,
                 dead_treated      INTEGER NOT NULL,
                 dead_untreated    INTEGER NOT NULL,
                 hospital_occupied INTEGER NOT NULL,
                 PRIMARY KEY (tick, pathogen_id)
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[HostSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO host_snapshots \
                 (tick, host_id, place_id, pathogen_id, compartment, treated, carried_agents) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.host_id,
                    row.place_id,
                    row.pathogen_id,
                    row.compartment,
                    row.treated as i64,
                    row.carried_agents,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_summaries(&mut self, rows: &[CompartmentSummaryRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO compartment_summaries \
                 (tick, time_hours, phase, pathogen_id, susceptible, incubating, infectious, \
                  recovered, dead_treated, dead_untreated, hospital_occupied) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.time_hours,
                    row.phase,
                    row.pathogen_id,
                    row.susceptible,
                    row.incubating,
                    row.infectious,
                    row.recovered,
                    row.dead_treated,
                    row.dead_untreated,
                    row.hospital_occupied,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
