//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use epi_core::Tick;
use epi_sim::{ModelView, SimObserver};

use crate::row::{CompartmentSummaryRow, HostSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes compartment summaries (every step) and
/// host snapshots (every snapshot interval) to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `model.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `model.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer.  `run` does this on its own; call it after
    /// `run_steps`.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            log::error!("output write failed: {e}");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_step_end(&mut self, _tick: Tick, view: &ModelView<'_>) {
        let rows: Vec<CompartmentSummaryRow> = view
            .pathogens()
            .map(|(id, _)| CompartmentSummaryRow::new(view, id, view.compartment_counts(id)))
            .collect();
        if !rows.is_empty() {
            let result = self.writer.write_summaries(&rows);
            self.store_err(result);
        }
    }

    fn on_snapshot(&mut self, tick: Tick, view: &ModelView<'_>) {
        let rows: Vec<HostSnapshotRow> = view
            .population
            .hosts
            .iter()
            .flat_map(|host| view.pathogens().map(move |(id, _)| HostSnapshotRow::new(tick, host, id)))
            .collect();
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        self.finish();
    }
}
