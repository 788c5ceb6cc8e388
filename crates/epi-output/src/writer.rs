//! The `OutputWriter` trait implemented by all backend writers.

use crate::{CompartmentSummaryRow, HostSnapshotRow, OutputResult};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// Errors are returned here and stored by
/// [`SimOutputObserver`][crate::SimOutputObserver] for retrieval with
/// `take_error`, since observer callbacks have no return value.
pub trait OutputWriter {
    /// Write a batch of host snapshots.
    fn write_snapshots(&mut self, rows: &[HostSnapshotRow]) -> OutputResult<()>;

    /// Write one step's summaries (one row per pathogen).
    fn write_summaries(&mut self, rows: &[CompartmentSummaryRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
