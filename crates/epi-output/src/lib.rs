//! `epi-output`: simulation output writers for the rust_epi simulator.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                                               |
//! |-----------|---------|-------------------------------------------------------------|
//! | *(none)*  | CSV     | `host_snapshots.csv`, `compartment_summaries.csv`           |
//! | `sqlite`  | SQLite  | `output.db`                                                 |
//! | `parquet` | Parquet | `host_snapshots.parquet`, `compartment_summaries.parquet`   |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `epi_sim::SimObserver`:
//! a summary row per pathogen after every step, and a snapshot row per
//! (host, pathogen) every `output_interval_steps` steps.
//!
//! # Usage
//!
//! ```rust,ignore
//! use epi_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! model.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{CompartmentSummaryRow, HostSnapshotRow, NO_PLACE};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
