//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `host_snapshots.parquet`
//! - `compartment_summaries.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    BooleanBuilder, Float64Builder, StringBuilder, UInt16Builder, UInt32Builder, UInt64Builder,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{CompartmentSummaryRow, HostSnapshotRow, OutputResult};

fn snapshot_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",           DataType::UInt64,  false),
        Field::new("host_id",        DataType::UInt32,  false),
        Field::new("place_id",       DataType::UInt32,  false),
        Field::new("pathogen_id",    DataType::UInt16,  false),
        Field::new("compartment",    DataType::Utf8,    false),
        Field::new("treated",        DataType::Boolean, false),
        Field::new("carried_agents", DataType::UInt32,  false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",              DataType::UInt64,  false),
        Field::new("time_hours",        DataType::Float64, false),
        Field::new("phase",             DataType::Utf8,    false),
        Field::new("pathogen_id",       DataType::UInt16,  false),
        Field::new("susceptible",       DataType::UInt32,  false),
        Field::new("incubating",        DataType::UInt32,  false),
        Field::new("infectious",        DataType::UInt32,  false),
        Field::new("recovered",         DataType::UInt32,  false),
        Field::new("dead_treated",      DataType::UInt32,  false),
        Field::new("dead_untreated",    DataType::UInt32,  false),
        Field::new("hospital_occupied", DataType::UInt32,  false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes simulation output to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    snapshots:   Option<ArrowWriter<File>>,
    summaries:   Option<ArrowWriter<File>>,
    snap_schema: Arc<Schema>,
    summ_schema: Arc<Schema>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let snap_schema = snapshot_schema();
        let summ_schema = summary_schema();

        let snap_file = File::create(dir.join("host_snapshots.parquet"))?;
        let snapshots = ArrowWriter::try_new(snap_file, Arc::clone(&snap_schema), Some(snappy_props()))?;

        let summ_file = File::create(dir.join("compartment_summaries.parquet"))?;
        let summaries = ArrowWriter::try_new(summ_file, Arc::clone(&summ_schema), Some(snappy_props()))?;

        Ok(Self {
            snapshots: Some(snapshots),
            summaries: Some(summaries),
            snap_schema,
            summ_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_snapshots(&mut self, rows: &[HostSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.snapshots.as_mut() else {
            return Ok(());
        };

        let mut ticks          = UInt64Builder::new();
        let mut host_ids       = UInt32Builder::new();
        let mut place_ids      = UInt32Builder::new();
        let mut pathogen_ids   = UInt16Builder::new();
        let mut compartments   = StringBuilder::new();
        let mut treated        = BooleanBuilder::new();
        let mut carried_agents = UInt32Builder::new();

        for row in rows {
            ticks.append_value(row.tick);
            host_ids.append_value(row.host_id);
            place_ids.append_value(row.place_id);
            pathogen_ids.append_value(row.pathogen_id);
            compartments.append_value(row.compartment);
            treated.append_value(row.treated);
            carried_agents.append_value(row.carried_agents);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.snap_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(host_ids.finish()),
                Arc::new(place_ids.finish()),
                Arc::new(pathogen_ids.finish()),
                Arc::new(compartments.finish()),
                Arc::new(treated.finish()),
                Arc::new(carried_agents.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_summaries(&mut self, rows: &[CompartmentSummaryRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let mut ticks        = UInt64Builder::new();
        let mut hours        = Float64Builder::new();
        let mut phases       = StringBuilder::new();
        let mut pathogen_ids = UInt16Builder::new();
        let mut counts: [UInt32Builder; 7] = std::array::from_fn(|_| UInt32Builder::new());

        for row in rows {
            ticks.append_value(row.tick);
            hours.append_value(row.time_hours);
            phases.append_value(row.phase);
            pathogen_ids.append_value(row.pathogen_id);
            let values = [
                row.susceptible,
                row.incubating,
                row.infectious,
                row.recovered,
                row.dead_treated,
                row.dead_untreated,
                row.hospital_occupied,
            ];
            for (builder, value) in counts.iter_mut().zip(values) {
                builder.append_value(value);
            }
        }

        let mut columns: Vec<arrow::array::ArrayRef> = vec![
            Arc::new(ticks.finish()),
            Arc::new(hours.finish()),
            Arc::new(phases.finish()),
            Arc::new(pathogen_ids.finish()),
        ];
        columns.extend(counts.iter_mut().map(|b| Arc::new(b.finish()) as arrow::array::ArrayRef));

        let batch = RecordBatch::try_new(Arc::clone(&self.summ_schema), columns)?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.snapshots.take() {
            w.close()?;
        }
        if let Some(w) = self.summaries.take() {
            w.close()?;
        }
        Ok(())
    }
}
