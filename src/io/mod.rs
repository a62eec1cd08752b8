use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Result, SplitError};

/// A parquet file loaded fully into memory.
///
/// The schema is kept separately from the batches so an empty file still
/// carries its column layout through a split.
#[derive(Debug)]
pub struct Dataset {
    schema: Arc<Schema>,
    batches: Vec<RecordBatch>,
}

impl Dataset {
    pub fn new(schema: Arc<Schema>, batches: Vec<RecordBatch>) -> Self {
        Self { schema, batches }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(|b| b.num_rows()).sum()
    }
}

/// Read a parquet file fully into memory.
///
/// A missing path surfaces as `NotFound`, anything unreadable as parquet as
/// `Format`. Memory use is proportional to the whole file.
pub fn read_parquet(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SplitError::NotFound {
            path: path.display().to_string(),
        },
        _ => SplitError::Io(e),
    })?;

    let format_err = |source: parquet::errors::ParquetError| SplitError::Format {
        path: path.display().to_string(),
        source,
    };

    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(format_err)?;
    let schema = builder.schema().clone();
    let reader = builder.build().map_err(format_err)?;

    let mut batches = Vec::new();
    for batch in reader {
        batches.push(batch.map_err(|e| format_err(e.into()))?);
    }

    Ok(Dataset::new(schema, batches))
}

/// Write record batches as a single parquet file.
///
/// An empty batch list still produces a valid zero-row file carrying the
/// schema. Parent directories are created as needed.
pub fn write_parquet(schema: &Arc<Schema>, batches: &[RecordBatch], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props)).map_err(write_err)?;

    for batch in batches {
        writer.write(batch).map_err(write_err)?;
    }

    writer.close().map_err(write_err)?;
    Ok(())
}

// Write-side parquet errors are the Io kind of the taxonomy.
fn write_err(e: parquet::errors::ParquetError) -> SplitError {
    SplitError::Io(std::io::Error::other(e))
}
