use std::path::Path;

use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tracing::debug;

use crate::error::LeadTimeError;

/// Read a Parquet file into a single batch, concatenating all row groups.
pub fn read_parquet(path: &Path) -> Result<RecordBatch, LeadTimeError> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    let batch = concat_batches(&schema, &batches)?;
    debug!(path = %path.display(), rows = batch.num_rows(), "read parquet table");
    Ok(batch)
}

pub fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<(), LeadTimeError> {
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    debug!(path = %path.display(), rows = batch.num_rows(), "wrote parquet table");
    Ok(())
}
