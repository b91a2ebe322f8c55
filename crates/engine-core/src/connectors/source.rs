use crate::{
    error::TransformError,
    transform::coerce::{coerce_chunk, schema_for_chunk},
};
use connectors::file::{
    compression::Compression,
    csv::{
        error::FileError,
        reader::{CsvChunkReader, RawChunk},
        settings::CsvSettings,
    },
};
use model::{
    execution::pipeline::PipelineSettings,
    records::{batch::Batch, schema::TableSchema},
};
use std::{path::Path, sync::Arc};
use tracing::info;

/// Typed view over a chunked CSV file.
///
/// The schema is fixed by the first chunk passed to [`CsvBatchSource::to_batch`];
/// every later chunk is parsed against it.
pub struct CsvBatchSource {
    reader: CsvChunkReader,
    datetime_columns: Vec<String>,
    index_column: Option<String>,
    schema: Option<Arc<TableSchema>>,
}

impl CsvBatchSource {
    pub fn open(path: &Path, settings: &PipelineSettings) -> Result<Self, FileError> {
        let csv_settings =
            CsvSettings::new(settings.chunk_size).with_compression(Compression::Infer);
        let reader = CsvChunkReader::open(path, &csv_settings)?;
        Ok(Self::new(reader, settings))
    }

    pub fn new(reader: CsvChunkReader, settings: &PipelineSettings) -> Self {
        CsvBatchSource {
            reader,
            datetime_columns: settings.datetime_columns.clone(),
            index_column: settings.index_column.clone(),
            schema: None,
        }
    }

    pub fn schema(&self) -> Option<&Arc<TableSchema>> {
        self.schema.as_ref()
    }

    pub fn compression(&self) -> Compression {
        self.reader.compression()
    }

    /// Pulls the next raw chunk; `None` once the file is exhausted.
    pub fn next_chunk(&mut self) -> Option<Result<RawChunk, FileError>> {
        self.reader.next()
    }

    pub fn to_batch(&mut self, chunk: RawChunk) -> Result<Batch, TransformError> {
        let schema = match &self.schema {
            Some(schema) => Arc::clone(schema),
            None => {
                let schema = Arc::new(schema_for_chunk(
                    self.reader.headers(),
                    &chunk,
                    &self.datetime_columns,
                    self.index_column.as_deref(),
                )?);
                info!(
                    columns = schema.len(),
                    "Inferred destination schema from first chunk"
                );
                self.schema = Some(Arc::clone(&schema));
                schema
            }
        };

        coerce_chunk(chunk, &schema, self.index_column.is_some())
    }
}
