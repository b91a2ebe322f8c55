use crate::error::{ChunkLoadError, IngestError};
use engine_core::{
    connectors::{sink::Sink, source::CsvBatchSource},
    metrics::Metrics,
};
use model::records::batch::Batch;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoaderState {
    Running,
    Done,
}

/// Appends batches to the destination table one chunk at a time.
///
/// Each append commits on its own, so when a chunk fails the table keeps
/// exactly the chunks before it.
pub struct ChunkLoader<'a, S: Sink> {
    sink: &'a S,
    table: &'a str,
    metrics: Metrics,
    state: LoaderState,
    chunks_loaded: usize,
    rows_loaded: u64,
}

impl<'a, S: Sink> ChunkLoader<'a, S> {
    pub fn new(sink: &'a S, table: &'a str, metrics: Metrics) -> Self {
        ChunkLoader {
            sink,
            table,
            metrics,
            state: LoaderState::Running,
            chunks_loaded: 0,
            rows_loaded: 0,
        }
    }

    pub fn chunks_loaded(&self) -> usize {
        self.chunks_loaded
    }

    pub fn rows_loaded(&self) -> u64 {
        self.rows_loaded
    }

    /// Recreates the table from the first batch's schema, then appends it.
    pub async fn load_first(&mut self, batch: Batch) -> Result<(), IngestError> {
        let started = Instant::now();

        if let Err(err) = self.sink.replace_table(self.table, &batch.schema).await {
            return Err(self.fail(batch.index, err));
        }
        info!(
            table = self.table,
            columns = batch.schema.len(),
            "Destination table created"
        );

        self.append(batch, started).await
    }

    /// Pulls, converts and appends the remaining chunks until the source is
    /// exhausted or a chunk fails.
    pub async fn run(&mut self, source: &mut CsvBatchSource) -> Result<(), IngestError> {
        while self.state == LoaderState::Running {
            let started = Instant::now();

            let chunk = match source.next_chunk() {
                Some(Ok(chunk)) => chunk,
                Some(Err(err)) => return Err(self.fail(self.chunks_loaded + 1, err)),
                None => {
                    info!(
                        chunks = self.chunks_loaded,
                        rows = self.rows_loaded,
                        "All chunks have been processed"
                    );
                    self.state = LoaderState::Done;
                    break;
                }
            };

            let index = chunk.index;
            let batch = match source.to_batch(chunk) {
                Ok(batch) => batch,
                Err(err) => return Err(self.fail(index, err)),
            };

            self.append(batch, started).await?;
        }

        Ok(())
    }

    async fn append(&mut self, batch: Batch, started: Instant) -> Result<(), IngestError> {
        let rows = match self.sink.write_batch(self.table, &batch).await {
            Ok(rows) => rows,
            Err(err) => return Err(self.fail(batch.index, err)),
        };

        self.chunks_loaded += 1;
        self.rows_loaded += rows;
        self.metrics.increment_batches(1);
        self.metrics.increment_records(rows);

        info!(
            chunk = batch.index,
            rows,
            "Inserted chunk {} ({} rows), took {:.3} seconds",
            batch.index,
            rows,
            started.elapsed().as_secs_f64()
        );
        Ok(())
    }

    fn fail(&mut self, chunk: usize, source: impl Into<ChunkLoadError>) -> IngestError {
        self.state = LoaderState::Done;
        self.metrics.increment_failures(1);

        let err = IngestError::chunk_load(chunk, self.rows_loaded, source);
        warn!(
            chunk,
            committed_rows = self.rows_loaded,
            "Stopping ingestion at failed chunk"
        );
        err
    }
}
