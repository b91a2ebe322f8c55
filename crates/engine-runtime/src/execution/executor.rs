use crate::{
    error::{IngestError, ParseError},
    execution::{download::download, loader::ChunkLoader, report::IngestReport},
};
use connectors::{
    file::csv::reader::RawChunk,
    http::fetcher::{Fetcher, UrlFetcher},
};
use engine_core::{
    connectors::{
        sink::{Sink, postgres::PostgresSink},
        source::CsvBatchSource,
    },
    error::SinkError,
    metrics::Metrics,
};
use model::execution::{connection::Connection, pipeline::Pipeline};
use std::{future::Future, sync::Arc, time::Instant};
use tracing::info;

/// Downloads the source and loads it into PostgreSQL.
pub async fn run(pipeline: Pipeline) -> Result<IngestReport, IngestError> {
    let connection = pipeline.destination.connection.clone();
    Ingestor::new(pipeline, Arc::new(UrlFetcher::new()))
        .execute(|| connect_postgres(connection))
        .await
}

async fn connect_postgres(connection: Connection) -> Result<PostgresSink, SinkError> {
    let url = connection.url()?;
    info!(destination = %connection.redacted(), "Connecting to destination database");
    PostgresSink::connect(&url).await
}

/// One ingestion run: download, schema initialization, then the chunk loop.
pub struct Ingestor {
    pipeline: Pipeline,
    fetcher: Arc<dyn Fetcher>,
    metrics: Metrics,
}

impl Ingestor {
    pub fn new(pipeline: Pipeline, fetcher: Arc<dyn Fetcher>) -> Self {
        Ingestor {
            pipeline,
            fetcher,
            metrics: Metrics::new(),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Runs the pipeline against the sink produced by `connect`.
    ///
    /// The sink is only opened once the first chunk has been read and typed,
    /// so download and parse failures never touch the destination.
    pub async fn execute<S, F, Fut>(&self, connect: F) -> Result<IngestReport, IngestError>
    where
        S: Sink,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<S, SinkError>>,
    {
        let started = Instant::now();
        let settings = &self.pipeline.settings;
        let table = self.pipeline.destination.table.as_str();

        let path = download(
            self.fetcher.as_ref(),
            &self.pipeline.source.url,
            &settings.work_dir,
        )
        .await?;

        let mut source = CsvBatchSource::open(&path, settings).map_err(ParseError::from)?;
        info!(
            path = %path.display(),
            compression = ?source.compression(),
            chunk_size = settings.chunk_size,
            "Reading source in chunks"
        );

        // A header-only file still creates the (empty) table.
        let first = match source.next_chunk() {
            Some(chunk) => chunk.map_err(ParseError::from)?,
            None => RawChunk {
                index: 1,
                start_row: 0,
                records: Vec::new(),
            },
        };
        let first = source.to_batch(first).map_err(ParseError::from)?;

        let sink = match connect().await {
            Ok(sink) => sink,
            Err(err) => {
                self.metrics.increment_failures(1);
                return Err(IngestError::chunk_load(first.index, 0, err));
            }
        };

        let mut loader = ChunkLoader::new(&sink, table, self.metrics.clone());
        loader.load_first(first).await?;
        loader.run(&mut source).await?;

        let report = IngestReport {
            table: table.to_string(),
            source_file: path,
            chunks_loaded: loader.chunks_loaded(),
            rows_loaded: loader.rows_loaded(),
            elapsed_secs: started.elapsed().as_secs_f64(),
        };
        info!(
            table = %report.table,
            chunks = report.chunks_loaded,
            rows = report.rows_loaded,
            "Ingestion finished in {:.3} seconds",
            report.elapsed_secs
        );
        Ok(report)
    }
}
