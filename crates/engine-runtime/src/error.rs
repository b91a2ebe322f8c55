use connectors::{file::csv::error::FileError, http::error::FetchError};
use engine_core::error::{SinkError, TransformError};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level errors of an ingestion run, one variant per phase.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The source could not be retrieved; nothing was written to the destination.
    #[error("Error downloading the file: {0}")]
    Download(#[from] DownloadError),

    /// The local file could not be opened or its first chunk could not be read;
    /// the destination is untouched.
    #[error("Error reading the CSV file: {0}")]
    Parse(#[from] ParseError),

    /// A chunk failed to load. Chunks before it stay committed.
    #[error("Error processing chunk {chunk} ({committed_rows} rows already committed): {source}")]
    ChunkLoad {
        chunk: usize,
        committed_rows: u64,
        #[source]
        source: ChunkLoadError,
    },
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("File {} not found", .0.display())]
    Missing(PathBuf),

    #[error("Cannot prepare directory {}: {source}", .path.display())]
    WorkDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{0}")]
    Read(#[from] FileError),

    #[error("{0}")]
    Transform(#[from] TransformError),
}

#[derive(Debug, Error)]
pub enum ChunkLoadError {
    #[error("{0}")]
    Read(#[from] FileError),

    #[error("{0}")]
    Transform(#[from] TransformError),

    #[error("{0}")]
    Sink(#[from] SinkError),
}

impl IngestError {
    pub fn chunk_load(
        chunk: usize,
        committed_rows: u64,
        source: impl Into<ChunkLoadError>,
    ) -> Self {
        IngestError::ChunkLoad {
            chunk,
            committed_rows,
            source: source.into(),
        }
    }

    /// Short name of the phase that failed.
    pub fn phase(&self) -> &'static str {
        match self {
            IngestError::Download(_) => "download",
            IngestError::Parse(_) => "parse",
            IngestError::ChunkLoad { .. } => "chunk_load",
        }
    }
}
