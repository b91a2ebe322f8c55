use engine_runtime::error::IngestError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Failed to write the report to {}: {source}", .path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    pub fn phase(&self) -> &'static str {
        match self {
            CliError::Ingest(err) => err.phase(),
            CliError::JsonSerialize(_) | CliError::ReportWrite { .. } => "report",
        }
    }
}
