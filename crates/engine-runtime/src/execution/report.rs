use serde::Serialize;
use std::path::PathBuf;

/// Outcome of a successful ingestion run.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IngestReport {
    pub table: String,
    pub source_file: PathBuf,
    pub chunks_loaded: usize,
    pub rows_loaded: u64,
    pub elapsed_secs: f64,
}
