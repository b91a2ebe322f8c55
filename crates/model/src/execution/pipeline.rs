use crate::execution::connection::Connection;
use std::path::PathBuf;

pub const DEFAULT_CHUNK_SIZE: usize = 100_000;
pub const DEFAULT_DATETIME_COLUMNS: [&str; 2] = ["tpep_pickup_datetime", "tpep_dropoff_datetime"];

/// A single ingestion run: where the rows come from, where they go and how
/// they are cut into chunks.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub source: DataSource,
    pub destination: DataDestination,
    pub settings: PipelineSettings,
}

#[derive(Debug, Clone)]
pub struct DataSource {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct DataDestination {
    pub connection: Connection,
    pub table: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub chunk_size: usize,
    /// Columns parsed from text into timestamps before loading.
    pub datetime_columns: Vec<String>,
    /// When set, a BIGINT column of this name carries the source row number.
    pub index_column: Option<String>,
    /// Directory the downloaded file is written to.
    pub work_dir: PathBuf,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        PipelineSettings {
            chunk_size: DEFAULT_CHUNK_SIZE,
            datetime_columns: DEFAULT_DATETIME_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .collect(),
            index_column: None,
            work_dir: PathBuf::from("."),
        }
    }
}
