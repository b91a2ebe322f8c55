use crate::error::SinkError;
use async_trait::async_trait;
use model::records::{batch::Batch, schema::TableSchema};

pub mod postgres;

/// Destination of an ingestion run.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Drops `table` if present and creates it empty with `schema`.
    async fn replace_table(&self, table: &str, schema: &TableSchema) -> Result<(), SinkError>;

    /// Appends every row of `batch` as one unit of work and returns the row count.
    async fn write_batch(&self, table: &str, batch: &Batch) -> Result<u64, SinkError>;
}
