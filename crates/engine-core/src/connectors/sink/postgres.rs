use crate::{connectors::sink::Sink, error::SinkError};
use async_trait::async_trait;
use connectors::sql::{base::adapter::SqlAdapter, postgres::adapter::PgAdapter};
use model::records::{batch::Batch, schema::TableSchema};
use tracing::{debug, info};

pub struct PostgresSink {
    adapter: PgAdapter,
}

impl PostgresSink {
    pub fn new(adapter: PgAdapter) -> Self {
        Self { adapter }
    }

    pub async fn connect(url: &str) -> Result<Self, SinkError> {
        let adapter = PgAdapter::connect(url).await?;
        Ok(Self::new(adapter))
    }
}

#[async_trait]
impl Sink for PostgresSink {
    async fn replace_table(&self, table: &str, schema: &TableSchema) -> Result<(), SinkError> {
        if self.adapter.table_exists(table).await? {
            info!(table, "Replacing existing table");
        }
        self.adapter.replace_table(table, schema).await?;
        Ok(())
    }

    async fn write_batch(&self, table: &str, batch: &Batch) -> Result<u64, SinkError> {
        if batch.is_empty() {
            return Ok(0);
        }

        let Batch { schema, rows, .. } = batch;
        let written = self.adapter.copy_rows(table, schema, rows).await?;
        debug!(
            table,
            chunk = batch.index,
            rows = written,
            "Chunk committed"
        );
        Ok(written)
    }
}
