use crate::sql::{
    base::{
        adapter::SqlAdapter,
        encoder::CopyValueEncoder,
        error::{ConnectorError, DbError},
        query::generator::QueryGenerator,
    },
    postgres::{encoder::PgCopyValueEncoder, utils::connect_client},
};
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{SinkExt, pin_mut};
use model::records::{row::RowData, schema::TableSchema};
use planner::query::dialect;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockWriteGuard};
use tokio_postgres::Client;
use tracing::debug;

/// Flush threshold for the COPY stream.
const COPY_BUFFER_BYTES: usize = 1 << 20;

#[derive(Clone)]
pub struct PgAdapter {
    client: Arc<RwLock<Client>>,
    dialect: dialect::Postgres,
}

const QUERY_TABLE_EXISTS_SQL: &str = include_str!("sql/table_exists.sql");
const QUERY_TABLE_COLUMNS_SQL: &str = include_str!("sql/table_columns.sql");

impl PgAdapter {
    async fn lock_client(&self) -> RwLockWriteGuard<'_, Client> {
        self.client.write().await
    }
}

#[async_trait]
impl SqlAdapter for PgAdapter {
    async fn connect(url: &str) -> Result<Self, ConnectorError> {
        let client = Arc::new(RwLock::new(connect_client(url).await?));
        Ok(PgAdapter {
            client,
            dialect: dialect::Postgres,
        })
    }

    async fn table_exists(&self, table: &str) -> Result<bool, DbError> {
        let client = self.client.read().await;
        let row = client.query_one(QUERY_TABLE_EXISTS_SQL, &[&table]).await?;
        Ok(row.get(0))
    }

    async fn table_columns(&self, table: &str) -> Result<Vec<(String, String)>, DbError> {
        let client = self.client.read().await;
        let rows = client.query(QUERY_TABLE_COLUMNS_SQL, &[&table]).await?;
        rows.iter()
            .map(|row| -> Result<(String, String), DbError> {
                Ok((row.try_get(0)?, row.try_get(1)?))
            })
            .collect()
    }

    async fn replace_table(&self, table: &str, schema: &TableSchema) -> Result<(), DbError> {
        if schema.is_empty() {
            return Err(DbError::QueryBuildError(format!(
                "cannot create table '{table}' without columns"
            )));
        }

        let generator = QueryGenerator::new(&self.dialect);
        let drop = generator.drop_table(table);
        let create = generator.create_table(table, schema);
        debug!("Replacing table: {drop} {create}");

        let mut client = self.lock_client().await;
        let tx = client.transaction().await?;
        tx.batch_execute(&drop).await?;
        tx.batch_execute(&create).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn copy_rows(
        &self,
        table: &str,
        schema: &TableSchema,
        rows: &[RowData],
    ) -> Result<u64, DbError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let generator = QueryGenerator::new(&self.dialect);
        let statement = generator.copy_from_stdin(table, schema);
        let encoder = PgCopyValueEncoder::new();
        let width = schema.len();

        debug!("COPY statement: {}", statement);

        let mut client = self.lock_client().await;
        let tx = client.transaction().await?;
        let sink = tx.copy_in(&statement).await?;
        pin_mut!(sink);

        let mut buffer = String::with_capacity(COPY_BUFFER_BYTES);
        for row in rows {
            buffer.push_str(&encoder.encode_row(&row.values, width));
            if buffer.len() >= COPY_BUFFER_BYTES {
                sink.as_mut()
                    .send(Bytes::from(std::mem::take(&mut buffer)))
                    .await?;
            }
        }
        if !buffer.is_empty() {
            sink.as_mut().send(Bytes::from(buffer)).await?;
        }

        let written = sink.as_mut().finish().await?;
        if written != rows.len() as u64 {
            return Err(DbError::Write(format!(
                "COPY into '{table}' wrote {written} rows, expected {}",
                rows.len()
            )));
        }

        tx.commit().await?;
        Ok(written)
    }
}
