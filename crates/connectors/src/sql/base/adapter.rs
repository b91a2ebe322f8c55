use crate::sql::base::error::{ConnectorError, DbError};
use async_trait::async_trait;
use model::records::{row::RowData, schema::TableSchema};

#[async_trait]
pub trait SqlAdapter {
    async fn connect(url: &str) -> Result<Self, ConnectorError>
    where
        Self: Sized;

    // Introspection
    async fn table_exists(&self, table: &str) -> Result<bool, DbError>;
    /// Column names and server-side type names, in ordinal order.
    async fn table_columns(&self, table: &str) -> Result<Vec<(String, String)>, DbError>;

    // Load
    /// Drops `table` if it exists and creates it empty with `schema`, atomically.
    async fn replace_table(&self, table: &str, schema: &TableSchema) -> Result<(), DbError>;
    /// Appends `rows` in a single transaction and returns the number written.
    async fn copy_rows(
        &self,
        table: &str,
        schema: &TableSchema,
        rows: &[RowData],
    ) -> Result<u64, DbError>;
}
