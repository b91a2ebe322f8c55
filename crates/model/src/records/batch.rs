use crate::records::{row::RowData, schema::TableSchema};
use std::sync::Arc;

/// A typed slice of the source, ready to be appended to the destination.
#[derive(Debug, Clone)]
pub struct Batch {
    /// 1-based position of the chunk in the source.
    pub index: usize,
    /// 0-based source row number of the first row.
    pub start_row: u64,
    pub schema: Arc<TableSchema>,
    pub rows: Vec<RowData>,
}

impl Batch {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
