use crate::error::TransformError;
use connectors::file::csv::{metadata::infer_schema, reader::RawChunk};
use model::{
    core::{data_type::DataType, value::Value},
    records::{
        batch::Batch,
        row::RowData,
        schema::{ColumnSchema, TableSchema},
    },
};
use std::sync::Arc;

/// Builds the destination schema from the first chunk.
///
/// Types are inferred from the chunk, then every configured datetime column
/// is forced to `Timestamp`. An optional index column is placed first.
pub fn schema_for_chunk(
    headers: &[String],
    chunk: &RawChunk,
    datetime_columns: &[String],
    index_column: Option<&str>,
) -> Result<TableSchema, TransformError> {
    let mut inferred = infer_schema(headers, &chunk.records);

    for name in datetime_columns {
        let column = inferred
            .columns
            .iter_mut()
            .find(|c| &c.name == name)
            .ok_or_else(|| TransformError::MissingColumn(name.clone()))?;
        column.data_type = DataType::Timestamp;
    }

    let mut columns = Vec::with_capacity(inferred.len() + 1);
    if let Some(index) = index_column {
        if inferred.column(index).is_some() {
            return Err(TransformError::IndexCollision(index.to_string()));
        }
        columns.push(ColumnSchema {
            name: index.to_string(),
            data_type: DataType::Long,
            is_nullable: false,
            ordinal: 0,
        });
    }

    let offset = columns.len();
    columns.extend(inferred.columns.into_iter().map(|c| ColumnSchema {
        data_type: c.data_type.finalize(),
        ordinal: c.ordinal + offset,
        ..c
    }));

    Ok(TableSchema::new(columns))
}

/// Parses every cell of `chunk` against `schema`.
///
/// With `with_index`, the first schema column receives the source row number
/// and the remaining columns map onto the record fields in order.
pub fn coerce_chunk(
    chunk: RawChunk,
    schema: &Arc<TableSchema>,
    with_index: bool,
) -> Result<Batch, TransformError> {
    let offset = usize::from(with_index);
    let data_columns = &schema.columns[offset..];
    let mut rows = Vec::with_capacity(chunk.len());

    for (i, record) in chunk.records.iter().enumerate() {
        let row_number = chunk.start_row + i as u64;
        if record.len() != data_columns.len() {
            return Err(TransformError::FieldCount {
                row: row_number,
                expected: data_columns.len(),
                found: record.len(),
            });
        }

        let mut values = Vec::with_capacity(schema.len());
        if with_index {
            values.push(Value::Int(row_number as i64));
        }
        for (column, field) in data_columns.iter().zip(record.iter()) {
            let value = Value::parse(field, column.data_type)
                .map_err(|source| TransformError::InvalidValue {
                    row: row_number,
                    column: column.name.clone(),
                    source,
                })?;
            values.push(value);
        }
        rows.push(RowData::new(values));
    }

    Ok(Batch {
        index: chunk.index,
        start_row: chunk.start_row,
        schema: Arc::clone(schema),
        rows,
    })
}
