use crate::file::csv::types::CsvType;
use csv::StringRecord;
use model::{
    core::data_type::DataType,
    records::schema::{ColumnSchema, TableSchema},
};
use std::collections::HashSet;

/// Turns the raw header row into usable, unique column names.
///
/// Blank names become `unnamed_<i>`, repeated names get a `_<n>` suffix.
/// Without a header row the names are `column_1..column_n`.
pub fn normalize_headers(raw: &StringRecord, has_headers: bool) -> Vec<String> {
    let mut seen = HashSet::new();

    raw.iter()
        .enumerate()
        .map(|(i, name)| {
            let base = if !has_headers {
                format!("column_{}", i + 1)
            } else if name.trim().is_empty() {
                format!("unnamed_{i}")
            } else {
                name.trim().to_string()
            };

            let mut candidate = base.clone();
            let mut suffix = 1;
            while !seen.insert(candidate.clone()) {
                candidate = format!("{base}_{suffix}");
                suffix += 1;
            }
            candidate
        })
        .collect()
}

/// Infers a column type for every header from the given records.
///
/// Columns are always nullable: a later chunk may carry empty cells even
/// when the sampled records do not.
pub fn infer_schema(headers: &[String], records: &[StringRecord]) -> TableSchema {
    let mut types = vec![DataType::Null; headers.len()];

    for record in records {
        for (data_type, field) in types.iter_mut().zip(record.iter()) {
            *data_type = data_type.promote(field);
        }
    }

    let columns = headers
        .iter()
        .zip(types)
        .enumerate()
        .map(|(ordinal, (name, data_type))| ColumnSchema {
            name: name.clone(),
            data_type,
            is_nullable: true,
            ordinal,
        })
        .collect();

    TableSchema::new(columns)
}
