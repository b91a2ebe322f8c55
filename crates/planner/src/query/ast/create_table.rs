//! Defines the AST for a CREATE TABLE statement.

use crate::query::ast::common::TableRef;
use model::{core::data_type::DataType, records::schema::ColumnSchema};

/// Represents a complete CREATE TABLE statement.
#[derive(Debug, Clone, Default)]
pub struct CreateTable {
    pub table: TableRef,
    pub columns: Vec<ColumnDef>,
    pub if_not_exists: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
    pub is_nullable: bool,
}

impl From<&ColumnSchema> for ColumnDef {
    fn from(column: &ColumnSchema) -> Self {
        ColumnDef {
            name: column.name.clone(),
            data_type: column.data_type.finalize(),
            is_nullable: column.is_nullable,
        }
    }
}
