use crate::query::ast::{
    common::TableRef,
    create_table::{ColumnDef, CreateTable},
};
use model::records::schema::TableSchema;

#[derive(Debug, Clone)]
pub struct CreateTableBuilder {
    ast: CreateTable,
}

impl CreateTableBuilder {
    pub fn new(table: TableRef) -> Self {
        Self {
            ast: CreateTable {
                table,
                columns: Vec::new(),
                if_not_exists: false,
            },
        }
    }

    pub fn column(mut self, column: ColumnDef) -> Self {
        self.ast.columns.push(column);
        self
    }

    /// Adds one column per schema entry, in ordinal order.
    pub fn columns_from(mut self, schema: &TableSchema) -> Self {
        let mut columns: Vec<_> = schema.columns.iter().collect();
        columns.sort_by_key(|c| c.ordinal);
        self.ast.columns.extend(columns.into_iter().map(ColumnDef::from));
        self
    }

    pub fn if_not_exists(mut self) -> Self {
        self.ast.if_not_exists = true;
        self
    }

    pub fn build(self) -> CreateTable {
        self.ast
    }
}
