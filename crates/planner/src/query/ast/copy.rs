//! Defines the AST for SQL `COPY ... FROM STDIN` statements.

use crate::query::ast::common::TableRef;

#[derive(Debug, Clone)]
pub struct Copy {
    pub table: TableRef,
    pub columns: Vec<String>,
    pub options: Vec<CopyOption>,
}

#[derive(Debug, Clone)]
pub struct CopyOption {
    pub key: String,
    pub value: Option<String>,
}
