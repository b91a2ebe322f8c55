use crate::query::ast::common::TableRef;

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod renderer;

pub fn table_ref(name: &str) -> TableRef {
    TableRef {
        schema: None,
        name: name.to_string(),
    }
}
