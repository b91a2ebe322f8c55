use crate::query::ast::{
    common::TableRef,
    copy::{Copy, CopyOption},
};

#[derive(Debug, Clone)]
pub struct CopyBuilder {
    ast: Copy,
}

impl CopyBuilder {
    pub fn new(table: TableRef) -> Self {
        Self {
            ast: Copy {
                table,
                columns: Vec::new(),
                options: Vec::new(),
            },
        }
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.ast.columns = columns.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn option(mut self, key: &str, value: Option<&str>) -> Self {
        self.ast.options.push(CopyOption {
            key: key.to_string(),
            value: value.map(|v| v.to_string()),
        });
        self
    }

    pub fn build(self) -> Copy {
        self.ast
    }
}
