use crate::core::value::Value;
use serde::{Deserialize, Serialize};

/// A single row, positionally aligned with the columns of its batch schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RowData {
    pub values: Vec<Value>,
}

impl RowData {
    pub fn new(values: Vec<Value>) -> Self {
        RowData { values }
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn get_value(&self, index: usize) -> Value {
        self.get(index).cloned().unwrap_or(Value::Null)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
