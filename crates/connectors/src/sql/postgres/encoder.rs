use crate::sql::base::encoder::CopyValueEncoder;
use model::core::{utils::escape_csv_string, value::Value};

/// Encodes values for `COPY ... WITH (FORMAT csv, NULL '\N')`.
#[derive(Debug, Default)]
pub struct PgCopyValueEncoder;

impl PgCopyValueEncoder {
    pub fn new() -> Self {
        Self
    }

    fn encode_float(v: f64) -> String {
        if v.is_nan() {
            "NaN".to_string()
        } else if v.is_infinite() {
            if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
        } else {
            ryu::Buffer::new().format_finite(v).to_string()
        }
    }
}

impl CopyValueEncoder for PgCopyValueEncoder {
    fn encode_value(&self, value: &Value) -> String {
        match value {
            Value::Null => self.encode_null(),
            Value::String(s) => escape_csv_string(s),
            Value::Boolean(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => Self::encode_float(*v),
            Value::Timestamp(ts) => ts.format("%Y-%m-%d %H:%M:%S%.f").to_string(),
        }
    }

    fn encode_null(&self) -> String {
        "\\N".to_string()
    }
}
