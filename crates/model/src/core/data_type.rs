use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, collections::HashMap, fmt};

/// Column types a CSV source can be loaded as.
///
/// `Null` is the state of a column for which no non-empty value has been
/// observed yet; it is rendered as `TEXT` once the schema is fixed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DataType {
    Long,
    Double,
    Boolean,
    Timestamp,
    String,
    Null,
}

lazy_static! {
    static ref POSTGRES_TYPE_MAP: HashMap<&'static str, DataType> = build_postgres_type_map();
}

impl DataType {
    pub fn from_postgres_type(type_name: &str) -> Result<Self, String> {
        let normalized = Self::normalize_type_name(type_name);
        POSTGRES_TYPE_MAP
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| format!("Unknown Postgres column type: {type_name}"))
    }

    pub fn postgres_name(&self) -> Cow<'_, str> {
        match self {
            DataType::Long => Cow::Borrowed("BIGINT"),
            DataType::Double => Cow::Borrowed("DOUBLE PRECISION"),
            DataType::Boolean => Cow::Borrowed("BOOLEAN"),
            DataType::Timestamp => Cow::Borrowed("TIMESTAMP"),
            DataType::String | DataType::Null => Cow::Borrowed("TEXT"),
        }
    }

    /// The type a column settles on once inference is over.
    pub fn finalize(self) -> Self {
        match self {
            DataType::Null => DataType::String,
            other => other,
        }
    }

    fn normalize_type_name(type_name: &str) -> String {
        type_name.trim().to_uppercase()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.postgres_name())
    }
}

fn build_postgres_type_map() -> HashMap<&'static str, DataType> {
    use DataType::*;

    let entries = [
        ("BOOLEAN", Boolean),
        ("BOOL", Boolean),
        ("SMALLINT", Long),
        ("INT2", Long),
        ("INTEGER", Long),
        ("INT", Long),
        ("INT4", Long),
        ("INT8", Long),
        ("BIGINT", Long),
        ("FLOAT4", Double),
        ("REAL", Double),
        ("FLOAT8", Double),
        ("DOUBLE PRECISION", Double),
        ("NUMERIC", Double),
        ("TEXT", String),
        ("CHARACTER VARYING", String),
        ("VARCHAR", String),
        ("TIMESTAMP", Timestamp),
        ("TIMESTAMP WITHOUT TIME ZONE", Timestamp),
    ];

    let mut map = HashMap::new();
    for (name, data_type) in entries {
        map.insert(name, data_type);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::DataType;

    #[test]
    fn test_postgres_names() {
        assert_eq!(DataType::Long.postgres_name(), "BIGINT");
        assert_eq!(DataType::Double.postgres_name(), "DOUBLE PRECISION");
        assert_eq!(DataType::Timestamp.postgres_name(), "TIMESTAMP");
        assert_eq!(DataType::Null.postgres_name(), "TEXT");
    }

    #[test]
    fn test_from_postgres_type_is_case_insensitive() {
        assert_eq!(
            DataType::from_postgres_type("timestamp without time zone"),
            Ok(DataType::Timestamp)
        );
        assert_eq!(DataType::from_postgres_type(" bigint "), Ok(DataType::Long));
        assert!(DataType::from_postgres_type("geometry").is_err());
    }

    #[test]
    fn test_null_finalizes_to_string() {
        assert_eq!(DataType::Null.finalize(), DataType::String);
        assert_eq!(DataType::Double.finalize(), DataType::Double);
    }
}
