use model::core::{
    data_type::DataType,
    utils::{parse_bool, parse_timestamp},
};

/// The promotion sequence: start at the current type and widen until it fits.
fn chain(data_type: DataType) -> &'static [DataType] {
    match data_type {
        DataType::Null => &[
            DataType::Long,
            DataType::Double,
            DataType::Boolean,
            DataType::String,
        ],
        DataType::Long => &[DataType::Long, DataType::Double, DataType::String],
        DataType::Double => &[DataType::Double, DataType::String],
        DataType::Boolean => &[DataType::Boolean, DataType::String],
        DataType::Timestamp => &[DataType::Timestamp, DataType::String],
        DataType::String => &[DataType::String],
    }
}

/// Check if type can parse the given string.
fn can_parse(data_type: DataType, value: &str) -> bool {
    match data_type {
        DataType::Long => value.trim().parse::<i64>().is_ok(),
        DataType::Double => value.trim().parse::<f64>().is_ok(),
        DataType::Boolean => parse_bool(value).is_some(),
        DataType::Timestamp => parse_timestamp(value).is_some(),
        DataType::String | DataType::Null => true,
    }
}

pub trait CsvType {
    fn promote(&self, value: &str) -> DataType;
}

impl CsvType for DataType {
    fn promote(&self, value: &str) -> DataType {
        // Empty cells are NULL and say nothing about the type
        if value.is_empty() {
            return *self;
        }

        chain(*self)
            .iter()
            .copied()
            .find(|t| can_parse(*t, value))
            .unwrap_or(DataType::String)
    }
}
