pub mod batch;
pub mod row;
pub mod schema;
