pub mod connection;
pub mod pipeline;
