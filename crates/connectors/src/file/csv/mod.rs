pub mod error;
pub mod metadata;
pub mod reader;
pub mod settings;
pub mod types;
