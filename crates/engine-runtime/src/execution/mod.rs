pub mod download;
pub mod executor;
pub mod loader;
pub mod report;
