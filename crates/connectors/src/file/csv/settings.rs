use crate::file::compression::Compression;
use model::execution::pipeline::DEFAULT_CHUNK_SIZE;

#[derive(Debug, Clone)]
pub struct CsvSettings {
    pub delimiter: char,
    pub has_headers: bool,
    /// Number of records per chunk.
    pub chunk_size: usize,
    pub compression: Compression,
}

impl CsvSettings {
    pub fn new(chunk_size: usize) -> Self {
        CsvSettings {
            chunk_size,
            ..Default::default()
        }
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }
}

impl Default for CsvSettings {
    fn default() -> Self {
        CsvSettings {
            delimiter: ',',
            has_headers: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
            compression: Compression::Infer,
        }
    }
}
