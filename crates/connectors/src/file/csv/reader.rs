use crate::file::{
    compression::Compression,
    csv::{error::FileError, metadata::normalize_headers, settings::CsvSettings},
};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::{io::Read, iter::FusedIterator, path::Path};
use tracing::debug;

/// Upper bound on rows reserved up front for a chunk.
const MAX_PREALLOCATED_ROWS: usize = 8_192;

/// Up to `chunk_size` untyped records, in source order.
#[derive(Debug, Clone)]
pub struct RawChunk {
    /// 1-based position of the chunk in the file.
    pub index: usize,
    /// 0-based row number of the first record.
    pub start_row: u64,
    pub records: Vec<StringRecord>,
}

impl RawChunk {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A one-pass reader that cuts a (possibly gzipped) CSV file into chunks.
///
/// Iteration yields `Ok(chunk)` until the file is exhausted, then `None`.
/// After an error the reader is finished and yields nothing more.
pub struct CsvChunkReader {
    compression: Compression,
    headers: Vec<String>,
    records: StringRecordsIntoIter<Box<dyn Read + Send>>,
    chunk_size: usize,
    rows_read: u64,
    chunks_read: usize,
    finished: bool,
}

impl CsvChunkReader {
    pub fn open(path: impl AsRef<Path>, settings: &CsvSettings) -> Result<Self, FileError> {
        let path = path.as_ref();
        if settings.chunk_size == 0 {
            return Err(FileError::InvalidSettings(
                "chunk size must be greater than zero".to_string(),
            ));
        }

        let compression = settings.compression.resolve(path);
        let input = compression.open(path)?;

        let mut reader = ReaderBuilder::new()
            .delimiter(settings.delimiter as u8)
            .has_headers(settings.has_headers)
            .from_reader(input);

        let raw_headers = reader.headers()?.clone();
        if raw_headers.is_empty() {
            return Err(FileError::InvalidFormat(format!(
                "{} has no columns to parse",
                path.display()
            )));
        }
        let headers = normalize_headers(&raw_headers, settings.has_headers);

        debug!(
            path = %path.display(),
            ?compression,
            columns = headers.len(),
            "Opened CSV source"
        );

        Ok(CsvChunkReader {
            compression,
            headers,
            records: reader.into_records(),
            chunk_size: settings.chunk_size,
            rows_read: 0,
            chunks_read: 0,
            finished: false,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The compression actually used to open the file.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    fn read_chunk(&mut self) -> Result<Option<RawChunk>, FileError> {
        let mut records = Vec::with_capacity(self.chunk_size.min(MAX_PREALLOCATED_ROWS));

        while records.len() < self.chunk_size {
            match self.records.next() {
                Some(record) => records.push(record?),
                None => break,
            }
        }

        let chunk = RawChunk {
            index: self.chunks_read + 1,
            start_row: self.rows_read,
            records,
        };
        if chunk.is_empty() {
            return Ok(None);
        }

        self.chunks_read += 1;
        self.rows_read += chunk.len() as u64;
        Ok(Some(chunk))
    }
}

impl Iterator for CsvChunkReader {
    type Item = Result<RawChunk, FileError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.read_chunk() {
            Ok(Some(chunk)) => Some(Ok(chunk)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for CsvChunkReader {}
