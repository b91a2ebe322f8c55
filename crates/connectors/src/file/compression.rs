use crate::file::csv::error::FileError;
use flate2::read::MultiGzDecoder;
use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

/// How the bytes of a local source file are encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// Decide from the file extension (`.gz` means gzip).
    #[default]
    Infer,
    None,
    Gzip,
}

impl Compression {
    pub fn resolve(self, path: &Path) -> Compression {
        match self {
            Compression::Infer => {
                let is_gzip = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
                if is_gzip {
                    Compression::Gzip
                } else {
                    Compression::None
                }
            }
            other => other,
        }
    }

    /// Opens `path` as a byte stream, decompressing if needed.
    pub fn open(self, path: &Path) -> Result<Box<dyn Read + Send>, FileError> {
        let file = File::open(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => FileError::NotFound(path.display().to_string()),
            _ => FileError::IoError(err),
        })?;

        let reader: Box<dyn Read + Send> = match self.resolve(path) {
            Compression::Gzip => Box::new(MultiGzDecoder::new(BufReader::new(file))),
            _ => Box::new(BufReader::new(file)),
        };
        Ok(reader)
    }
}
