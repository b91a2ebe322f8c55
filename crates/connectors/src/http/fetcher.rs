use crate::http::error::FetchError;
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, Url};
use std::path::Path;
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::{debug, info};

/// Retrieves a remote resource into a local file.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Writes the body of `url` to `dest` and returns the number of bytes written.
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError>;
}

/// Fetches `http(s)://` URLs with reqwest and copies `file://` URLs locally.
#[derive(Debug, Clone, Default)]
pub struct UrlFetcher {
    client: Client,
}

impl UrlFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    async fn fetch_http(&self, url: Url, dest: &Path) -> Result<u64, FetchError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let mut file = File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }

    async fn fetch_file(&self, url: Url, dest: &Path) -> Result<u64, FetchError> {
        let source = url.to_file_path().map_err(|_| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: "not a local file path".to_string(),
        })?;

        // copying a file onto itself would truncate it before reading
        if same_file(&source, dest).await {
            debug!(path = %dest.display(), "Source file is already in place");
            return Ok(tokio::fs::metadata(dest).await?.len());
        }
        Ok(tokio::fs::copy(&source, dest).await?)
    }
}

async fn same_file(a: &Path, b: &Path) -> bool {
    match (tokio::fs::canonicalize(a).await, tokio::fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[async_trait]
impl Fetcher for UrlFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        let parsed = Url::parse(url).map_err(|err| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: err.to_string(),
        })?;

        info!(url = %parsed, dest = %dest.display(), "Downloading source file");

        let written = match parsed.scheme() {
            "http" | "https" => self.fetch_http(parsed, dest).await?,
            "file" => self.fetch_file(parsed, dest).await?,
            other => return Err(FetchError::UnsupportedScheme(other.to_string())),
        };

        debug!(bytes = written, "Download finished");
        Ok(written)
    }
}
