use crate::error::DownloadError;
use connectors::http::fetcher::Fetcher;
use std::path::{Path, PathBuf};
use tracing::info;
use url::Url;

const PLAIN_FILE_NAME: &str = "output.csv";
const GZIP_FILE_NAME: &str = "output.csv.gz";

/// Local file name for the download of `url`; gzip sources keep their suffix
/// so the reader can pick the decoder from the extension.
pub fn local_file_name(url: &str) -> &'static str {
    let is_gzip = match Url::parse(url) {
        Ok(parsed) => parsed.path().ends_with(".csv.gz"),
        Err(_) => url.ends_with(".csv.gz"),
    };

    if is_gzip {
        GZIP_FILE_NAME
    } else {
        PLAIN_FILE_NAME
    }
}

/// Retrieves `url` into `work_dir` and returns the local path.
///
/// A failed fetch aborts the run; the file is checked for existence only
/// after the fetcher reports success.
pub async fn download(
    fetcher: &dyn Fetcher,
    url: &str,
    work_dir: &Path,
) -> Result<PathBuf, DownloadError> {
    tokio::fs::create_dir_all(work_dir)
        .await
        .map_err(|source| DownloadError::WorkDir {
            path: work_dir.to_path_buf(),
            source,
        })?;

    let dest = work_dir.join(local_file_name(url));
    let bytes = fetcher.fetch(url, &dest).await?;

    if !tokio::fs::try_exists(&dest).await.unwrap_or(false) {
        return Err(DownloadError::Missing(dest));
    }

    info!(path = %dest.display(), bytes, "Source file downloaded");
    Ok(dest)
}
