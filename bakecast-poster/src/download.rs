//! Fetch the chosen image into a scoped temporary file.
//!
//! The file lives in the OS temp dir and is removed when [`DownloadedImage`]
//! drops, whichever way the run ends.

use crate::error::{PosterError, Result};
use crate::source::ContentSource;
use std::path::Path;
use tempfile::NamedTempFile;
use url::Url;

const DEFAULT_EXTENSION: &str = "jpg";

#[derive(Debug)]
pub struct DownloadedImage {
    file: NamedTempFile,
    len: usize,
}

impl DownloadedImage {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

pub async fn download_image<S>(source: &S, url: &str) -> Result<DownloadedImage>
where
    S: ContentSource + ?Sized,
{
    let bytes = source.fetch_media(url).await?;
    if bytes.is_empty() {
        return Err(PosterError::EmptyMedia {
            url: url.to_string(),
        });
    }

    let file = tempfile::Builder::new()
        .prefix("bakecast-")
        .suffix(&format!(".{}", extension_of(url)))
        .tempfile()?;
    tokio::fs::write(file.path(), &bytes).await?;

    tracing::debug!(url, path = %file.path().display(), len = bytes.len(), "image.downloaded");
    Ok(DownloadedImage {
        file,
        len: bytes.len(),
    })
}

/// Lower-cased extension of the URL's last path segment, `jpg` if none.
fn extension_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut s| s.next_back().map(str::to_string))
        })
        .and_then(|name| {
            name.rsplit_once('.')
                .map(|(_, ext)| ext.to_ascii_lowercase())
        })
        .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}
