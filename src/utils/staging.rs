//! Per-request temp files for images on their way to the provider.
//!
//! A [`StagedImage`] owns its file; dropping it removes the file. The
//! pipeline acquires each staged file once and never deletes by hand, so
//! every exit path (success, early `?` return, panic unwind) releases it.
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use crate::error::AppResult;
use crate::utils::encoding::data_uri;

#[derive(Debug)]
pub struct StagedImage {
    file: Option<NamedTempFile>,
    mime: String,
}

impl StagedImage {
    /// Write `bytes` to a uniquely named file in `dir`. `tag` ends up in the
    /// file name to make leftovers attributable.
    pub async fn stage(dir: &Path, tag: &str, mime: &str, bytes: &[u8]) -> AppResult<Self> {
        let file = Builder::new()
            .prefix(&format!("tryon-{}-", tag))
            .suffix(extension_for(mime))
            .tempfile_in(dir)?;
        // Held from here on, so a failed write still removes the file.
        let staged = StagedImage { file: Some(file), mime: mime.to_string() };
        tokio::fs::write(staged.path(), bytes).await?;
        tracing::debug!("Staged {} bytes at {}", bytes.len(), staged.path().display());
        Ok(staged)
    }

    pub fn path(&self) -> &Path {
        self.file
            .as_ref()
            .map(|f| f.path())
            .unwrap_or_else(|| Path::new(""))
    }

    /// Read the staged bytes back as a base64 data URI.
    pub async fn to_data_uri(&self) -> AppResult<String> {
        let bytes = tokio::fs::read(self.path()).await?;
        Ok(data_uri(&self.mime, &bytes))
    }
}

impl Drop for StagedImage {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let path: PathBuf = file.path().to_path_buf();
            if let Err(e) = file.close() {
                tracing::warn!("Failed to remove staged file {}: {}", path.display(), e);
            }
        }
    }
}

fn extension_for(mime: &str) -> &'static str {
    match mime {
        "image/png" => ".png",
        "image/webp" => ".webp",
        "image/gif" => ".gif",
        _ => ".jpg",
    }
}
