//! Image upload storage
//!
//! Uploaded files are written under the public directory with a generated
//! name; the client's filename only contributes its extension.

use axum::body::Bytes;
use futures::{Stream, StreamExt};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::pin::{Pin, pin};
use std::sync::OnceLock;
use thiserror::Error;
use tokio::{
    fs::{self, File},
    io::AsyncWriteExt,
};
use tracing::warn;
use uuid::Uuid;

/// Failure while persisting an upload
#[derive(Error, Debug)]
pub enum UploadError<E> {
    /// The incoming body failed before it was fully received
    #[error("Upload stream failed: {0}")]
    Source(E),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Directory of publicly served uploads
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
    base_url: Option<String>,
}

impl ImageStore {
    /// `base_url`, when set, replaces the request origin in returned URLs
    pub fn new(root: impl Into<PathBuf>, base_url: Option<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `chunks` to a freshly named file and return that name with the
    /// number of bytes written. Nothing is left on disk when writing fails.
    pub async fn save<S, E>(
        &self,
        original_name: Option<&str>,
        chunks: S,
    ) -> Result<(String, u64), UploadError<E>>
    where
        S: Stream<Item = Result<Bytes, E>>,
    {
        fs::create_dir_all(&self.root).await?;

        let name = stored_name(original_name);
        let path = self.root.join(&name);
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        let mut chunks = pin!(chunks);
        match write_chunks(&mut file, chunks.as_mut()).await {
            Ok(size) => Ok((name, size)),
            Err(err) => {
                drop(file);
                if let Err(e) = fs::remove_file(&path).await {
                    warn!("Failed to remove partial upload {}: {}", path.display(), e);
                }
                Err(err)
            }
        }
    }

    /// Public URL of a stored file. `origin` is `scheme://host[:port]` of the
    /// incoming request; without either origin the URL is root-relative.
    pub fn public_url(&self, origin: Option<&str>, name: &str) -> String {
        match self.base_url.as_deref().or(origin) {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), name),
            None => format!("/{}", name),
        }
    }
}

async fn write_chunks<S, E>(file: &mut File, mut chunks: Pin<&mut S>) -> Result<u64, UploadError<E>>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    let mut size = 0;
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk.map_err(UploadError::Source)?;
        file.write_all(&chunk).await?;
        size += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(size)
}

/// Generated storage name: a UUID plus the original extension when it is safe
pub fn stored_name(original_name: Option<&str>) -> String {
    let id = Uuid::new_v4();
    match original_name.and_then(safe_extension) {
        Some(ext) => format!("{}.{}", id, ext),
        None => id.to_string(),
    }
}

fn safe_extension(original_name: &str) -> Option<String> {
    static EXTENSION_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EXTENSION_REGEX
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9]{1,10}$").expect("Failed to compile extension regex"));

    // Clients may send Windows paths, which `Path` does not split on Unix
    let file_name = original_name.rsplit(['/', '\\']).next()?;
    let ext = Path::new(file_name).extension()?.to_str()?;

    regex.is_match(ext).then(|| ext.to_ascii_lowercase())
}
