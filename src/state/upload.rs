use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::state::column::FileRef;

/// A file the user picked but that is not uploaded yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingFile {
    pub path: PathBuf,
    pub name: String,
}

impl PendingFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("could not read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("upload of {name} was rejected: {reason}")]
    Rejected { name: String, reason: String },
}

/// Storage service receiving one file per call.
pub trait FileUploader {
    fn upload(&self, file: &PendingFile) -> impl Future<Output = Result<FileRef, UploadError>>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadProgress {
    /// Zero-based position of the file being uploaded.
    pub index: usize,
    pub total: usize,
    pub name: String,
}

#[derive(Debug)]
pub struct UploadFailure {
    pub name: String,
    pub error: UploadError,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Files stored before the batch stopped; these are kept.
    pub uploaded: Vec<FileRef>,
    pub failure: Option<UploadFailure>,
    /// Files never attempted because an earlier one failed.
    pub discarded: usize,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Uploads `files` one after another. The first failure ends the batch: what
/// was already stored is returned, the rest is dropped.
pub async fn upload_batch<U: FileUploader>(
    uploader: &U,
    files: Vec<PendingFile>,
    mut on_progress: impl FnMut(UploadProgress),
) -> BatchOutcome {
    let total = files.len();
    let mut outcome = BatchOutcome::default();

    for (index, file) in files.iter().enumerate() {
        on_progress(UploadProgress {
            index,
            total,
            name: file.name.clone(),
        });
        match uploader.upload(file).await {
            Ok(stored) => {
                info!(name = %stored.name, bucket = %stored.bucket, "uploaded file");
                outcome.uploaded.push(stored);
            }
            Err(error) => {
                warn!(name = %file.name, %error, "upload failed, discarding rest of batch");
                outcome.discarded = total - index - 1;
                outcome.failure = Some(UploadFailure {
                    name: file.name.clone(),
                    error,
                });
                break;
            }
        }
    }

    outcome
}

/// Address the file is served from: `endpoint/bucket/name`.
pub fn file_url(endpoint: &str, file: &FileRef) -> String {
    format!(
        "{}/{}/{}",
        endpoint.trim_end_matches('/'),
        file.bucket,
        file.name
    )
}
