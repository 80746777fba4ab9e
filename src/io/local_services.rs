//! Filesystem-backed stand-ins for the tag service and the file store, used
//! by the desktop shell.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::state::column::FileRef;
use crate::state::ids;
use crate::state::reference::{ReferenceError, ReferenceResolver, Tag, TagValue, TagValues};
use crate::state::upload::{FileUploader, PendingFile, UploadError};

#[derive(Clone, Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tags: Vec<CatalogTag>,
}

#[derive(Clone, Debug, Deserialize)]
struct CatalogTag {
    id: u64,
    name: String,
    /// Projects the tag belongs to; empty means every project.
    #[serde(default)]
    projects: Vec<String>,
    #[serde(default)]
    values: Vec<TagValue>,
}

/// Tag taxonomy read from a JSON file on every lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalTagCatalog {
    path: Option<PathBuf>,
}

impl LocalTagCatalog {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    async fn read(&self) -> Result<CatalogFile, ReferenceError> {
        let Some(path) = self.path.as_ref() else {
            return Ok(CatalogFile::default());
        };
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| ReferenceError::Unavailable(format!("{}: {err}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|err| ReferenceError::Unavailable(format!("{}: {err}", path.display())))
    }
}

impl ReferenceResolver for LocalTagCatalog {
    async fn tags_for_project(&self, project: &str) -> Result<Vec<Tag>, ReferenceError> {
        let catalog = self.read().await?;
        let tags: Vec<Tag> = catalog
            .tags
            .into_iter()
            .filter(|tag| tag.projects.is_empty() || tag.projects.iter().any(|p| p == project))
            .map(|tag| Tag {
                id: tag.id,
                name: tag.name,
            })
            .collect();
        debug!(project, count = tags.len(), "resolved project tags");
        Ok(tags)
    }

    async fn values_for_reference(&self, tag_id: u64) -> Result<TagValues, ReferenceError> {
        let catalog = self.read().await?;
        catalog
            .tags
            .into_iter()
            .find(|tag| tag.id == tag_id)
            .map(|tag| TagValues { values: tag.values })
            .ok_or(ReferenceError::UnknownTag(tag_id))
    }
}

/// Stores uploads as `root/bucket/<id>-<name>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalFileStore {
    root: PathBuf,
    bucket: String,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>, bucket: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            bucket: bucket.into(),
        }
    }

    /// Endpoint to build file URLs against when no server is configured.
    pub fn endpoint(&self) -> String {
        format!("file://{}", self.root.display())
    }

    pub fn stored_path(&self, file: &FileRef) -> PathBuf {
        self.root.join(&file.bucket).join(&file.name)
    }
}

impl FileUploader for LocalFileStore {
    async fn upload(&self, file: &PendingFile) -> Result<FileRef, UploadError> {
        let io_error = |source| UploadError::Io {
            name: file.name.clone(),
            source,
        };
        let dir = self.root.join(&self.bucket);
        tokio::fs::create_dir_all(&dir).await.map_err(io_error)?;

        let id = ids::next_id();
        let stored_name = format!("{id}-{}", file.name);
        tokio::fs::copy(file.path(), dir.join(&stored_name))
            .await
            .map_err(io_error)?;

        Ok(FileRef {
            id: id.key(),
            name: stored_name,
            bucket: self.bucket.clone(),
        })
    }
}
