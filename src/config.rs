use std::path::PathBuf;

use thiserror::Error;

use crate::state::mode::{OperationMode, DEFAULT_MAX_COLUMNS};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Desktop shell settings, read from `CASESHEET_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Template to open at startup.
    pub open: Option<PathBuf>,
    pub mode: OperationMode,
    pub project: String,
    /// JSON tag catalog backing `Tag` columns.
    pub tags: Option<PathBuf>,
    pub storage_dir: PathBuf,
    pub bucket: String,
    /// Base URL files are served from; defaults to the storage directory.
    pub file_endpoint: Option<String>,
    pub max_columns: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            open: None,
            mode: OperationMode::Edit,
            project: "default".to_string(),
            tags: None,
            storage_dir: std::env::temp_dir().join("casesheet-files"),
            bucket: "attachments".to_string(),
            file_endpoint: None,
            max_columns: DEFAULT_MAX_COLUMNS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get("CASESHEET_OPEN") {
            config.open = Some(PathBuf::from(path));
        }
        if let Some(mode) = get("CASESHEET_MODE") {
            config.mode = OperationMode::from_code(&mode).ok_or(ConfigError::Invalid {
                var: "CASESHEET_MODE",
                value: mode.clone(),
            })?;
        }
        if let Some(project) = get("CASESHEET_PROJECT") {
            config.project = project.trim().to_string();
        }
        if let Some(path) = get("CASESHEET_TAGS") {
            config.tags = Some(PathBuf::from(path));
        }
        if let Some(path) = get("CASESHEET_STORAGE_DIR") {
            config.storage_dir = PathBuf::from(path);
        }
        if let Some(bucket) = get("CASESHEET_BUCKET") {
            config.bucket = bucket.trim().to_string();
        }
        if let Some(endpoint) = get("CASESHEET_FILE_ENDPOINT") {
            config.file_endpoint = Some(endpoint.trim().to_string());
        }
        if let Some(max) = get("CASESHEET_MAX_COLUMNS") {
            config.max_columns = max
                .trim()
                .parse()
                .ok()
                .filter(|&n: &usize| n > 0)
                .ok_or(ConfigError::Invalid {
                    var: "CASESHEET_MAX_COLUMNS",
                    value: max.clone(),
                })?;
        }

        Ok(config)
    }
}
