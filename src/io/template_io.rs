use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::io::persist::{self, KeyedRows};
use crate::io::{atomic_write_string, DocumentError};
use crate::state::ids::{self, Id};
use crate::state::template::{Template, TemplateKind};

pub const TEMPLATE_EXTENSION: &str = "casesheet.json";

/// On-disk template document. Everything but `rows` is optional so that
/// documents exported by the backend (a bare keyed row map under `rows`)
/// load as well.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct TemplateFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    kind: TemplateKind,
    #[serde(default)]
    rows: Option<KeyedRows>,
}

impl TemplateFile {
    fn into_template(self) -> Result<Template, DocumentError> {
        let rows = match self.rows {
            Some(keyed) => persist::rows_from_keyed(keyed)?,
            None => Vec::new(),
        };
        Ok(Template {
            id: self.id.map(Id).unwrap_or_else(ids::next_id),
            name: self.name,
            kind: self.kind,
            rows,
        })
    }

    fn from_template(template: &Template) -> Self {
        TemplateFile {
            id: Some(template.id.as_u64()),
            name: template.name.clone(),
            kind: template.kind,
            rows: Some(persist::rows_to_keyed(&template.rows)),
        }
    }
}

pub fn parse_template(content: &str) -> Result<Template, DocumentError> {
    let file: TemplateFile = serde_json::from_str(content)?;
    let template = file.into_template()?;
    template.observe_ids();
    Ok(template)
}

pub fn render_template(template: &Template) -> Result<String, DocumentError> {
    Ok(serde_json::to_string_pretty(&TemplateFile::from_template(
        template,
    ))?)
}

pub fn load_template(path: &Path) -> Result<Template, DocumentError> {
    let content = fs::read_to_string(path)?;
    let template = parse_template(&content)?;
    info!(path = %path.display(), rows = template.rows.len(), "loaded template");
    Ok(template)
}

pub fn save_template(path: &Path, template: &Template) -> Result<(), DocumentError> {
    let content = render_template(template)?;
    atomic_write_string(path, &content)?;
    info!(path = %path.display(), rows = template.rows.len(), "saved template");
    Ok(())
}

/// Suggested file name for a template, e.g. `Login flow.casesheet.json`.
pub fn default_file_name(template: &Template) -> PathBuf {
    let stem: String = template
        .name
        .chars()
        .map(|ch| if matches!(ch, '/' | '\\' | ':') { '_' } else { ch })
        .collect();
    let stem = if stem.trim().is_empty() {
        "template".to_string()
    } else {
        stem.trim().to_string()
    };
    PathBuf::from(format!("{stem}.{TEMPLATE_EXTENSION}"))
}
