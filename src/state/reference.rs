use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagValueStatus {
    #[default]
    Active,
    Archived,
}

/// One selectable value of an external tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagValue {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
    #[serde(default)]
    pub status: TagValueStatus,
}

impl TagValue {
    /// Archived values stay visible for old documents but cannot be picked.
    pub fn is_selectable(&self) -> bool {
        self.status == TagValueStatus::Active
    }
}

/// A project-scoped taxonomy entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TagValues {
    pub values: Vec<TagValue>,
}

impl TagValues {
    pub fn selectable(&self) -> impl Iterator<Item = &TagValue> {
        self.values.iter().filter(|value| value.is_selectable())
    }

    pub fn find(&self, id: u64) -> Option<&TagValue> {
        self.values.iter().find(|value| value.id == id)
    }
}

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("tag {0} not found")]
    UnknownTag(u64),
    #[error("project {0} not found")]
    UnknownProject(String),
    #[error("tag catalog unavailable: {0}")]
    Unavailable(String),
}

/// Lookup service for the external tag taxonomy.
pub trait ReferenceResolver {
    fn tags_for_project(&self, project: &str) -> impl Future<Output = Result<Vec<Tag>, ReferenceError>>;

    fn values_for_reference(&self, tag_id: u64) -> impl Future<Output = Result<TagValues, ReferenceError>>;
}

/// Tag values for display: a failed lookup degrades to an empty list.
pub async fn values_or_empty<R: ReferenceResolver>(resolver: &R, tag_id: u64) -> (TagValues, Option<ReferenceError>) {
    match resolver.values_for_reference(tag_id).await {
        Ok(values) => (values, None),
        Err(err) => {
            tracing::warn!(tag_id, error = %err, "tag value lookup failed");
            (TagValues::default(), Some(err))
        }
    }
}
