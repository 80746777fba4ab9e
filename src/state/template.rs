use serde::{Deserialize, Serialize};

use crate::state::column::collect_ids;
use crate::state::ids::{self, Id};
use crate::state::mode::OperationMode;
use crate::state::row::Row;

/// What a template describes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    #[default]
    Scenario,
    Case,
    Execution,
}

impl TemplateKind {
    pub fn all() -> &'static [Self] {
        &[Self::Scenario, Self::Case, Self::Execution]
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Scenario => "scenario",
            Self::Case => "case",
            Self::Execution => "execution",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.code() == code)
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Self::Scenario => "kind.scenario",
            Self::Case => "kind.case",
            Self::Execution => "kind.execution",
        }
    }
}

/// A named table document, either an authored schema or a filled-in copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    pub id: Id,
    pub name: String,
    pub kind: TemplateKind,
    pub rows: Vec<Row>,
}

impl Template {
    pub fn new(name: impl Into<String>, kind: TemplateKind) -> Self {
        Self {
            id: ids::next_id(),
            name: name.into(),
            kind,
            rows: Vec::new(),
        }
    }

    /// Mode a document of this kind opens in by default.
    pub fn default_mode(&self) -> OperationMode {
        match self.kind {
            TemplateKind::Execution => OperationMode::FillIn,
            TemplateKind::Scenario | TemplateKind::Case => OperationMode::Edit,
        }
    }

    /// Registers all ids in the document with the session id generator.
    pub fn observe_ids(&self) {
        ids::observe(self.id);
        for id in collect_ids(&self.rows) {
            ids::observe(id);
        }
    }
}
