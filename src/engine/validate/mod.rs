pub mod retrieve;
pub mod schema;

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::domain::report::ValidationReport;
use crate::io::Loader;

/// JSON Schema drafts that can be forced instead of detected from `$schema`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaDraft {
    Draft4,
    Draft6,
    Draft7,
    Draft201909,
    Draft202012,
}

impl SchemaDraft {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft4 => "4",
            Self::Draft6 => "6",
            Self::Draft7 => "7",
            Self::Draft201909 => "2019-09",
            Self::Draft202012 => "2020-12",
        }
    }
}

impl fmt::Display for SchemaDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SchemaDraft> for jsonschema::Draft {
    fn from(value: SchemaDraft) -> Self {
        match value {
            SchemaDraft::Draft4 => Self::Draft4,
            SchemaDraft::Draft6 => Self::Draft6,
            SchemaDraft::Draft7 => Self::Draft7,
            SchemaDraft::Draft201909 => Self::Draft201909,
            SchemaDraft::Draft202012 => Self::Draft202012,
        }
    }
}

/// Evaluator settings for one validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Forced draft; `None` detects it from the schema's `$schema`.
    pub draft: Option<SchemaDraft>,
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema is not valid json: {0}")]
    SchemaJson(#[source] serde_json::Error),
    #[error("document is not valid json: {0}")]
    DocumentJson(#[source] serde_json::Error),
    #[error("invalid schema: {0}")]
    Compile(String),
}

/// Validates a JSON document against a JSON schema, both given as JSON bytes.
///
/// External `$ref`s are fetched through `loader`.
pub fn execute_validate(
    schema_json: &[u8],
    document_json: &[u8],
    options: ValidateOptions,
    loader: &Loader,
) -> Result<ValidationReport, SchemaError> {
    let schema: Value = serde_json::from_slice(schema_json).map_err(SchemaError::SchemaJson)?;
    let document: Value =
        serde_json::from_slice(document_json).map_err(SchemaError::DocumentJson)?;
    schema::validate(&schema, &document, options, loader)
}
