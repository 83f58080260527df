use thiserror::Error;

use crate::engine::validate::SchemaError;
use crate::io::IoError;

/// Errors produced by the `validate` command boundary.
///
/// A document that violates its schema is not an error; it is reported
/// through [`crate::domain::report::ValidationReport`].
#[derive(Debug, Error)]
pub enum ValidateError {
    /// A required flag was absent or empty.
    #[error("{flag} is required")]
    MissingArgument { flag: &'static str },

    /// The HTTP client could not be constructed.
    #[error("{0}")]
    Setup(#[source] IoError),

    /// Bytes could not be read from disk or fetched over HTTP.
    #[error("{0}")]
    Fetch(#[source] IoError),

    /// Fetched bytes were not well-formed YAML/JSON.
    #[error("{0}")]
    Parse(#[source] IoError),

    /// The evaluator rejected the schema or document.
    #[error("{0}")]
    SchemaCompile(#[from] SchemaError),
}

impl ValidateError {
    /// Splits a loader failure into the fetch or parse kind.
    pub fn load(source: IoError) -> Self {
        if source.is_fetch() {
            Self::Fetch(source)
        } else {
            Self::Parse(source)
        }
    }
}
