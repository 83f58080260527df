use serde_json::Value;

use crate::domain::report::ValidationReport;
use crate::io::Loader;

use super::retrieve::LoaderRetriever;
use super::{SchemaDraft, SchemaError, ValidateOptions};

const ROOT_FIELD: &str = "(root)";

pub fn validate(
    schema: &Value,
    document: &Value,
    options: ValidateOptions,
    loader: &Loader,
) -> Result<ValidationReport, SchemaError> {
    let retriever = LoaderRetriever::new(loader.clone());
    let compiled = match options.draft {
        Some(draft) => jsonschema::options()
            .with_draft(draft.into())
            .should_validate_formats(true)
            .with_retriever(retriever)
            .build(schema),
        None => jsonschema::options()
            .should_validate_formats(true)
            .with_retriever(retriever)
            .build(schema),
    };
    let validator = compiled.map_err(|error| SchemaError::Compile(error.to_string()))?;
    tracing::debug!(
        draft = options.draft.map_or("detected", SchemaDraft::as_str),
        "compiled schema"
    );

    let errors: Vec<String> = validator
        .iter_errors(document)
        .map(|error| {
            let field = field_from_json_pointer(error.instance_path().as_str());
            format!("{field}: {error}")
        })
        .collect();
    tracing::debug!(error_count = errors.len(), "evaluated document");

    Ok(ValidationReport::new(errors))
}

fn field_from_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        return ROOT_FIELD.to_string();
    }

    pointer
        .trim_start_matches('/')
        .split('/')
        .map(|token| {
            let segment = decode_pointer_token(token);
            if is_simple_identifier(&segment) || is_array_index(&segment) {
                segment
            } else {
                serde_json::to_string(&segment)
                    .unwrap_or_else(|_| "\"<invalid-segment>\"".to_string())
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

fn decode_pointer_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

fn is_simple_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

fn is_array_index(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit())
}
