pub mod error;
pub mod format;
pub mod reader;
pub mod reference;
pub mod remote;

use serde_json::Value;

pub use error::IoError;
pub use reader::Loader;
pub use reference::Reference;

/// Normalizes fetched YAML (or JSON) bytes into canonical JSON bytes.
pub fn normalize_json_bytes(raw: &[u8], reference: &Reference) -> Result<Vec<u8>, IoError> {
    let value = format::yaml::to_json_value(raw, reference)?;
    format::json::to_json_bytes(&value)
}

/// Loads the referenced document and normalizes YAML (or JSON) into a JSON value.
pub fn load_json_value(loader: &Loader, reference: &Reference) -> Result<Value, IoError> {
    let raw = loader.resolve(reference)?;
    format::yaml::to_json_value(&raw, reference)
}
