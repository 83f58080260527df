use std::fmt::Display;

use serde::Deserialize;
use serde_json::Value;

use crate::io::IoError;

/// Parses one YAML document (JSON included) and converts it into a JSON value.
///
/// Blank input is treated as an explicit `null` document. Merge keys (`<<`)
/// are applied, and empty documents after the first one are ignored.
pub fn to_json_value(input: &[u8], reference: &impl Display) -> Result<Value, IoError> {
    if input.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    let mut documents =
        serde_yaml::Deserializer::from_slice(input).map(serde_yaml::Value::deserialize);
    let Some(first) = documents.next() else {
        return Ok(Value::Null);
    };
    let mut yaml_value = first.map_err(|source| parse_error(reference, source))?;
    for extra in documents {
        if !extra.map_err(|source| parse_error(reference, source))?.is_null() {
            return Err(IoError::MultipleDocuments {
                reference: reference.to_string(),
            });
        }
    }

    yaml_value
        .apply_merge()
        .map_err(|source| parse_error(reference, source))?;
    serde_json::to_value(yaml_value).map_err(|source| IoError::JsonConvert {
        reference: reference.to_string(),
        source,
    })
}

fn parse_error(reference: &impl Display, source: serde_yaml::Error) -> IoError {
    IoError::YamlParse {
        reference: reference.to_string(),
        source,
    }
}
