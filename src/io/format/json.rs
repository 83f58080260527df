use serde_json::Value;

use crate::io::IoError;

pub fn to_json_bytes(value: &Value) -> Result<Vec<u8>, IoError> {
    Ok(serde_json::to_vec(value)?)
}
