//! JSON-pointer scraping of platform responses.
//!
//! Platform responses are read at fixed pointer paths. A path that does not
//! resolve, or resolves to the wrong type, is a hard failure rather than a
//! soft default: every consumer of these helpers treats an unexpected
//! response shape as fatal.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonPathError {
    #[error("response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("response has no value at {pointer}")]
    Missing { pointer: String },

    #[error("value at {pointer} is not a {expected}")]
    WrongType {
        pointer: String,
        expected: &'static str,
    },
}

pub fn parse(body: &[u8]) -> Result<Value, JsonPathError> {
    Ok(serde_json::from_slice(body)?)
}

pub fn string_at(value: &Value, pointer: &str) -> Result<String, JsonPathError> {
    let found = value.pointer(pointer).ok_or_else(|| JsonPathError::Missing {
        pointer: pointer.to_string(),
    })?;
    found
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| JsonPathError::WrongType {
            pointer: pointer.to_string(),
            expected: "string",
        })
}

pub fn u64_at(value: &Value, pointer: &str) -> Result<u64, JsonPathError> {
    let found = value.pointer(pointer).ok_or_else(|| JsonPathError::Missing {
        pointer: pointer.to_string(),
    })?;
    found.as_u64().ok_or_else(|| JsonPathError::WrongType {
        pointer: pointer.to_string(),
        expected: "non-negative integer",
    })
}
