//! Component arguments carried by a request.

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::extract::error::{json_type, ExtractError};

/// Configuration mapping decoded from the request's args field.
///
/// Keys correspond to the arguments declared on the component. The platform
/// usually sends values as strings, so [`Args::get_as`] parses `"3"` and `3`
/// alike.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Args(Map<String, Value>);

impl Args {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw value of an argument.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Argument as a string slice, if it is a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Parse an argument, accepting both string-encoded and native JSON scalars.
    pub fn get_as<T: FromStr>(&self, key: &str) -> Option<T> {
        match self.0.get(key)? {
            Value::String(s) => s.trim().parse().ok(),
            Value::Null => None,
            other => other.to_string().parse().ok(),
        }
    }

    /// Deserialize the whole mapping into a typed struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.0.clone()))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Args {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Decode the args field of a JSON envelope.
///
/// The field may hold an object or a string with JSON-encoded configuration.
/// Absent or `null` yields an empty mapping.
pub fn decode_args(raw: Option<Value>) -> Result<Args, ExtractError> {
    match raw {
        None | Some(Value::Null) => Ok(Args::new()),
        Some(Value::Object(map)) => Ok(Args(map)),
        Some(Value::String(text)) => decode_args_text(&text),
        Some(other) => Err(ExtractError::ArgsNotObject(json_type(&other))),
    }
}

/// Decode args sent as text, as multipart forms always do.
pub fn decode_args_text(text: &str) -> Result<Args, ExtractError> {
    if text.trim().is_empty() {
        return Ok(Args::new());
    }
    match serde_json::from_str::<Value>(text).map_err(ExtractError::InvalidArgs)? {
        Value::Object(map) => Ok(Args(map)),
        Value::Null => Ok(Args::new()),
        other => Err(ExtractError::ArgsNotObject(json_type(&other))),
    }
}
