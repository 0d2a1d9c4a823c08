//! Typed access to a command's named arguments.
//!
//! Values arrive as dynamic JSON (string, integer, boolean); every
//! accessor checks presence and type so a bad argument fails fast with
//! an explicit error record before any driver call is made.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{BridgeError, BridgeResult};

/// Named arguments of one command invocation.
#[derive(Clone, Copy)]
pub struct Args<'a>(&'a HashMap<String, Value>);

impl<'a> Args<'a> {
    pub fn new(map: &'a HashMap<String, Value>) -> Self {
        Self(map)
    }

    /// Required string argument.
    pub fn str(&self, name: &'static str) -> BridgeResult<&'a str> {
        match self.0.get(name) {
            None | Some(Value::Null) => Err(BridgeError::MissingArgument(name)),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(wrong_type(name, "string", other)),
        }
    }

    /// Required integer argument.
    pub fn int(&self, name: &'static str) -> BridgeResult<i64> {
        match self.0.get(name) {
            None | Some(Value::Null) => Err(BridgeError::MissingArgument(name)),
            Some(value) => as_int(name, value),
        }
    }

    /// Optional integer argument. Absent or null means `None`.
    pub fn opt_int(&self, name: &'static str) -> BridgeResult<Option<i64>> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => as_int(name, value).map(Some),
        }
    }

    /// Optional boolean flag, defaulting to false when absent or null.
    pub fn flag(&self, name: &'static str) -> BridgeResult<bool> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(wrong_type(name, "boolean", other)),
        }
    }
}

fn as_int(name: &'static str, value: &Value) -> BridgeResult<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| wrong_type(name, "integer", value)),
        other => Err(wrong_type(name, "integer", other)),
    }
}

fn wrong_type(name: &'static str, expected: &str, got: &Value) -> BridgeError {
    BridgeError::InvalidArgument {
        name,
        message: format!("expected {}, got {}", expected, type_name(got)),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
