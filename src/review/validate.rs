use serde_json::{Map, Value};

use crate::error::{BotError, Result};

pub const KEY_HOMEWORKS: &str = "homeworks";
pub const KEY_CURRENT_DATE: &str = "current_date";
const KEY_ERROR_CODE: &str = "code";

/// A response that passed shape checks.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBatch {
    /// Newest first, as the API orders them. May be empty.
    pub homeworks: Vec<Value>,
    /// `None` when the server sent a non-integer timestamp.
    pub current_date: Option<i64>,
}

impl StatusBatch {
    pub fn newest(&self) -> Option<&Value> {
        self.homeworks.first()
    }
}

/// Check the raw body has the shape the bot relies on.
pub fn validate(raw: Value) -> Result<StatusBatch> {
    let mut obj = match raw {
        Value::Object(obj) => obj,
        other => {
            return Err(BotError::Shape(format!(
                "expected a JSON object, got {}",
                type_name(&other)
            )))
        }
    };

    // The API reports auth and query problems as a 200 with a `code` field.
    if let Some(code) = obj.get(KEY_ERROR_CODE) {
        return Err(BotError::RemoteApi {
            code: value_text(code),
            message: api_message(&obj),
        });
    }

    let homeworks = obj
        .remove(KEY_HOMEWORKS)
        .ok_or(BotError::MissingField(KEY_HOMEWORKS))?;
    let current_date = obj
        .get(KEY_CURRENT_DATE)
        .ok_or(BotError::MissingField(KEY_CURRENT_DATE))?
        .as_i64();

    let homeworks = match homeworks {
        Value::Array(items) => items,
        other => {
            return Err(BotError::Shape(format!(
                "`{KEY_HOMEWORKS}` must be a list, got {}",
                type_name(&other)
            )))
        }
    };

    Ok(StatusBatch {
        homeworks,
        current_date,
    })
}

fn api_message(obj: &Map<String, Value>) -> String {
    ["message", "error"]
        .iter()
        .find_map(|k| obj.get(*k))
        .map(value_text)
        .unwrap_or_default()
}

fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
