//! Status code → verdict wording.
//!
//! The table is closed: a code outside it is an error, never a default.

use serde_json::Value;

use super::validate::type_name;
use crate::error::{BotError, Result};

pub const KEY_HOMEWORK_NAME: &str = "homework_name";
pub const KEY_STATUS: &str = "status";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Verdict sentence for a raw status code, if the code is known.
pub fn verdict_for(code: &str) -> Option<&'static str> {
    HomeworkStatus::parse(code).map(HomeworkStatus::verdict)
}

/// Build the chat message for one homework record.
pub fn extract_message(record: &Value) -> Result<String> {
    let obj = record.as_object().ok_or_else(|| {
        BotError::Shape(format!(
            "homework record must be an object, got {}",
            type_name(record)
        ))
    })?;

    let name = obj
        .get(KEY_HOMEWORK_NAME)
        .ok_or(BotError::MissingField(KEY_HOMEWORK_NAME))?;
    let name = name.as_str().ok_or_else(|| {
        BotError::Shape(format!(
            "`{KEY_HOMEWORK_NAME}` must be a string, got {}",
            type_name(name)
        ))
    })?;

    let status = obj
        .get(KEY_STATUS)
        .ok_or(BotError::MissingField(KEY_STATUS))?;
    let status = match status {
        Value::String(code) => HomeworkStatus::parse(code)
            .ok_or_else(|| BotError::UnknownStatus(code.clone()))?,
        other => return Err(BotError::UnknownStatus(other.to_string())),
    };

    Ok(format_message(name, status))
}

pub fn format_message(name: &str, status: HomeworkStatus) -> String {
    format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    )
}
