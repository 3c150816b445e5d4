//! Error taxonomy for the bot.
//!
//! Every failure is a [`BotError`]; the control loop only ever looks at
//! [`BotError::class`] to decide whether to stop, log, or report.

use std::fmt;

/// How a failure propagates out of a poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Halts the process before the loop starts.
    Fatal,
    /// Logged as critical, never forwarded to the chat.
    CycleLocal,
    /// Logged and forwarded to the chat as a diagnostic (deduplicated).
    Reportable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotError {
    /// Required credentials are missing at startup.
    Configuration { missing: Vec<&'static str> },
    /// The review API could not be reached at all.
    Transport {
        endpoint: String,
        from_date: i64,
        cause: String,
    },
    /// The review API answered with something other than 200.
    RemoteStatus { status: u16, body: String },
    /// The review API answered 200 but with an error code in the payload.
    RemoteApi { code: String, message: String },
    Shape(String),
    MissingField(&'static str),
    UnknownStatus(String),
    /// The Telegram send call failed or was not confirmed.
    Delivery(String),
}

impl BotError {
    pub fn class(&self) -> ErrorClass {
        match self {
            BotError::Configuration { .. } => ErrorClass::Fatal,
            BotError::Delivery(_) => ErrorClass::CycleLocal,
            _ => ErrorClass::Reportable,
        }
    }

    /// Short stable name, used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            BotError::Configuration { .. } => "configuration",
            BotError::Transport { .. } => "transport",
            BotError::RemoteStatus { .. } => "remote_status",
            BotError::RemoteApi { .. } => "remote_api",
            BotError::Shape(_) => "shape",
            BotError::MissingField(_) => "missing_field",
            BotError::UnknownStatus(_) => "unknown_status",
            BotError::Delivery(_) => "delivery",
        }
    }
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::Configuration { missing } => write!(
                f,
                "missing required environment variables: {}",
                missing.join(", ")
            ),
            BotError::Transport {
                endpoint,
                from_date,
                cause,
            } => write!(
                f,
                "request to {endpoint} with from_date={from_date} failed: {cause}"
            ),
            BotError::RemoteStatus { status, body } => {
                write!(f, "API answered with HTTP {status}: {body}")
            }
            BotError::RemoteApi { code, message } => {
                write!(f, "API reported error {code}: {message}")
            }
            BotError::Shape(what) => write!(f, "unexpected response shape: {what}"),
            BotError::MissingField(key) => write!(f, "response is missing key `{key}`"),
            BotError::UnknownStatus(status) => {
                write!(f, "unknown homework status `{status}`")
            }
            BotError::Delivery(cause) => write!(f, "telegram delivery failed: {cause}"),
        }
    }
}

impl std::error::Error for BotError {}

pub type Result<T> = std::result::Result<T, BotError>;
