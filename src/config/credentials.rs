// src/config/credentials.rs
use std::fmt;

use crate::error::{BotError, Result};

pub const ENV_PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const ENV_TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// The three secrets the bot cannot run without.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat_id: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve every credential through `lookup`. Blank values count as absent,
    /// and the error lists all of the missing names, not just the first.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut take = |key: &'static str| -> String {
            match lookup(key).map(|v| v.trim().to_string()) {
                Some(v) if !v.is_empty() => v,
                _ => {
                    missing.push(key);
                    String::new()
                }
            }
        };

        let practicum_token = take(ENV_PRACTICUM_TOKEN);
        let telegram_token = take(ENV_TELEGRAM_TOKEN);
        let chat_id = take(ENV_TELEGRAM_CHAT_ID);

        if !missing.is_empty() {
            return Err(BotError::Configuration { missing });
        }
        Ok(Self {
            practicum_token,
            telegram_token,
            chat_id,
        })
    }
}

// Tokens must never end up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &format_args!("<{} chars>", self.practicum_token.len()))
            .field("telegram_token", &format_args!("<{} chars>", self.telegram_token.len()))
            .field("chat_id", &self.chat_id)
            .finish()
    }
}
