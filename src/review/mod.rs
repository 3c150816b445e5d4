// src/review/mod.rs
//! Homework review API: fetching, payload validation and status wording.

pub mod client;
pub mod status;
pub mod validate;

use serde_json::Value;

use crate::error::Result;

pub use client::PracticumClient;
pub use status::{extract_message, verdict_for, HomeworkStatus};
pub use validate::{validate, StatusBatch};

/// Anything that can answer "what changed since `from_date`" with a raw JSON body.
#[async_trait::async_trait]
pub trait HomeworkSource: Send + Sync {
    async fn fetch(&self, from_date: i64) -> Result<Value>;
}
