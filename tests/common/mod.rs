// tests/common/mod.rs
#![allow(dead_code)]

use homework_status_bot::error::Result;
use homework_status_bot::{BotError, HomeworkSource, MessageSink};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Replays scripted API answers and records every `from_date` asked for.
/// When the script runs out it keeps answering "no updates".
#[derive(Clone, Default)]
pub struct ScriptedSource {
    answers: Arc<Mutex<VecDeque<Result<Value>>>>,
    pub calls: Arc<Mutex<Vec<i64>>>,
}

impl ScriptedSource {
    pub fn new(answers: Vec<Result<Value>>) -> Self {
        Self {
            answers: Arc::new(Mutex::new(answers.into())),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<i64> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HomeworkSource for ScriptedSource {
    async fn fetch(&self, from_date: i64) -> Result<Value> {
        self.calls.lock().unwrap().push(from_date);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(serde_json::json!({"homeworks": [], "current_date": from_date})))
    }
}

/// Collects sent texts; can be switched to fail every send.
#[derive(Clone, Default)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<String>>>,
    failing: Arc<AtomicBool>,
    pub attempts: Arc<Mutex<usize>>,
}

impl RecordingSink {
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl MessageSink for RecordingSink {
    async fn send(&self, text: &str) -> Result<()> {
        *self.attempts.lock().unwrap() += 1;
        if self.failing.load(Ordering::SeqCst) {
            return Err(BotError::Delivery("Bad Request: chat not found".into()));
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub fn homework(name: &str, status: &str, current_date: i64) -> Value {
    serde_json::json!({
        "homeworks": [{"homework_name": name, "status": status}],
        "current_date": current_date
    })
}
