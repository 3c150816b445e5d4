// src/notify/mod.rs
pub mod telegram;

use crate::error::Result;

pub use telegram::TelegramSink;

/// Low-level send primitive: one text to the configured chat.
#[async_trait::async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    /// Same text as the last confirmed send; nothing went out.
    Unchanged,
}

/// Wraps a sink and suppresses consecutive duplicates.
/// - First message always goes out.
/// - A message equal to the last *confirmed* send is a no-op.
/// - State is updated only after the sink reports success.
pub struct Notifier<S> {
    sink: S,
    last_sent: Option<String>,
}

impl<S: MessageSink> Notifier<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            last_sent: None,
        }
    }

    pub async fn notify(&mut self, message: &str) -> Result<SendOutcome> {
        if self.last_sent.as_deref() == Some(message) {
            tracing::debug!("message unchanged, not sending");
            return Ok(SendOutcome::Unchanged);
        }

        tracing::info!(text = %message, "sending telegram message");
        self.sink.send(message).await?;
        tracing::info!(text = %message, "telegram message delivered");

        self.last_sent = Some(message.to_string());
        Ok(SendOutcome::Sent)
    }

    pub fn last_sent(&self) -> Option<&str> {
        self.last_sent.as_deref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
