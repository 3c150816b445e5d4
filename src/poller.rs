//! # Poll loop
//! fetch → validate → extract → notify → sleep, forever.
//!
//! Cycles are strictly sequential. A failed cycle never ends the loop:
//! delivery failures are only logged, every other failure is forwarded to
//! the chat once per distinct error text. The cursor moves only when a
//! cycle completes.

use std::future::Future;
use std::time::Duration;

use crate::error::{BotError, ErrorClass, Result};
use crate::notify::{MessageSink, Notifier, SendOutcome};
use crate::review::{extract_message, validate, HomeworkSource};
use crate::telemetry;

pub const DIAGNOSTIC_PREFIX: &str = "Сбой в работе программы: ";

/// The two scalars carried from one cycle to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopState {
    /// `from_date` for the next fetch, unix seconds.
    pub cursor: i64,
    /// Last diagnostic that actually reached the chat.
    pub last_error: Option<String>,
}

impl LoopState {
    pub fn starting_at(cursor: i64) -> Self {
        Self {
            cursor,
            last_error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The API had nothing newer than the cursor.
    NoUpdates,
    Sent,
    /// Newest status equals the last message sent.
    Unchanged,
    Failed { error: BotError, reported: bool },
}

pub struct Poller<A, S> {
    source: A,
    notifier: Notifier<S>,
    retry: Duration,
}

impl<A: HomeworkSource, S: MessageSink> Poller<A, S> {
    pub fn new(source: A, sink: S, retry: Duration) -> Self {
        telemetry::ensure_metrics_described();
        Self {
            source,
            notifier: Notifier::new(sink),
            retry,
        }
    }

    pub fn notifier(&self) -> &Notifier<S> {
        &self.notifier
    }

    pub fn retry_interval(&self) -> Duration {
        self.retry
    }

    /// Run one cycle and fold its result into the next state.
    pub async fn poll_once(&mut self, state: LoopState) -> (LoopState, CycleOutcome) {
        telemetry::record_poll();

        match self.cycle(state.cursor).await {
            Ok((cursor, outcome)) => {
                telemetry::record_cursor(cursor);
                (LoopState::starting_at(cursor), outcome)
            }
            Err(error) => self.handle_failure(state, error).await,
        }
    }

    async fn cycle(&mut self, cursor: i64) -> Result<(i64, CycleOutcome)> {
        let raw = self.source.fetch(cursor).await?;
        let batch = validate(raw)?;
        let next_cursor = batch.current_date.unwrap_or(cursor);

        let Some(newest) = batch.newest() else {
            tracing::debug!(cursor, "no homework updates");
            return Ok((next_cursor, CycleOutcome::NoUpdates));
        };

        let message = extract_message(newest)?;
        let outcome = match self.notifier.notify(&message).await? {
            SendOutcome::Sent => {
                telemetry::record_sent();
                CycleOutcome::Sent
            }
            SendOutcome::Unchanged => CycleOutcome::Unchanged,
        };
        Ok((next_cursor, outcome))
    }

    async fn handle_failure(&mut self, state: LoopState, error: BotError) -> (LoopState, CycleOutcome) {
        telemetry::record_error(error.kind());

        match error.class() {
            ErrorClass::CycleLocal | ErrorClass::Fatal => {
                tracing::error!(severity = "critical", error = %error, "poll cycle failed");
                (
                    state,
                    CycleOutcome::Failed {
                        error,
                        reported: false,
                    },
                )
            }
            ErrorClass::Reportable => {
                tracing::error!(error = %error, "poll cycle failed");
                let text = format!("{DIAGNOSTIC_PREFIX}{error}");

                if state.last_error.as_deref() == Some(text.as_str()) {
                    tracing::debug!("same error already reported");
                    return (
                        state,
                        CycleOutcome::Failed {
                            error,
                            reported: false,
                        },
                    );
                }

                let reported = match self.notifier.notify(&text).await {
                    Ok(SendOutcome::Sent) => {
                        telemetry::record_sent();
                        true
                    }
                    Ok(SendOutcome::Unchanged) => false,
                    Err(send_err) => {
                        tracing::error!(
                            severity = "critical",
                            error = %send_err,
                            "failed to deliver error report"
                        );
                        return (
                            state,
                            CycleOutcome::Failed {
                                error,
                                reported: false,
                            },
                        );
                    }
                };

                let next = LoopState {
                    last_error: Some(text),
                    ..state
                };
                (next, CycleOutcome::Failed { error, reported })
            }
        }
    }

    /// Poll, sleep, repeat until `shutdown` resolves. Shutdown is only
    /// observed between cycles.
    pub async fn run<F>(mut self, mut state: LoopState, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tracing::info!(
            cursor = state.cursor,
            retry_secs = self.retry.as_secs(),
            "homework poller started"
        );
        tokio::pin!(shutdown);

        loop {
            let (next, outcome) = self.poll_once(state).await;
            state = next;
            tracing::debug!(?outcome, cursor = state.cursor, "cycle finished");

            tokio::select! {
                _ = tokio::time::sleep(self.retry) => {}
                _ = &mut shutdown => {
                    tracing::info!("shutdown requested, poller stopping");
                    return;
                }
            }
        }
    }
}
