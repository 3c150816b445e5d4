// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod app;
pub mod config;
pub mod error;
pub mod notify;
pub mod poller;
pub mod review;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::error::{BotError, ErrorClass};
pub use crate::notify::{MessageSink, Notifier, SendOutcome};
pub use crate::poller::{CycleOutcome, LoopState, Poller};
pub use crate::review::HomeworkSource;
