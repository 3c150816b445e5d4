// src/app.rs
//! Startup wiring: credentials → clients → poller.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::config::{Credentials, Settings};
use crate::error::BotError;
use crate::notify::TelegramSink;
use crate::poller::{LoopState, Poller};
use crate::review::PracticumClient;

pub type LivePoller = Poller<PracticumClient, TelegramSink>;

/// Build the live poller and its starting state. Credentials are checked
/// before any network-facing component exists.
pub fn build(
    credentials: Result<Credentials, BotError>,
    settings: &Settings,
) -> Result<(LivePoller, LoopState)> {
    let creds = credentials.inspect_err(|e| {
        tracing::error!(severity = "critical", error = %e, "cannot start without credentials");
    })?;

    let source = PracticumClient::new(
        settings.endpoint.clone(),
        &creds.practicum_token,
        settings.request_timeout(),
    )
    .context("building review API client")?;
    let sink = TelegramSink::new(
        &settings.telegram_api_base,
        &creds.telegram_token,
        creds.chat_id.clone(),
    )
    .with_timeout(settings.request_timeout());

    let cursor = settings.initial_cursor.resolve(Utc::now().timestamp());
    tracing::info!(
        endpoint = source.endpoint(),
        chat_id = %creds.chat_id,
        cursor,
        "bot configured"
    );

    let poller = Poller::new(source, sink, settings.retry_interval());
    Ok((poller, LoopState::starting_at(cursor)))
}

/// Process entry: load settings and credentials, then poll until Ctrl-C.
pub async fn run_from_env() -> Result<()> {
    let settings = Settings::load_default()?;
    let (poller, state) = build(Credentials::from_env(), &settings)?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for ctrl-c; running until killed");
            std::future::pending::<()>().await;
        }
    };
    poller.run(state, shutdown).await;
    Ok(())
}
