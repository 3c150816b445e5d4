//! Logging and metrics setup.

use anyhow::{Context, Result};
use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use once_cell::sync::OnceCell;
use std::net::SocketAddr;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const POLLS_TOTAL: &str = "homework_bot_polls_total";
pub const MESSAGES_SENT_TOTAL: &str = "homework_bot_messages_sent_total";
pub const CYCLE_ERRORS_TOTAL: &str = "homework_bot_cycle_errors_total";
pub const CURSOR: &str = "homework_bot_cursor";

/// `RUST_LOG` wins; otherwise `LOG_LEVEL` (default `info`).
/// `LOG_FORMAT=json` switches to JSON lines.
pub fn init_logging() {
    let filter = match std::env::var("RUST_LOG") {
        Ok(rust_log) => EnvFilter::new(rust_log),
        Err(_) => EnvFilter::new(
            std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "info".to_string())
                .to_lowercase(),
        ),
    };

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    let res = if json {
        registry.with(fmt::layer().json().with_target(false)).try_init()
    } else {
        registry.with(fmt::layer().compact().with_target(false)).try_init()
    };
    if res.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Install the Prometheus listener when `METRICS_ADDR` is set.
/// Must run inside the Tokio runtime.
pub fn init_metrics_from_env() -> Result<()> {
    let Ok(addr) = std::env::var("METRICS_ADDR") else {
        return Ok(());
    };
    let addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("METRICS_ADDR is not a socket address: {addr}"))?;
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("prometheus: install recorder")?;
    tracing::info!(%addr, "metrics listener started");
    Ok(())
}

/// One-time metrics registration (so series show up on /metrics).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(POLLS_TOTAL, "Poll cycles started.");
        describe_counter!(MESSAGES_SENT_TOTAL, "Messages confirmed by Telegram.");
        describe_counter!(
            CYCLE_ERRORS_TOTAL,
            "Poll cycles that ended in an error, by kind."
        );
        describe_gauge!(CURSOR, "Current from_date cursor (unix seconds).");
    });
}

pub(crate) fn record_poll() {
    counter!(POLLS_TOTAL).increment(1);
}

pub(crate) fn record_sent() {
    counter!(MESSAGES_SENT_TOTAL).increment(1);
}

pub(crate) fn record_error(kind: &'static str) {
    counter!(CYCLE_ERRORS_TOTAL, "kind" => kind).increment(1);
}

pub(crate) fn record_cursor(cursor: i64) {
    gauge!(CURSOR).set(cursor as f64);
}
