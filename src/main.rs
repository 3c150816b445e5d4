//! Homework status bot — binary entrypoint.
//! Polls the review API every few minutes and forwards status changes to Telegram.

use homework_status_bot::{app, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when the file is absent.
    let _ = dotenvy::dotenv();
    telemetry::init_logging();
    telemetry::init_metrics_from_env()?;

    app::run_from_env().await
}
