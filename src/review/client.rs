use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use super::HomeworkSource;
use crate::error::{BotError, Result};

/// Keep diagnostic bodies short enough to fit a chat message.
const MAX_BODY_CHARS: usize = 300;

pub struct PracticumClient {
    endpoint: String,
    auth_header: String,
    client: Client,
}

impl PracticumClient {
    pub fn new(endpoint: impl Into<String>, token: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent("homework-status-bot/0.1")
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            auth_header: format!("OAuth {token}"),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl HomeworkSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value> {
        let transport = |cause: reqwest::Error| BotError::Transport {
            endpoint: self.endpoint.clone(),
            from_date,
            cause: cause.to_string(),
        };

        let resp = self
            .client
            .get(&self.endpoint)
            .header(header::AUTHORIZATION, &self.auth_header)
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(transport)?;

        if status != StatusCode::OK {
            return Err(BotError::RemoteStatus {
                status: status.as_u16(),
                body: truncate(body.trim(), MAX_BODY_CHARS),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| BotError::Shape(format!("response body is not valid JSON: {e}")))
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars).collect();
    out.push('…');
    out
}
