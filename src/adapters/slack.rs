use crate::domain::ports::{ChatClient, ConfigProvider};
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Slack Web API client, `chat.postMessage` only.
pub struct SlackWebClient {
    client: Client,
    api_url: String,
    token: String,
}

#[derive(Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SlackResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

impl SlackWebClient {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            token: token.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.slack_api_url(), config.bot_token())
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), method)
    }
}

#[async_trait]
impl ChatClient for SlackWebClient {
    async fn post_message(&self, channel: &str, text: &str) -> Result<()> {
        if self.token.is_empty() {
            return Err(BotError::MissingConfigError {
                field: "SLACK_BOT_TOKEN".to_string(),
            });
        }

        let url = self.method_url("chat.postMessage");
        tracing::debug!("Posting message to channel {}", channel);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&PostMessage { channel, text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BotError::UpstreamStatusError {
                url,
                status: status.as_u16(),
            });
        }

        // Slack reports logical failures with HTTP 200 and `ok: false`.
        let body: SlackResponse = response.json().await?;
        if !body.ok {
            return Err(BotError::SlackApiError {
                message: body.error.unwrap_or_else(|| "unknown_error".to_string()),
            });
        }

        Ok(())
    }
}
