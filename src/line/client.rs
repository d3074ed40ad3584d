//! LINE Messaging API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::LineError;
use crate::bot::ports::Messenger;

/// Profile fields the bot reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Profile {
    display_name: String,
}

/// HTTP client for the LINE Messaging API.
#[derive(Debug, Clone)]
pub struct LineClient {
    http: Client,
    access_token: String,
    api_base: String,
    data_api_base: String,
}

impl LineClient {
    /// Create a client authenticating with the channel access token.
    ///
    /// `timeout` bounds every request so a slow platform cannot pin
    /// webhook handlers.
    pub fn new(
        access_token: impl Into<String>,
        api_base: &str,
        data_api_base: &str,
        timeout: Duration,
    ) -> Result<Self, LineError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            access_token: access_token.into(),
            api_base: api_base.trim_end_matches('/').to_string(),
            data_api_base: data_api_base.trim_end_matches('/').to_string(),
        })
    }

    async fn check(response: Response) -> Result<Response, LineError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(LineError::Status { status, body })
    }

    /// Reply to an event with a single text message.
    pub async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), LineError> {
        let url = format!("{}/v2/bot/message/reply", self.api_base);
        let body = json!({
            "replyToken": reply_token,
            "messages": [{ "type": "text", "text": text }],
        });

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;

        debug!("Replied with {} chars", text.chars().count());
        Ok(())
    }

    /// Fetch a user's display name.
    pub async fn get_display_name(&self, user_id: &str) -> Result<String, LineError> {
        let url = format!("{}/v2/bot/profile/{}", self.api_base, user_id);

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let profile: Profile = Self::check(response).await?.json().await?;

        Ok(profile.display_name)
    }

    /// Download the binary content of a message (images, video, ...).
    pub async fn get_message_content(&self, message_id: &str) -> Result<Vec<u8>, LineError> {
        let url = format!("{}/v2/bot/message/{}/content", self.data_api_base, message_id);

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let bytes = Self::check(response).await?.bytes().await?;

        debug!("Downloaded {} bytes for message {}", bytes.len(), message_id);
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Messenger for LineClient {
    async fn reply(&self, reply_token: &str, text: &str) -> anyhow::Result<()> {
        Ok(self.reply_text(reply_token, text).await?)
    }

    async fn display_name(&self, user_id: &str) -> anyhow::Result<String> {
        Ok(self.get_display_name(user_id).await?)
    }

    async fn download_content(&self, message_id: &str) -> anyhow::Result<Vec<u8>> {
        Ok(self.get_message_content(message_id).await?)
    }
}
