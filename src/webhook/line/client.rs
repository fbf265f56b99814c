//! # LINE Messaging API Client
//!
//! Reads data the webhook body does not carry: sender profiles and the bytes
//! of image and video messages.

use super::{
    models::{MediaRef, SourceKind},
    schemas::Profile,
};
use crate::config;
use anyhow::{Context, Result};
use async_trait::async_trait;

/// Downloaded media bytes with the content type the server reported
#[derive(Debug, Clone)]
pub struct MediaContent {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagingApi: Send + Sync {
    /// Looks up the profile of `user_id` as seen from the conversation `source_id`
    async fn get_profile(
        &self,
        source_kind: SourceKind,
        source_id: &str,
        user_id: &str,
    ) -> Result<Profile>;

    /// Downloads the content of an image or video message
    async fn get_content(&self, media: &MediaRef) -> Result<MediaContent>;
}

pub type ImplMessagingApi = Box<dyn MessagingApi>;

/// LINE API client authenticated with the channel access token
pub struct LineClient {
    /// HTTP client for making API requests
    client: reqwest::Client,
    /// Messaging API base url, e.g. `https://api.line.me/v2/bot`
    api_base_url: String,
    /// Content API base url, e.g. `https://api-data.line.me/v2/bot`
    data_api_base_url: String,
    /// Channel access token
    access_token: String,
}

impl LineClient {
    pub fn new(app_config: &config::AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base_url: app_config.line_api_base_url.trim_end_matches('/').to_string(),
            data_api_base_url: app_config
                .line_data_api_base_url
                .trim_end_matches('/')
                .to_string(),
            access_token: app_config.line_channel_access_token.clone(),
        }
    }

    /// Group and room members are only visible through the member endpoints
    fn profile_endpoint(&self, source_kind: SourceKind, source_id: &str, user_id: &str) -> String {
        match source_kind {
            SourceKind::Individual => format!("{}/profile/{}", self.api_base_url, user_id),
            SourceKind::Group => format!(
                "{}/group/{}/member/{}",
                self.api_base_url, source_id, user_id
            ),
            SourceKind::Room => format!(
                "{}/room/{}/member/{}",
                self.api_base_url, source_id, user_id
            ),
        }
    }

    fn content_endpoint(&self, message_id: &str) -> String {
        format!("{}/message/{}/content", self.data_api_base_url, message_id)
    }
}

#[async_trait]
impl MessagingApi for LineClient {
    async fn get_profile(
        &self,
        source_kind: SourceKind,
        source_id: &str,
        user_id: &str,
    ) -> Result<Profile> {
        let response = self
            .client
            .get(self.profile_endpoint(source_kind, source_id, user_id))
            .bearer_auth(&self.access_token)
            .send()
            .await
            .context("Failed to send request to LINE profile API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());

            anyhow::bail!("LINE profile API returned error status {}: {}", status, body);
        }

        response
            .json::<Profile>()
            .await
            .context("Failed to parse LINE profile response")
    }

    async fn get_content(&self, media: &MediaRef) -> Result<MediaContent> {
        let request = match media {
            MediaRef::Platform { message_id } => self
                .client
                .get(self.content_endpoint(message_id))
                .bearer_auth(&self.access_token),
            MediaRef::External { url } => self.client.get(url),
        };

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to download media content {:?}", media))?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("LINE content download returned error status {}", status);
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .context("Failed to read media content body")?;

        Ok(MediaContent {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}
