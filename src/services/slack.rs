//! # Slack Notifier
//!
//! Text notifications go to the incoming webhook url. Media goes through the
//! Web API external upload flow: request an upload url, post the bytes to it,
//! then complete the upload into the target channel with the message as the
//! initial comment.

use super::{Attachment, OutboundNotification};
use crate::config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Common envelope of Slack Web API responses
#[derive(Debug, Deserialize)]
struct SlackApiResponse {
    ok: bool,
    error: Option<String>,
    /// Set by `files.getUploadURLExternal`
    upload_url: Option<String>,
    /// Set by `files.getUploadURLExternal`
    file_id: Option<String>,
}

impl SlackApiResponse {
    fn ensure_ok(self, method: &str) -> Result<Self> {
        if self.ok {
            return Ok(self);
        }

        anyhow::bail!(
            "Slack {} failed: {}",
            method,
            self.error.as_deref().unwrap_or("unknown_error")
        )
    }
}

#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct UploadedFile<'a> {
    id: &'a str,
    title: &'a str,
}

#[derive(Debug, Serialize)]
struct CompleteUploadRequest<'a> {
    files: Vec<UploadedFile<'a>>,
    channel_id: &'a str,
    initial_comment: &'a str,
}

/// Slack client posting to one incoming webhook and one upload channel
#[derive(Clone)]
pub struct SlackNotifier {
    client: reqwest::Client,
    /// Incoming webhook url for text messages
    webhook_url: String,
    /// Bot token with `files:write`
    bot_token: String,
    /// Channel receiving file uploads
    channel_id: String,
    /// Web API base url, e.g. `https://slack.com/api`
    api_base_url: String,
}

impl SlackNotifier {
    pub fn new(app_config: &config::AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: app_config.slack_web_hook_url.clone(),
            bot_token: app_config.slack_bot_token.clone(),
            channel_id: app_config.slack_channel_id.clone(),
            api_base_url: app_config.slack_api_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn method_endpoint(&self, method: &str) -> String {
        format!("{}/{}", self.api_base_url, method)
    }

    async fn post_webhook(&self, text: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&WebhookMessage { text })
            .send()
            .await
            .context("Failed to send request to Slack incoming webhook")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());

            anyhow::bail!("Slack webhook returned error status {}: {}", status, body);
        }

        Ok(())
    }

    async fn upload_file(&self, text: &str, attachment: &Attachment) -> Result<()> {
        const GET_UPLOAD_URL: &str = "files.getUploadURLExternal";
        const COMPLETE_UPLOAD: &str = "files.completeUploadExternal";

        let length = attachment.bytes.len().to_string();
        let upload = self
            .client
            .post(self.method_endpoint(GET_UPLOAD_URL))
            .bearer_auth(&self.bot_token)
            .form(&[
                ("filename", attachment.filename.as_str()),
                ("length", length.as_str()),
            ])
            .send()
            .await
            .context("Failed to request Slack upload url")?
            .json::<SlackApiResponse>()
            .await
            .context("Failed to parse Slack upload url response")?
            .ensure_ok(GET_UPLOAD_URL)?;

        let (Some(upload_url), Some(file_id)) = (upload.upload_url, upload.file_id) else {
            anyhow::bail!("Slack {} response is missing upload_url or file_id", GET_UPLOAD_URL);
        };

        let mut file_part = reqwest::multipart::Part::bytes(attachment.bytes.clone())
            .file_name(attachment.filename.clone());
        if let Some(mime_type) = attachment.content_type.as_deref() {
            file_part = file_part.mime_str(mime_type)?;
        }

        let response = self
            .client
            .post(&upload_url)
            .multipart(reqwest::multipart::Form::new().part("file", file_part))
            .send()
            .await
            .context("Failed to upload file bytes to Slack")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Slack file upload returned error status {}",
                response.status()
            );
        }

        let request = CompleteUploadRequest {
            files: vec![UploadedFile {
                id: &file_id,
                title: &attachment.title,
            }],
            channel_id: &self.channel_id,
            initial_comment: text,
        };

        self.client
            .post(self.method_endpoint(COMPLETE_UPLOAD))
            .bearer_auth(&self.bot_token)
            .json(&request)
            .send()
            .await
            .context("Failed to complete Slack upload")?
            .json::<SlackApiResponse>()
            .await
            .context("Failed to parse Slack complete upload response")?
            .ensure_ok(COMPLETE_UPLOAD)?;

        Ok(())
    }
}

#[async_trait]
impl super::ChatNotifier for SlackNotifier {
    async fn deliver(&self, notification: &OutboundNotification) -> Result<()> {
        match &notification.attachment {
            None => self.post_webhook(&notification.text_body).await,
            Some(attachment) => {
                self.upload_file(&notification.text_body, attachment)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slack_api_response_ok() {
        let response: SlackApiResponse = serde_json::from_str(
            r#"{"ok":true,"upload_url":"https://files.slack.com/upload/v1/abc","file_id":"F123"}"#,
        )
        .unwrap();

        let response = response.ensure_ok("files.getUploadURLExternal").unwrap();
        assert_eq!(response.file_id.as_deref(), Some("F123"));
    }

    #[test]
    fn test_slack_api_response_error_carries_code() {
        let response: SlackApiResponse =
            serde_json::from_str(r#"{"ok":false,"error":"not_in_channel"}"#).unwrap();

        let err = response
            .ensure_ok("files.completeUploadExternal")
            .unwrap_err();
        assert!(err.to_string().contains("not_in_channel"));
    }

    #[test]
    fn test_complete_upload_request_shape() {
        let request = CompleteUploadRequest {
            files: vec![UploadedFile {
                id: "F123",
                title: "line_image_1.jpg",
            }],
            channel_id: "C0123456789",
            initial_comment: "[bot-line] Alice\n",
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "files": [{"id": "F123", "title": "line_image_1.jpg"}],
                "channel_id": "C0123456789",
                "initial_comment": "[bot-line] Alice\n"
            })
        );
    }

    #[test]
    fn test_method_endpoint() {
        let mut app_config = config::test_config();
        app_config.slack_api_base_url = "https://slack.com/api/".into();
        let notifier = SlackNotifier::new(&app_config);

        assert_eq!(
            notifier.method_endpoint("files.completeUploadExternal"),
            "https://slack.com/api/files.completeUploadExternal"
        );
    }
}
