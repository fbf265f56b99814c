pub mod slack;

use async_trait::async_trait;

/// Binary media uploaded together with a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub title: String,
    pub content_type: Option<String>,
}

/// A message for the team chat, built once per relayed event and sent once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundNotification {
    pub text_body: String,
    pub attachment: Option<Attachment>,
}

impl OutboundNotification {
    pub fn text(text_body: String) -> Self {
        Self {
            text_body,
            attachment: None,
        }
    }

    pub fn with_attachment(text_body: String, attachment: Attachment) -> Self {
        Self {
            text_body,
            attachment: Some(attachment),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatNotifier: Send + Sync {
    /// Sends text-only notifications as a plain message, attachments as a file upload
    async fn deliver(&self, notification: &OutboundNotification) -> anyhow::Result<()>;
}

pub type ImplChatNotifier = Box<dyn ChatNotifier>;
