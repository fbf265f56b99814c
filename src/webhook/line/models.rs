//! Relay-side view of a LINE message event.

use super::schemas;

/// Kind of conversation a message was sent in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Individual,
    Group,
    Room,
}

impl SourceKind {
    /// Label shown on the `talk:` line of media notifications
    pub fn conversation_label(&self) -> &'static str {
        match self {
            SourceKind::Individual => "personal",
            SourceKind::Group => "group",
            SourceKind::Room => "multitalk",
        }
    }

    /// Name of the id field printed for this conversation, individual chats have none
    pub fn id_field(&self) -> Option<&'static str> {
        match self {
            SourceKind::Individual => None,
            SourceKind::Group => Some("group_id"),
            SourceKind::Room => Some("room_id"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    Image,
    Video,
    Unsupported,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Image => "image",
            MessageKind::Video => "video",
            MessageKind::Unsupported => "unsupported",
        }
    }
}

/// Where the bytes of an image or video can be downloaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaRef {
    /// Hosted by LINE, fetched from the content endpoint with the message id
    Platform { message_id: String },
    /// Hosted by a third party, fetched from the original content url
    External { url: String },
}

/// A single inbound message, built per webhook call and dropped after handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub source_kind: SourceKind,
    /// User id for individual chats, group id for groups, room id for rooms
    pub source_id: String,
    pub sender_id: Option<String>,
    pub message_kind: MessageKind,
    pub message_id: String,
    pub text: Option<String>,
    pub media_ref: Option<MediaRef>,
}

impl InboundEvent {
    /// Builds an [`InboundEvent`] from a webhook event.
    ///
    /// Returns `None` for non-message events and for sources missing the id
    /// their type requires. Message types other than text, image and video are
    /// kept as [`MessageKind::Unsupported`] so the dispatcher decides to skip them.
    pub fn from_webhook_event(event: &schemas::Event) -> Option<Self> {
        if event.event_type != "message" {
            return None;
        }

        let source = event.source.as_ref()?;
        let message = event.message.as_ref()?;

        let (source_kind, source_id) = match source.source_type.as_str() {
            "user" => (SourceKind::Individual, source.user_id.clone()?),
            "group" => (SourceKind::Group, source.group_id.clone()?),
            "room" => (SourceKind::Room, source.room_id.clone()?),
            _ => return None,
        };

        let message_kind = match message.msg_type.as_str() {
            "text" if message.text.is_some() => MessageKind::Text,
            "image" => MessageKind::Image,
            "video" => MessageKind::Video,
            _ => MessageKind::Unsupported,
        };

        let media_ref = match message_kind {
            MessageKind::Image | MessageKind::Video => Some(media_ref(message)),
            _ => None,
        };

        Some(Self {
            source_kind,
            source_id,
            sender_id: source.user_id.clone(),
            message_kind,
            message_id: message.id.clone(),
            text: message.text.clone(),
            media_ref,
        })
    }
}

fn media_ref(message: &schemas::Message) -> MediaRef {
    let external_url = message
        .content_provider
        .as_ref()
        .filter(|provider| provider.provider_type == "external")
        .and_then(|provider| provider.original_content_url.clone());

    match external_url {
        Some(url) => MediaRef::External { url },
        None => MediaRef::Platform {
            message_id: message.id.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(json: &str) -> schemas::Event {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_individual_text_event() {
        let inbound = InboundEvent::from_webhook_event(&event(
            r#"{"type":"message","source":{"type":"user","userId":"U1"},"message":{"type":"text","id":"m1","text":"hello"}}"#,
        ))
        .unwrap();

        assert_eq!(inbound.source_kind, SourceKind::Individual);
        assert_eq!(inbound.source_id, "U1");
        assert_eq!(inbound.sender_id.as_deref(), Some("U1"));
        assert_eq!(inbound.message_kind, MessageKind::Text);
        assert_eq!(inbound.text.as_deref(), Some("hello"));
        assert!(inbound.media_ref.is_none());
    }

    #[test]
    fn test_room_id_read_from_room_field() {
        let inbound = InboundEvent::from_webhook_event(&event(
            r#"{"type":"message","source":{"type":"room","roomId":"R1","groupId":"G9","userId":"U1"},"message":{"type":"video","id":"m2"}}"#,
        ))
        .unwrap();

        assert_eq!(inbound.source_kind, SourceKind::Room);
        assert_eq!(inbound.source_id, "R1");
        assert_eq!(
            inbound.media_ref,
            Some(MediaRef::Platform {
                message_id: "m2".into()
            })
        );
    }

    #[test]
    fn test_group_without_user_id() {
        let inbound = InboundEvent::from_webhook_event(&event(
            r#"{"type":"message","source":{"type":"group","groupId":"G1"},"message":{"type":"image","id":"m3","contentProvider":{"type":"external","originalContentUrl":"https://example.com/x.png"}}}"#,
        ))
        .unwrap();

        assert_eq!(inbound.source_kind, SourceKind::Group);
        assert!(inbound.sender_id.is_none());
        assert_eq!(
            inbound.media_ref,
            Some(MediaRef::External {
                url: "https://example.com/x.png".into()
            })
        );
    }

    #[test]
    fn test_sticker_is_unsupported() {
        let inbound = InboundEvent::from_webhook_event(&event(
            r#"{"type":"message","source":{"type":"user","userId":"U1"},"message":{"type":"sticker","id":"m4","packageId":"1","stickerId":"1"}}"#,
        ))
        .unwrap();

        assert_eq!(inbound.message_kind, MessageKind::Unsupported);
    }

    #[test]
    fn test_non_message_events_are_skipped() {
        let follow = event(r#"{"type":"follow","source":{"type":"user","userId":"U1"}}"#);
        let bad_group = event(
            r#"{"type":"message","source":{"type":"group","userId":"U1"},"message":{"type":"text","id":"m5","text":"x"}}"#,
        );

        assert!(InboundEvent::from_webhook_event(&follow).is_none());
        assert!(InboundEvent::from_webhook_event(&bad_group).is_none());
    }
}
