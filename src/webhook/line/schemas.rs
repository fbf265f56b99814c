//! # LINE Webhook Schemas
//!
//! Data structures for the LINE Messaging API: the webhook body LINE posts to
//! the callback url and the profile objects returned by the profile endpoints.
//! Only the fields the relay reads are modeled, unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// Root webhook payload from LINE
#[derive(Debug, Deserialize, Serialize)]
pub struct WebhookPayload {
    /// User ID of the bot that should receive the events
    #[serde(default)]
    pub destination: String,
    /// Events delivered in this call, empty for the console "verify" request
    pub events: Vec<Event>,
}

/// Webhook event object
#[derive(Debug, Deserialize, Serialize)]
pub struct Event {
    /// Event type (message, follow, join, postback, ...)
    #[serde(rename = "type")]
    pub event_type: String,
    /// Milliseconds since epoch
    #[serde(default)]
    pub timestamp: i64,
    /// Where the event happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    /// Message content (if type is "message")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    /// Unique event id, stable across redeliveries
    #[serde(rename = "webhookEventId", skip_serializing_if = "Option::is_none")]
    pub webhook_event_id: Option<String>,
}

/// Event source: a 1:1 chat, a group chat or a multi-person room
#[derive(Debug, Deserialize, Serialize)]
pub struct Source {
    /// Source type: user, group or room
    #[serde(rename = "type")]
    pub source_type: String,
    /// Sender user ID, may be absent in groups and rooms
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Group ID (if type is "group")
    #[serde(rename = "groupId", skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Room ID (if type is "room")
    #[serde(rename = "roomId", skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
}

/// Message object
#[derive(Debug, Deserialize, Serialize)]
pub struct Message {
    /// Message ID, also the key to download its content
    pub id: String,
    /// Message type (text, image, video, audio, file, sticker, ...)
    #[serde(rename = "type")]
    pub msg_type: String,
    /// Text body (if type is "text")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Where the media is hosted (image, video, audio)
    #[serde(rename = "contentProvider", skip_serializing_if = "Option::is_none")]
    pub content_provider: Option<ContentProvider>,
}

/// Media hosting information
#[derive(Debug, Deserialize, Serialize)]
pub struct ContentProvider {
    /// "line" when LINE hosts the bytes, "external" otherwise
    #[serde(rename = "type")]
    pub provider_type: String,
    /// Media url (if type is "external")
    #[serde(rename = "originalContentUrl", skip_serializing_if = "Option::is_none")]
    pub original_content_url: Option<String>,
}

/// User profile returned by the profile and group/room member endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Display name
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// User ID
    #[serde(rename = "userId", default)]
    pub user_id: String,
    /// Profile image url
    #[serde(rename = "pictureUrl", skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
}
