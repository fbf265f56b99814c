//! # LINE Webhook Handler
//!
//! Turns a verified webhook payload into Slack notifications. Each message
//! event is routed by its message kind: text is relayed as a plain message,
//! images and videos are downloaded and relayed as file uploads, every other
//! kind is skipped without error.

use super::{
    client::ImplMessagingApi,
    context::resolve_context,
    format,
    models::{InboundEvent, MessageKind},
    schemas::WebhookPayload,
};
use crate::{
    metric,
    services::{Attachment, ImplChatNotifier, OutboundNotification},
};
use anyhow::{Context, Result};

/// What happened to one inbound event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOutcome {
    Delivered,
    Ignored,
}

/// Extracts the message events of a payload, dropping every other event type
pub fn inbound_events(payload: &WebhookPayload) -> Vec<InboundEvent> {
    payload
        .events
        .iter()
        .filter_map(InboundEvent::from_webhook_event)
        .collect::<Vec<_>>()
}

/// Relays a text message as a single text notification
pub async fn handle_text_message(
    event: &InboundEvent,
    line_client: &ImplMessagingApi,
    notifier: &ImplChatNotifier,
) -> Result<()> {
    let text = event
        .text
        .as_deref()
        .context("text message without text body")?;

    let context = resolve_context(event, line_client).await;
    let notification = OutboundNotification::text(format::format_text_message(&context, text));

    notifier
        .deliver(&notification)
        .await
        .context("Failed to deliver text notification")
}

/// Relays an image or video as a file upload.
///
/// The media is downloaded before anything is sent; when the download fails
/// the event produces no notification at all.
pub async fn handle_media_message(
    event: &InboundEvent,
    line_client: &ImplMessagingApi,
    notifier: &ImplChatNotifier,
) -> Result<()> {
    let media_ref = event
        .media_ref
        .as_ref()
        .context("media message without media reference")?;

    let content = line_client
        .get_content(media_ref)
        .await
        .with_context(|| format!("Failed to fetch content of message {}", event.message_id))?;

    let context = resolve_context(event, line_client).await;
    let filename = format::media_filename(event, content.content_type.as_deref());

    let notification = OutboundNotification::with_attachment(
        format::format_media_message(&context),
        Attachment {
            bytes: content.bytes,
            title: filename.clone(),
            filename,
            content_type: content.content_type,
        },
    );

    notifier
        .deliver(&notification)
        .await
        .context("Failed to deliver media notification")
}

/// Dispatches one event to the handler of its message kind
pub async fn handle_event(
    event: &InboundEvent,
    line_client: &ImplMessagingApi,
    notifier: &ImplChatNotifier,
) -> Result<HandleOutcome> {
    match event.message_kind {
        MessageKind::Text => handle_text_message(event, line_client, notifier).await?,
        MessageKind::Image | MessageKind::Video => {
            handle_media_message(event, line_client, notifier).await?
        }
        MessageKind::Unsupported => {
            logfire::debug!(
                "Skipping unsupported message {id}",
                id = event.message_id.clone()
            );
            return Ok(HandleOutcome::Ignored);
        }
    }

    Ok(HandleOutcome::Delivered)
}

/// Main webhook processor
///
/// Handles every message event of the payload in order. A failing event is
/// logged and does not stop the following ones.
pub async fn process_webhook(
    payload: &WebhookPayload,
    line_client: &ImplMessagingApi,
    notifier: &ImplChatNotifier,
) -> Result<()> {
    for event in inbound_events(payload) {
        let kind = event.message_kind.as_str();

        match handle_event(&event, line_client, notifier).await {
            Ok(HandleOutcome::Delivered) => metric::incr_relay_statds(kind, "sent"),
            Ok(HandleOutcome::Ignored) => metric::incr_relay_statds(kind, "ignored"),
            Err(e) => {
                logfire::error!(
                    "Failed to handle {kind} message: {error}",
                    kind = kind.to_string(),
                    error = format!("{e:#}")
                );
                metric::incr_relay_statds(kind, "failed");
            }
        }
    }

    Ok(())
}
