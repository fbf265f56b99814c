//! Slack message bodies and upload filenames for relayed LINE messages.

use super::{
    context::Context,
    models::{InboundEvent, MessageKind},
};
use crate::consts;

/// One line per field: bot tag and sender, message text, separator
pub fn format_text_message(context: &Context, text: &str) -> String {
    format!(
        "{tag} {name}\n{text}\n{separator}\n",
        tag = consts::BOT_TAG,
        name = context.display_name,
        separator = consts::MESSAGE_SEPARATOR,
    )
}

/// Comment posted with an uploaded image or video.
///
/// Group and room messages carry their `group_id`/`room_id` line, individual
/// chats carry no conversation id at all.
pub fn format_media_message(context: &Context) -> String {
    let mut lines = vec![
        format!("{} {}", consts::BOT_TAG, context.display_name),
        format!(
            "user_id: {}",
            context
                .sender_id
                .as_deref()
                .unwrap_or(consts::MISSING_ID_PLACEHOLDER)
        ),
        format!("talk: {}", context.conversation_kind.conversation_label()),
    ];

    if let (Some(field), Some(id)) = (
        context.conversation_kind.id_field(),
        context.conversation_id.as_deref(),
    ) {
        lines.push(format!("{field}: {id}"));
    }

    lines.push(consts::MESSAGE_SEPARATOR.to_string());

    let mut message = lines.join("\n");
    message.push('\n');
    message
}

/// `line_{kind}_{message_id}.{ext}`, e.g. `line_image_325708.jpg`
pub fn media_filename(event: &InboundEvent, content_type: Option<&str>) -> String {
    format!(
        "line_{kind}_{id}.{ext}",
        kind = event.message_kind.as_str(),
        id = event.message_id,
        ext = media_extension(event.message_kind, content_type),
    )
}

fn media_extension(kind: MessageKind, content_type: Option<&str>) -> &'static str {
    let mime = content_type
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_lowercase());

    match mime.as_deref() {
        Some("image/jpeg") | Some("image/jpg") => "jpg",
        Some("image/png") => "png",
        Some("image/gif") => "gif",
        Some("image/webp") => "webp",
        Some("video/mp4") => "mp4",
        Some("video/quicktime") => "mov",
        _ => match kind {
            MessageKind::Video => "mp4",
            _ => "jpg",
        },
    }
}
