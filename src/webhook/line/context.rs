//! Sender and conversation metadata for a message event.

use super::{
    client::ImplMessagingApi,
    models::{InboundEvent, SourceKind},
};
use crate::consts;

/// Who sent a message and where, derived per event and never stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub sender_id: Option<String>,
    /// Profile display name, [`consts::UNKNOWN_DISPLAY_NAME`] when the lookup fails
    pub display_name: String,
    pub conversation_kind: SourceKind,
    /// Group or room id, `None` for individual chats
    pub conversation_id: Option<String>,
}

/// Resolves the [`Context`] of an event.
///
/// A failed profile lookup is logged and replaced by the fallback name, it
/// never aborts the event.
pub async fn resolve_context(event: &InboundEvent, line_client: &ImplMessagingApi) -> Context {
    let display_name = match event.sender_id.as_deref() {
        Some(user_id) => match line_client
            .get_profile(event.source_kind, &event.source_id, user_id)
            .await
        {
            Ok(profile) => profile.display_name,
            Err(e) => {
                logfire::warn!(
                    "Profile lookup failed, using fallback name: {error}",
                    error = e.to_string()
                );
                consts::UNKNOWN_DISPLAY_NAME.to_string()
            }
        },
        None => consts::UNKNOWN_DISPLAY_NAME.to_string(),
    };

    let conversation_id = match event.source_kind {
        SourceKind::Individual => None,
        SourceKind::Group | SourceKind::Room => Some(event.source_id.clone()),
    };

    Context {
        sender_id: event.sender_id.clone(),
        display_name,
        conversation_kind: event.source_kind,
        conversation_id,
    }
}
