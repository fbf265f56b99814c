//! Webhook handlers for external integrations
//!
//! ## Modules
//!
//! - [`line`] - LINE Messaging API webhook relayed to Slack

pub mod line;
pub mod routes;

use crate::services;

/// Per-worker state shared by the webhook endpoints
pub struct AppState {
    /// 🔒 SENSITIVE: LINE channel secret used to verify request signatures
    pub channel_secret: String,
    pub line_client: line::client::ImplMessagingApi,
    pub notifier: services::ImplChatNotifier,
}
