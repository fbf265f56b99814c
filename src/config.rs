//! Application configuration loaded from the environment.
//!
//! Every credential the relay needs is read once at startup. A missing
//! required variable stops the process before the server binds.
//!
//! # Security Notes
//! - Sensitive fields are clearly marked and should never be logged

use anyhow::Context;
use envconfig::Envconfig;
use std::sync::OnceLock;

/// Environment variables used to configure the relay.
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name (NON-SENSITIVE)
    /// Values: "local", "dev", "prod"; only reported in logs
    #[envconfig(default = "local")]
    pub env: String,

    /// Host address for web server binding (NON-SENSITIVE)
    #[envconfig(default = "0.0.0.0")]
    pub web_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    #[envconfig(from = "PORT", default = "5000")]
    pub web_server_port: u16,

    /// 🔒 SENSITIVE: LINE channel access token, sent as bearer token to the Messaging API
    pub line_channel_access_token: String,

    /// 🔒 SENSITIVE: LINE channel secret, key of the webhook signature
    pub line_channel_secret: String,

    /// 🔒 SENSITIVE: Slack incoming webhook url for text notifications
    pub slack_web_hook_url: String,

    /// 🔒 SENSITIVE: Slack bot OAuth token with `files:write`
    pub slack_bot_token: String,

    /// Slack channel receiving media uploads (NON-SENSITIVE)
    /// Example: "C0123456789"
    pub slack_channel_id: String,

    /// LINE Messaging API base url (NON-SENSITIVE)
    #[envconfig(default = "https://api.line.me/v2/bot")]
    pub line_api_base_url: String,

    /// LINE content API base url (NON-SENSITIVE)
    #[envconfig(default = "https://api-data.line.me/v2/bot")]
    pub line_data_api_base_url: String,

    /// Slack Web API base url (NON-SENSITIVE)
    #[envconfig(default = "https://slack.com/api")]
    pub slack_api_base_url: String,
}

impl AppConfig {
    /// Address the web server binds to
    pub fn server_addr(&self) -> (String, u16) {
        (self.web_server_host.clone(), self.web_server_port)
    }
}

/// Global application configuration, set once by [`init_config`].
pub static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Loads [`AppConfig`] from the environment into [`APP_CONFIG`].
///
/// Fails when a required variable is missing or a value cannot be parsed.
pub fn init_config() -> anyhow::Result<()> {
    let app_config = AppConfig::init_from_env()
        .context("failed to load configuration, check required environment variables")?;

    APP_CONFIG
        .set(app_config)
        .map_err(|_| anyhow::anyhow!("configuration was already initialized"))
}

#[cfg(test)]
pub(crate) fn test_config() -> AppConfig {
    AppConfig {
        env: "local".into(),
        web_server_host: "127.0.0.1".into(),
        web_server_port: 5000,
        line_channel_access_token: "line-token".into(),
        line_channel_secret: "line-secret".into(),
        slack_web_hook_url: "https://hooks.slack.com/services/T000/B000/XXX".into(),
        slack_bot_token: "xoxb-test".into(),
        slack_channel_id: "C0123456789".into(),
        line_api_base_url: "https://api.line.me/v2/bot".into(),
        line_data_api_base_url: "https://api-data.line.me/v2/bot".into(),
        slack_api_base_url: "https://slack.com/api".into(),
    }
}
