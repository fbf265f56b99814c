//! # LINE to Slack Relay
//!
//! Main entry point for the webhook relay. Loads configuration, sets up
//! logging and metrics, and serves the LINE webhook endpoint.

pub mod config;
pub mod consts;
pub mod errors;
pub mod metric;
pub mod server;
pub mod services;
pub mod webhook;

use anyhow::Context;
use logfire::config::{MetricsOptions, SendToLogfire};
use ntex::web;

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    // Missing credentials stop the process here, before anything binds
    config::init_config()?;

    let app_config = config::APP_CONFIG
        .get()
        .context("failed to get app config")?;

    // Logs and metrics only leave the process when LOGFIRE_TOKEN is set
    let shutdown_handler = logfire::configure()
        .install_panic_handler()
        .with_metrics(Some(MetricsOptions::default()))
        .send_to_logfire(SendToLogfire::IfTokenPresent)
        .finish()?;

    configure_and_run_server(app_config.clone()).await?;

    shutdown_handler.shutdown()?;

    Ok(())
}

/// Creates the per-worker application state from the configuration
fn create_app_state(app_config: &config::AppConfig) -> webhook::AppState {
    webhook::AppState {
        channel_secret: app_config.line_channel_secret.clone(),
        line_client: Box::new(webhook::line::client::LineClient::new(app_config)),
        notifier: Box::new(services::slack::SlackNotifier::new(app_config)),
    }
}

/// Configures and starts the web server
async fn configure_and_run_server(app_config: config::AppConfig) -> anyhow::Result<()> {
    let server_addr = app_config.server_addr();

    tracing::info!(
        "starting relay on {}:{} (env: {})",
        server_addr.0,
        server_addr.1,
        app_config.env
    );

    web::server(move || {
        web::App::new()
            .wrap(web::middleware::Logger::default())
            .state(create_app_state(&app_config))
            .configure(webhook::routes::line)
            .service(server::health)
            .default_service(web::route().to(server::serve_not_found))
    })
    .bind(server_addr)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
