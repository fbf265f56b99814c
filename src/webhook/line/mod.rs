//! LINE Messaging API webhook integration
//!
//! ## Submodules
//!
//! - [`routes`] - HTTP endpoint receiving LINE webhook calls
//! - [`security`] - `X-Line-Signature` verification
//! - [`schemas`] - Wire format of webhook payloads and profiles
//! - [`models`] - Inbound events as the relay sees them
//! - [`handler`] - Dispatch of events to the text and media handlers
//! - [`context`] - Sender and conversation resolution
//! - [`format`] - Notification text and upload filenames
//! - [`client`] - LINE API client for profiles and message content

pub mod client;
pub mod context;
pub mod format;
pub mod handler;
pub mod models;
pub mod routes;
pub mod schemas;
pub mod security;

pub use routes::callback;
