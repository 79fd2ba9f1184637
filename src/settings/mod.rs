//! Asynchronous request/response boundary to the settings store
//!
//! The overlay never touches persisted settings directly. It sends
//! [`Request`]s to a [`SettingsHost`] task and polls for replies while it
//! keeps handling input.

pub mod client;
pub mod host;
pub mod messages;

pub use client::{PendingReply, ReplyState, SettingsClient};
pub use host::{Notice, SettingsHost};
pub use messages::{Request, Response};
