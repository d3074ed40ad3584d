//! LINE Messaging API adapter.
//!
//! Thin wrapper over the parts of the platform the bot needs:
//! - `signature` - `X-Line-Signature` verification
//! - `types` - webhook payload models
//! - `client` - reply, profile and content calls

mod client;
mod error;
mod signature;
mod types;

pub use client::LineClient;
pub use error::LineError;
#[cfg(test)]
pub use signature::sign;
pub use signature::{SIGNATURE_HEADER, verify_signature};
pub use types::WebhookBody;
