//! Chat notification layer
//!
//! - `Notifier` trait, the only outbound side effect of a cycle besides polling
//! - `TelegramNotifier` implementation over the Bot API

pub mod telegram;

use async_trait::async_trait;

use crate::error::Result;

pub use telegram::{DEFAULT_API_BASE, TelegramConfig, TelegramNotifier};

/// Delivers text to the configured chat
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send one message. Failures surface as `BotError::NotifyFailure`.
    async fn send(&self, text: &str) -> Result<()>;
}
