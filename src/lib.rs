//! homework-bot - polls the homework review API and reports status changes
//!
//! Every poll interval the bot asks the API for statuses changed since the
//! last checkpoint, validates the response, formats the newest submission's
//! status and sends it to one Telegram chat unless it repeats the previous
//! message. Failures are reported to the same chat.

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod homework;
pub mod notify;
pub mod poller;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{BotError, Result};
