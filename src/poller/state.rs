//! Loop state and checkpoint policy

use serde::{Deserialize, Serialize};

/// Where the checkpoint moves after a successful cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuccessCheckpoint {
    /// Use the response's `current_date`
    #[default]
    ServerDate,
    /// Use the local wall clock
    Now,
}

/// Where the checkpoint moves after a failed cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCheckpoint {
    /// Keep the pre-cycle checkpoint so the next poll covers the same window
    #[default]
    Hold,
    /// Move to `now - poll_interval`
    Rewind,
}

/// The only mutable state of the bot. Lives in memory and is lost on restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopState {
    /// Last message actually delivered to the chat
    pub last_sent_message: Option<String>,
    /// `from_date` for the next poll (unix seconds)
    pub checkpoint: i64,
}

impl LoopState {
    pub fn new(checkpoint: i64) -> Self {
        Self {
            last_sent_message: None,
            checkpoint,
        }
    }

    /// Whether `message` differs from the last delivered one
    pub fn is_new_message(&self, message: &str) -> bool {
        self.last_sent_message.as_deref() != Some(message)
    }

    pub fn record_sent(&mut self, message: String) {
        self.last_sent_message = Some(message);
    }

    /// Advance after a successful cycle; never moves backwards
    pub fn advance(&mut self, candidate: i64) {
        self.checkpoint = self.checkpoint.max(candidate);
    }

    /// Apply the error-path policy
    pub fn on_error(&mut self, policy: ErrorCheckpoint, now: i64, poll_interval_secs: u64) {
        match policy {
            ErrorCheckpoint::Hold => {}
            ErrorCheckpoint::Rewind => {
                self.checkpoint = now.saturating_sub(i64::try_from(poll_interval_secs).unwrap_or(i64::MAX));
            }
        }
    }
}
