//! The poll loop
//!
//! Each cycle runs to completion before the next one starts:
//! 1. Fetch statuses changed since the checkpoint
//! 2. Validate the response and format the latest homework
//! 3. Send the message unless it equals the last delivered one
//! 4. Sleep for the poll interval
//!
//! Any failure in 1–3 is turned into a "Сбой в работе программы" diagnostic that
//! goes through the same dedup and delivery path. Only the caller can stop the
//! loop, through the shutdown channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::api::HomeworkApi;
use crate::error::{BotError, Result};
use crate::format::{failure_message, format_status};
use crate::notify::Notifier;
use crate::poller::clock::Clock;
use crate::poller::state::{ErrorCheckpoint, LoopState, SuccessCheckpoint};
use crate::validate::validate;

/// Default pause between cycles
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(600);

/// Configuration for the poll loop.
#[derive(Debug, Clone)]
pub struct PollLoopConfig {
    pub poll_interval: Duration,
    pub success_checkpoint: SuccessCheckpoint,
    pub error_checkpoint: ErrorCheckpoint,
}

impl Default for PollLoopConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            success_checkpoint: SuccessCheckpoint::default(),
            error_checkpoint: ErrorCheckpoint::default(),
        }
    }
}

impl PollLoopConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_success_checkpoint(mut self, policy: SuccessCheckpoint) -> Self {
        self.success_checkpoint = policy;
        self
    }

    pub fn with_error_checkpoint(mut self, policy: ErrorCheckpoint) -> Self {
        self.error_checkpoint = policy;
        self
    }
}

/// What a single cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status message was delivered
    Notified(String),
    /// The status message equals the last delivered one; nothing was sent
    Suppressed(String),
    /// The response contained no homeworks
    NoUpdates,
    /// The cycle failed. `delivered` tells whether the diagnostic reached the chat.
    Failed { error: BotError, delivered: bool },
}

impl CycleOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, CycleOutcome::Failed { .. })
    }
}

/// Result of the poll → validate → format steps
struct Polled {
    message: Option<String>,
    checkpoint: i64,
}

/// Drives the API client and notifier and owns `LoopState`.
pub struct PollLoop {
    api: Arc<dyn HomeworkApi>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    config: PollLoopConfig,
    state: LoopState,
}

impl PollLoop {
    /// Create a loop whose first poll starts from the clock's current time.
    pub fn new(
        api: Arc<dyn HomeworkApi>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        config: PollLoopConfig,
    ) -> Self {
        let state = LoopState::new(clock.now_unix());
        Self {
            api,
            notifier,
            clock,
            config,
            state,
        }
    }

    /// Start polling from an explicit checkpoint instead of "now".
    pub fn with_checkpoint(mut self, checkpoint: i64) -> Self {
        self.state.checkpoint = checkpoint;
        self
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    pub fn config(&self) -> &PollLoopConfig {
        &self.config
    }

    /// Run cycles until `shutdown` turns true or its sender is dropped.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(
            interval_secs = self.config.poll_interval.as_secs(),
            checkpoint = self.state.checkpoint,
            "Poll loop started"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            let outcome = self.run_cycle().await;
            tracing::debug!(outcome = ?outcome, checkpoint = self.state.checkpoint, "Cycle finished");

            tokio::select! {
                _ = tokio::time::sleep(self.config.poll_interval) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!(checkpoint = self.state.checkpoint, "Poll loop stopped");
    }

    /// Run one poll → validate → format → notify cycle. Never panics or
    /// propagates: every failure ends up in the returned outcome.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let polled = match self.poll().await {
            Ok(polled) => polled,
            Err(error) => return self.fail(error).await,
        };

        let Some(message) = polled.message else {
            tracing::debug!(checkpoint = polled.checkpoint, "No new homework statuses");
            self.state.advance(polled.checkpoint);
            return CycleOutcome::NoUpdates;
        };

        if !self.state.is_new_message(&message) {
            tracing::debug!("Status unchanged, nothing to send");
            self.state.advance(polled.checkpoint);
            return CycleOutcome::Suppressed(message);
        }

        match self.notifier.send(&message).await {
            Ok(()) => {
                tracing::info!(message = %message, "Status change sent");
                self.state.record_sent(message.clone());
                self.state.advance(polled.checkpoint);
                CycleOutcome::Notified(message)
            }
            Err(error) => {
                // The window is kept (per policy) so the change is picked up again
                tracing::error!(kind = error.kind(), error = %error, "Failed to send status change");
                self.apply_error_checkpoint();
                CycleOutcome::Failed {
                    error,
                    delivered: false,
                }
            }
        }
    }

    async fn poll(&self) -> Result<Polled> {
        let raw = self.api.fetch(self.state.checkpoint).await?;
        let result = validate(&raw)?;

        let message = match result.latest() {
            Some(entry) => Some(format_status(entry)?),
            None => None,
        };

        let checkpoint = match self.config.success_checkpoint {
            SuccessCheckpoint::ServerDate => result.checkpoint,
            SuccessCheckpoint::Now => self.clock.now_unix(),
        };

        Ok(Polled { message, checkpoint })
    }

    /// Error path: log, adjust checkpoint, best-effort diagnostic.
    async fn fail(&mut self, error: BotError) -> CycleOutcome {
        tracing::error!(kind = error.kind(), error = %error, "Cycle failed");
        self.apply_error_checkpoint();

        let message = failure_message(&error);
        if !self.state.is_new_message(&message) {
            tracing::debug!("Same failure as last reported, not resending");
            return CycleOutcome::Failed {
                error,
                delivered: false,
            };
        }

        // A failed diagnostic is only logged, never re-reported
        let delivered = match self.notifier.send(&message).await {
            Ok(()) => {
                self.state.record_sent(message);
                true
            }
            Err(notify_error) => {
                tracing::error!(error = %notify_error, "Failed to deliver failure diagnostic");
                false
            }
        };

        CycleOutcome::Failed { error, delivered }
    }

    fn apply_error_checkpoint(&mut self) {
        let now = self.clock.now_unix();
        self.state
            .on_error(self.config.error_checkpoint, now, self.config.poll_interval.as_secs());
    }
}

impl std::fmt::Debug for PollLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollLoop")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish()
    }
}
