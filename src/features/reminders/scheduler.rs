//! # Feature: Drink Reminder Loop
//!
//! Long-running task that waits until the next reminder is due, prompts the
//! interactive session and only restarts the interval once the user presses OK.
//! Unacknowledged reminders re-fire after a short cooldown.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

use crate::core::Clock;
use crate::features::reminders::state::{ReminderState, Step};
use crate::features::session::{PromptOutcome, ReminderPrompt, SessionLockProbe, SessionPrompt};
use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Pause after each prompt before re-evaluating the schedule
pub const PROMPT_COOLDOWN: Duration = Duration::from_millis(1000);

/// How the reminder loop ended
#[derive(Debug)]
pub enum LoopExit {
    /// Cancellation was requested
    Shutdown,
    /// An unexpected error stopped the loop
    Fatal(anyhow::Error),
}

impl LoopExit {
    /// Process exit status for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            LoopExit::Shutdown => 0,
            LoopExit::Fatal(_) => 1,
        }
    }
}

/// Result of one pass through the loop
enum Cycle {
    Continue,
    Cancelled,
}

pub struct ReminderLoop {
    state: ReminderState,
    prompt: ReminderPrompt,
    clock: Arc<dyn Clock>,
    lock_probe: Arc<dyn SessionLockProbe>,
    session_prompt: Arc<dyn SessionPrompt>,
}

impl ReminderLoop {
    pub fn new(
        state: ReminderState,
        prompt: ReminderPrompt,
        clock: Arc<dyn Clock>,
        lock_probe: Arc<dyn SessionLockProbe>,
        session_prompt: Arc<dyn SessionPrompt>,
    ) -> Self {
        ReminderLoop {
            state,
            prompt,
            clock,
            lock_probe,
            session_prompt,
        }
    }

    pub fn state(&self) -> &ReminderState {
        &self.state
    }

    /// Run until `shutdown` is cancelled or an unexpected error occurs
    pub async fn run(&mut self, shutdown: CancellationToken) -> LoopExit {
        info!(
            "Drink reminder loop started (interval: {} min)",
            self.state.interval().as_secs() / 60
        );

        while !shutdown.is_cancelled() {
            match self.cycle(&shutdown).await {
                Ok(Cycle::Continue) => {}
                Ok(Cycle::Cancelled) => break,
                Err(e) => {
                    error!("{e:#}");
                    return LoopExit::Fatal(e);
                }
            }
        }

        info!("Drink reminder loop stopped");
        LoopExit::Shutdown
    }

    async fn cycle(&mut self, shutdown: &CancellationToken) -> Result<Cycle> {
        let now = self.clock.now();

        let delay = match self.state.step(now)? {
            Step::Wait { due, remaining } => {
                info!(
                    "Reminder checked, but not due yet at: {}. Next reminder at: {}, ({} ms left)",
                    local(now),
                    local(due),
                    remaining.as_millis()
                );
                remaining
            }
            Step::Due => {
                info!("Reminder triggered at: {}", local(now));
                self.remind_to_drink().await;
                PROMPT_COOLDOWN
            }
        };

        if sleep_or_cancel(shutdown, delay).await {
            Ok(Cycle::Continue)
        } else {
            Ok(Cycle::Cancelled)
        }
    }

    /// Prompt the user unless the session is locked
    ///
    /// Prompt failures are swallowed; the next cycle retries.
    async fn remind_to_drink(&mut self) {
        if self.lock_probe.is_locked() {
            info!("Session is locked, skipping reminder");
            return;
        }

        match self.session_prompt.show(&self.prompt).await {
            Ok(PromptOutcome::Acknowledged) => {
                let at = self.clock.now();
                self.state.acknowledge(at);
                info!("Reminder acknowledged at: {}", local(at));
            }
            Ok(PromptOutcome::Dismissed) => {
                debug!("Reminder dismissed without acknowledgment");
            }
            Err(e) => {
                debug!("Reminder prompt unavailable: {e:#}");
            }
        }
    }
}

/// Sleep for `delay`; returns false if `shutdown` fired first
async fn sleep_or_cancel(shutdown: &CancellationToken, delay: Duration) -> bool {
    tokio::select! {
        _ = shutdown.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}

fn local(at: DateTime<Utc>) -> DateTime<Local> {
    at.with_timezone(&Local)
}
