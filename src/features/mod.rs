//! # Features
//!
//! - **reminders**: the reminder loop and its timing state
//! - **session**: lock detection and the reminder dialog

pub mod reminders;
pub mod session;

pub use reminders::{LoopExit, ReminderLoop, ReminderState};
pub use session::{DialogPrompt, ProcessLockProbe, PromptOutcome, ReminderPrompt};

/// Crate version reported at startup
pub fn get_service_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
