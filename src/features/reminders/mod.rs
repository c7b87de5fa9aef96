//! # Reminders Feature
//!
//! Drink reminder loop with acknowledgment-driven scheduling.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod scheduler;
pub mod state;

pub use scheduler::{LoopExit, ReminderLoop, PROMPT_COOLDOWN};
pub use state::{ReminderState, Step};
