//! # Session Feature
//!
//! Interactive desktop session access: lock detection and the reminder dialog.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod lock;
pub mod prompt;

pub use lock::{ProcessLockProbe, SessionLockProbe};
pub use prompt::{DialogKind, DialogPrompt, PromptOutcome, ReminderPrompt, SessionPrompt};
