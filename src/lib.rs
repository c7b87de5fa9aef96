// Core layer - configuration and clock
pub mod core;

// Features layer - reminder loop and session access
pub mod features;

pub use core::Config;

pub use features::{
    // Reminders
    LoopExit, ReminderLoop, ReminderState,
    // Session
    DialogPrompt, ProcessLockProbe, PromptOutcome, ReminderPrompt,
};
