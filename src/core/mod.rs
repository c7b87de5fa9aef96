//! # Core Module
//!
//! Configuration and clock shared by the reminder service.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod clock;
pub mod config;

// Re-export commonly used items
pub use clock::{Clock, SystemClock};
pub use config::Config;
