//! Wall-clock source for scheduling decisions

use chrono::{DateTime, Utc};

/// Source of the current time
///
/// The reminder loop reads time only through this trait so tests can drive it
/// from tokio's paused clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
