//! Reminder timing state
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{anyhow, Result};
use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;

/// What the reminder loop should do at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Not due yet; sleep for `remaining` before checking again
    Wait {
        due: DateTime<Utc>,
        remaining: Duration,
    },
    /// The reminder is due now
    Due,
}

/// When the user last confirmed a reminder, and how often to remind them
#[derive(Debug, Clone)]
pub struct ReminderState {
    last_acknowledged: DateTime<Utc>,
    interval: Duration,
}

impl ReminderState {
    /// Fresh state that is due immediately
    pub fn new(interval: Duration) -> Self {
        Self::acknowledged_at(DateTime::<Utc>::MIN_UTC, interval)
    }

    pub fn acknowledged_at(last_acknowledged: DateTime<Utc>, interval: Duration) -> Self {
        ReminderState {
            last_acknowledged,
            interval,
        }
    }

    pub fn last_acknowledged(&self) -> DateTime<Utc> {
        self.last_acknowledged
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// `last_acknowledged + interval`
    pub fn next_due(&self) -> Result<DateTime<Utc>> {
        let interval = TimeDelta::from_std(self.interval)?;
        self.last_acknowledged
            .checked_add_signed(interval)
            .ok_or_else(|| {
                anyhow!(
                    "Next reminder overflows: {} + {:?}",
                    self.last_acknowledged,
                    self.interval
                )
            })
    }

    /// Decide whether to wait or remind at `now`
    pub fn step(&self, now: DateTime<Utc>) -> Result<Step> {
        let due = self.next_due()?;
        if due > now {
            // to_std only fails on negative deltas
            let remaining = (due - now).to_std().unwrap_or(Duration::ZERO);
            Ok(Step::Wait { due, remaining })
        } else {
            Ok(Step::Due)
        }
    }

    /// Record an acknowledgment; never moves the timestamp backwards
    pub fn acknowledge(&mut self, at: DateTime<Utc>) {
        if at > self.last_acknowledged {
            self.last_acknowledged = at;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const THIRTY_MINUTES: Duration = Duration::from_secs(30 * 60);

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_fresh_state_is_due_immediately() {
        let state = ReminderState::new(THIRTY_MINUTES);
        assert_eq!(state.step(t0()).unwrap(), Step::Due);
        assert_eq!(state.last_acknowledged(), DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn test_waits_for_remaining_time() {
        let state = ReminderState::acknowledged_at(t0(), THIRTY_MINUTES);
        let now = t0() + TimeDelta::minutes(29);

        match state.step(now).unwrap() {
            Step::Wait { due, remaining } => {
                assert_eq!(due, t0() + TimeDelta::minutes(30));
                assert_eq!(remaining.as_millis(), 60_000);
            }
            Step::Due => panic!("reminder fired a minute early"),
        }
    }

    #[test]
    fn test_sub_millisecond_remainder_is_preserved() {
        let state = ReminderState::acknowledged_at(t0(), THIRTY_MINUTES);
        let now = t0() + TimeDelta::minutes(30) - TimeDelta::microseconds(250);

        assert_eq!(
            state.step(now).unwrap(),
            Step::Wait {
                due: t0() + TimeDelta::minutes(30),
                remaining: Duration::from_micros(250),
            }
        );
    }

    #[test]
    fn test_due_exactly_at_interval() {
        let state = ReminderState::acknowledged_at(t0(), THIRTY_MINUTES);
        assert_eq!(state.step(t0() + TimeDelta::minutes(30)).unwrap(), Step::Due);
        assert_eq!(state.step(t0() + TimeDelta::hours(5)).unwrap(), Step::Due);
    }

    #[test]
    fn test_acknowledge_advances_to_acknowledgment_time() {
        let mut state = ReminderState::acknowledged_at(t0(), THIRTY_MINUTES);
        let ack = t0() + TimeDelta::minutes(30) + TimeDelta::seconds(5);

        state.acknowledge(ack);

        assert_eq!(state.last_acknowledged(), ack);
        assert_eq!(state.next_due().unwrap(), ack + TimeDelta::minutes(30));
    }

    #[test]
    fn test_acknowledge_never_moves_backwards() {
        let mut state = ReminderState::acknowledged_at(t0(), THIRTY_MINUTES);
        state.acknowledge(t0() - TimeDelta::minutes(1));
        assert_eq!(state.last_acknowledged(), t0());
    }

    #[test]
    fn test_overflowing_due_time_is_an_error() {
        let state = ReminderState::acknowledged_at(DateTime::<Utc>::MAX_UTC, THIRTY_MINUTES);
        assert!(state.next_due().is_err());
        assert!(state.step(t0()).is_err());
    }
}
