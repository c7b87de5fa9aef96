//! Environment-driven configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Interval, dialog text and lock-screen process names from env

use anyhow::{anyhow, Context, Result};
use chrono::{TimeDelta, Utc};
use std::time::Duration;

/// Default interval between acknowledged reminders
pub const DEFAULT_INTERVAL_MINUTES: u64 = 30;
pub const DEFAULT_SERVICE_NAME: &str = "Drink Reminder Service";
pub const DEFAULT_REMINDER_TEXT: &str = "Trink was!";
pub const DEFAULT_REMINDER_CAPTION: &str = "Erinnerung zu Trinken";

#[derive(Debug, Clone)]
pub struct Config {
    pub service_name: String,
    pub log_level: String,
    pub reminder_interval: Duration,
    pub reminder_text: String,
    pub reminder_caption: String,
    /// Process names whose presence means the interactive session is locked
    pub lock_screen_processes: Vec<String>,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let reminder_interval = match non_empty("REMINDER_INTERVAL_MINUTES") {
            Some(raw) => parse_interval_minutes(&raw)?,
            None => Duration::from_secs(DEFAULT_INTERVAL_MINUTES * 60),
        };

        let lock_screen_processes = match non_empty("LOCK_SCREEN_PROCESSES") {
            Some(raw) => {
                let names: Vec<String> = raw
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if names.is_empty() {
                    return Err(anyhow!("LOCK_SCREEN_PROCESSES contains no process names"));
                }
                names
            }
            None => default_lock_screen_processes(),
        };

        Ok(Config {
            service_name: non_empty("SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            reminder_interval,
            reminder_text: non_empty("REMINDER_TEXT")
                .unwrap_or_else(|| DEFAULT_REMINDER_TEXT.to_string()),
            reminder_caption: non_empty("REMINDER_CAPTION")
                .unwrap_or_else(|| DEFAULT_REMINDER_CAPTION.to_string()),
            lock_screen_processes,
        })
    }
}

fn parse_interval_minutes(raw: &str) -> Result<Duration> {
    let minutes: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("REMINDER_INTERVAL_MINUTES must be a whole number, got '{raw}'"))?;
    if minutes == 0 {
        return Err(anyhow!("REMINDER_INTERVAL_MINUTES must be greater than zero"));
    }
    let too_large = || anyhow!("REMINDER_INTERVAL_MINUTES is too large: {minutes}");
    let interval = minutes
        .checked_mul(60)
        .map(Duration::from_secs)
        .ok_or_else(too_large)?;

    // The next due time must be representable once the user acknowledges
    let delta = TimeDelta::from_std(interval).map_err(|_| too_large())?;
    Utc::now().checked_add_signed(delta).ok_or_else(too_large)?;

    Ok(interval)
}

/// Lock-screen processes for the platform this binary was built for
pub fn default_lock_screen_processes() -> Vec<String> {
    let names: &[&str] = if cfg!(windows) {
        &["logonui"]
    } else if cfg!(target_os = "macos") {
        &["ScreenSaverEngine"]
    } else {
        &["swaylock", "i3lock", "xsecurelock", "gnome-screensaver-dialog"]
    };
    names.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.service_name, "Drink Reminder Service");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.reminder_interval, Duration::from_secs(30 * 60));
        assert_eq!(config.reminder_text, "Trink was!");
        assert_eq!(config.reminder_caption, "Erinnerung zu Trinken");
        assert_eq!(config.lock_screen_processes, default_lock_screen_processes());
    }

    #[test]
    fn test_interval_override() {
        let config = config_from(&[("REMINDER_INTERVAL_MINUTES", " 45 ")]).unwrap();
        assert_eq!(config.reminder_interval, Duration::from_secs(45 * 60));
    }

    #[test]
    fn test_interval_rejects_zero_and_garbage() {
        assert!(config_from(&[("REMINDER_INTERVAL_MINUTES", "0")]).is_err());
        assert!(config_from(&[("REMINDER_INTERVAL_MINUTES", "-5")]).is_err());
        assert!(config_from(&[("REMINDER_INTERVAL_MINUTES", "half an hour")]).is_err());
    }

    #[test]
    fn test_interval_rejects_unschedulable_values() {
        // Beyond what a chrono time delta can hold
        let err = config_from(&[("REMINDER_INTERVAL_MINUTES", "200000000000000")]).unwrap_err();
        assert!(err.to_string().contains("too large"));

        // Fits a time delta, but now + interval is past the last representable date
        let err = config_from(&[("REMINDER_INTERVAL_MINUTES", "150000000000")]).unwrap_err();
        assert!(err.to_string().contains("too large"));

        // Overflows the minutes-to-seconds conversion
        assert!(config_from(&[("REMINDER_INTERVAL_MINUTES", u64::MAX.to_string().as_str())]).is_err());

        // A week is fine
        let config = config_from(&[("REMINDER_INTERVAL_MINUTES", "10080")]).unwrap();
        assert_eq!(config.reminder_interval, Duration::from_secs(10_080 * 60));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("REMINDER_TEXT", "   "), ("LOG_LEVEL", "")]).unwrap();
        assert_eq!(config.reminder_text, DEFAULT_REMINDER_TEXT);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_lock_screen_process_list() {
        let config = config_from(&[("LOCK_SCREEN_PROCESSES", "logonui, ,swaylock,")]).unwrap();
        assert_eq!(config.lock_screen_processes, vec!["logonui", "swaylock"]);

        assert!(config_from(&[("LOCK_SCREEN_PROCESSES", " , ,")]).is_err());
    }

    #[test]
    fn test_default_lock_screen_processes_not_empty() {
        assert!(!default_lock_screen_processes().is_empty());
    }
}
