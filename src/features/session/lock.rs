//! # Feature: Session Lock Probe
//!
//! Detects a locked interactive session by looking for the platform's
//! lock-screen process in the process table.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

use log::debug;
use std::path::Path;
use std::sync::Mutex;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};

/// Linux keeps only this many bytes of a process name (`TASK_COMM_LEN - 1`)
const TRUNCATED_NAME_LEN: usize = 15;

/// Answers "is the interactive session locked right now?"
pub trait SessionLockProbe: Send + Sync {
    fn is_locked(&self) -> bool;
}

/// Lock probe backed by a process-table scan
pub struct ProcessLockProbe {
    process_names: Vec<String>,
    sys: Mutex<System>,
}

impl ProcessLockProbe {
    pub fn new(process_names: Vec<String>) -> Self {
        ProcessLockProbe {
            process_names,
            sys: Mutex::new(System::new()),
        }
    }
}

impl SessionLockProbe for ProcessLockProbe {
    fn is_locked(&self) -> bool {
        // A poisoned lock only means an earlier scan panicked; the System is still usable
        let mut sys = match self.sys.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        sys.refresh_processes_specifics(ProcessesToUpdate::All, true, ProcessRefreshKind::new());

        let found = sys.processes().values().find_map(|process| {
            let name = Path::new(process.name());
            name.file_stem()
                .and_then(|stem| stem.to_str())
                .filter(|stem| is_lock_screen_process(stem, &self.process_names))
                .map(|stem| stem.to_string())
        });

        if let Some(name) = &found {
            debug!("Lock-screen process '{name}' is running");
        }
        found.is_some()
    }
}

/// Case-insensitive match of an executable stem against the configured names
///
/// A stem of exactly [`TRUNCATED_NAME_LEN`] bytes also matches a longer
/// configured name that starts with it, since the kernel cuts names there.
fn is_lock_screen_process(stem: &str, process_names: &[String]) -> bool {
    process_names.iter().any(|name| {
        let name = name.trim_end_matches(".exe");
        if name.eq_ignore_ascii_case(stem) {
            return true;
        }
        stem.len() == TRUNCATED_NAME_LEN
            && name.len() > TRUNCATED_NAME_LEN
            && name
                .get(..TRUNCATED_NAME_LEN)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(stem))
    })
}
