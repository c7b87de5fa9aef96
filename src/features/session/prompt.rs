//! # Feature: Session Prompt
//!
//! Blocking, OK-acknowledgeable reminder dialog shown to the active desktop
//! session. The dialog itself is the platform's own tool, launched as a child
//! process: a WinForms message box through PowerShell on Windows, `osascript`
//! on macOS and `zenity` elsewhere.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

/// Environment variables carrying the dialog strings into the child process
const TEXT_VAR: &str = "DRINK_REMINDER_TEXT";
const CAPTION_VAR: &str = "DRINK_REMINDER_CAPTION";

const MESSAGE_BOX_SCRIPT: &str = "Add-Type -AssemblyName System.Windows.Forms; \
    [System.Windows.Forms.MessageBox]::Show($env:DRINK_REMINDER_TEXT, $env:DRINK_REMINDER_CAPTION, \
    [System.Windows.Forms.MessageBoxButtons]::OK, \
    [System.Windows.Forms.MessageBoxIcon]::Exclamation, \
    [System.Windows.Forms.MessageBoxDefaultButton]::Button1, \
    [System.Windows.Forms.MessageBoxOptions]::ServiceNotification)";

const APPLE_SCRIPT: &str = "display dialog (system attribute \"DRINK_REMINDER_TEXT\") \
    with title (system attribute \"DRINK_REMINDER_CAPTION\") \
    buttons {\"OK\"} default button 1 with icon caution";

/// What the user did with a reminder prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    /// The user pressed OK
    Acknowledged,
    /// Closed, timed out, or otherwise not confirmed
    Dismissed,
}

/// Fixed text and caption of the reminder dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderPrompt {
    pub text: String,
    pub caption: String,
}

impl ReminderPrompt {
    pub fn new(text: impl Into<String>, caption: impl Into<String>) -> Self {
        ReminderPrompt {
            text: text.into(),
            caption: caption.into(),
        }
    }
}

/// Shows a modal prompt to the interactive session and waits for the user
///
/// Implementations may block for as long as the user takes to respond.
#[async_trait]
pub trait SessionPrompt: Send + Sync {
    async fn show(&self, prompt: &ReminderPrompt) -> Result<PromptOutcome>;
}

/// Which native dialog tool is used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    MessageBox,
    AppleScript,
    Zenity,
}

impl DialogKind {
    /// The dialog tool for the platform this binary was built for
    pub fn native() -> Self {
        if cfg!(windows) {
            DialogKind::MessageBox
        } else if cfg!(target_os = "macos") {
            DialogKind::AppleScript
        } else {
            DialogKind::Zenity
        }
    }

    fn program(self) -> &'static str {
        match self {
            DialogKind::MessageBox => "powershell",
            DialogKind::AppleScript => "osascript",
            DialogKind::Zenity => "zenity",
        }
    }

    fn command(self, prompt: &ReminderPrompt) -> Command {
        let mut cmd = Command::new(self.program());
        match self {
            DialogKind::MessageBox => {
                cmd.args(["-NoProfile", "-NonInteractive", "-Command", MESSAGE_BOX_SCRIPT]);
            }
            DialogKind::AppleScript => {
                cmd.args(["-e", APPLE_SCRIPT]);
            }
            DialogKind::Zenity => {
                cmd.arg("--warning")
                    .arg(format!("--title={}", prompt.caption))
                    .arg(format!("--text={}", prompt.text))
                    .arg("--ok-label=OK")
                    .arg("--no-markup");
            }
        }
        cmd.env(TEXT_VAR, &prompt.text)
            .env(CAPTION_VAR, &prompt.caption)
            .kill_on_drop(true);
        cmd
    }

    /// Map the dialog tool's exit code and stdout to an outcome
    fn interpret(self, code: Option<i32>, stdout: &str, stderr: &str) -> Result<PromptOutcome> {
        let stdout = stdout.trim();
        match (self, code) {
            (DialogKind::MessageBox, Some(0)) if stdout.eq_ignore_ascii_case("OK") => {
                Ok(PromptOutcome::Acknowledged)
            }
            (DialogKind::MessageBox, Some(0)) => Ok(PromptOutcome::Dismissed),
            (DialogKind::AppleScript, Some(0)) if stdout.ends_with(":OK") => {
                Ok(PromptOutcome::Acknowledged)
            }
            (DialogKind::AppleScript, Some(0)) => Ok(PromptOutcome::Dismissed),
            // osascript reports "User canceled" as exit status 1
            (DialogKind::AppleScript, Some(1)) if stderr.contains("-128") => {
                Ok(PromptOutcome::Dismissed)
            }
            (DialogKind::Zenity, Some(0)) => Ok(PromptOutcome::Acknowledged),
            (DialogKind::Zenity, Some(1)) | (DialogKind::Zenity, Some(5)) => {
                Ok(PromptOutcome::Dismissed)
            }
            (_, Some(code)) => Err(anyhow!(
                "{} exited with status {}: {}",
                self.program(),
                code,
                stderr.trim()
            )),
            (_, None) => Err(anyhow!("{} was terminated by a signal", self.program())),
        }
    }
}

/// Session prompt backed by the platform's native dialog tool
#[derive(Debug, Clone, Copy)]
pub struct DialogPrompt {
    kind: DialogKind,
}

impl DialogPrompt {
    pub fn new(kind: DialogKind) -> Self {
        DialogPrompt { kind }
    }

    pub fn native() -> Self {
        Self::new(DialogKind::native())
    }
}

#[async_trait]
impl SessionPrompt for DialogPrompt {
    async fn show(&self, prompt: &ReminderPrompt) -> Result<PromptOutcome> {
        let output = self
            .kind
            .command(prompt)
            .output()
            .await
            .with_context(|| format!("Failed to launch {}", self.kind.program()))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(
            "{} finished with {:?} (stdout: {:?})",
            self.kind.program(),
            output.status.code(),
            stdout.trim()
        );

        self.kind.interpret(output.status.code(), &stdout, &stderr)
    }
}
