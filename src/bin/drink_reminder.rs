use anyhow::Result;
use dotenvy::dotenv;
use log::{info, warn};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use drink_reminder::core::{Config, SystemClock};
use drink_reminder::features::get_service_version;
use drink_reminder::features::reminders::{ReminderLoop, ReminderState};
use drink_reminder::features::session::{DialogPrompt, ProcessLockProbe, ReminderPrompt};

/// Resolves once the host asks the process to stop
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
                return;
            }
            Err(e) => warn!("Failed to install SIGTERM handler: {e}"),
        }
    }

    #[cfg(windows)]
    {
        use tokio::signal::windows::{ctrl_close, ctrl_shutdown};

        match (ctrl_close(), ctrl_shutdown()) {
            (Ok(mut close), Ok(mut shutdown)) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = close.recv() => {}
                    _ = shutdown.recv() => {}
                }
                return;
            }
            (Err(e), _) | (_, Err(e)) => warn!("Failed to install console event handlers: {e}"),
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {e}");
        // Without any signal source the loop runs until the process is killed
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!(
        "Starting {} v{} (rustc {})",
        config.service_name,
        get_service_version(),
        rustc_version_runtime::version()
    );
    info!(
        "Lock-screen processes: {}",
        config.lock_screen_processes.join(", ")
    );

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Stop requested, shutting down");
        signal_token.cancel();
    });

    let mut reminders = ReminderLoop::new(
        ReminderState::new(config.reminder_interval),
        ReminderPrompt::new(config.reminder_text.clone(), config.reminder_caption.clone()),
        Arc::new(SystemClock),
        Arc::new(ProcessLockProbe::new(config.lock_screen_processes.clone())),
        Arc::new(DialogPrompt::native()),
    );

    let exit = reminders.run(shutdown).await;
    let code = exit.exit_code();
    if code == 0 {
        info!("{} stopped", config.service_name);
        return Ok(());
    }

    // A non-zero status lets the service manager's restart policy take over
    std::process::exit(code);
}
