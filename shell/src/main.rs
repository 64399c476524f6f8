//! estate-replay - drive the Estate controller from a script
//!
//! Reads a JSON array of UI events, feeds them through the shell event loop
//! with their delays and prints one JSON line per resulting snapshot.
//!
//! ```text
//! estate-replay flows/registration.json
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use estate_shell::{load_script, Config, ShellEvent};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Initialize structured logging
    init_tracing();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: estate-replay <script.json>")?;
    let steps = load_script(&path).with_context(|| format!("loading {}", path.display()))?;

    let config = Config::from_env();
    log_startup_info(&config, steps.len());

    let mut shell = estate_shell::spawn(&config);
    let mut last = shell.snapshot();
    print_json(&last)?;

    for step in steps {
        if step.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(step.delay_ms)).await;
        }

        // The splash timer may have fired during the delay
        let current = shell.snapshot();
        if current != last {
            print_json(&current)?;
            last = current;
        }

        let snapshot = shell.dispatch(step.event).await?;
        while let Some(outcome) = shell.try_next_event() {
            if let ShellEvent::Rejected { reason } = outcome {
                warn!(%reason, "step rejected");
            }
        }
        if snapshot != last {
            print_json(&snapshot)?;
            last = snapshot;
        }
    }

    shell.shutdown().await?;
    Ok(())
}

/// Initialize tracing with environment-based log levels.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Snapshots own stdout
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("estate_shell=debug,estate_core=debug")),
        )
        .init();
}

/// Log startup configuration.
fn log_startup_info(config: &Config, steps: usize) {
    info!(
        splash_timeout = ?config.splash_timeout,
        splash_destination = %config.splash_destination,
        back_fallback = %config.back_fallback,
        unknown_screen_fallback = %config.unknown_screen_fallback,
        logout_destination = %config.logout_destination,
        steps,
        "Starting estate replay"
    );
}

fn print_json(snapshot: &estate_core::Snapshot) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(snapshot)?);
    Ok(())
}
