//! Stream Notify - announces live stream starts to a Discord channel.
//!
//! The [`Notifier`] reads its webhook settings from the environment once, then
//! posts a formatted message whenever a stream starts. Delivery is
//! best-effort: a missing setting disables the notifier, and failed webhook
//! calls are logged and counted but never surface to the caller.

pub mod cli;
pub mod config;
pub mod error;
pub mod notify;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::config::EnvSource;
use crate::notify::format::{format_announcement, should_announce};

pub use crate::notify::Notifier;

/// Runs the CLI with the provided arguments.
pub async fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.log_level())?;

    match cli.command {
        Commands::Notify { stream } => {
            let notifier = Notifier::from_env();
            notifier.notify_stream(&stream).await;
            finish(&notifier, cli.print_metrics)
        }
        Commands::Send { message } => {
            let notifier = Notifier::from_env();
            notifier.send_message(&message).await;
            finish(&notifier, cli.print_metrics)
        }
        Commands::Preview { stream, base_url } => preview(&stream, &base_url),
        Commands::ConfigShow => show_config(),
    }
}

/// Initializes the tracing subscriber for structured logging.
fn setup_logging(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .json()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Shuts the notifier down and optionally prints its metrics.
///
/// Delivery failures have already been logged, so this always succeeds unless
/// metrics rendering fails.
fn finish(notifier: &Notifier, print_metrics: bool) -> Result<()> {
    notifier.shutdown();

    if print_metrics {
        if let Some(metrics) = notifier.metrics() {
            print!("{}", metrics.render()?);
        }
    }

    Ok(())
}

/// Prints the announcement for a stream without sending it.
fn preview(stream: &str, base_url: &str) -> Result<()> {
    if !should_announce(stream) {
        println!("Stream '{}' is hidden and would not be announced.", stream);
        return Ok(());
    }

    let base_url = config::normalize_base_url(base_url);
    println!("{}", format_announcement(stream, &base_url));
    Ok(())
}

/// Displays the resolved configuration with the token redacted.
fn show_config() -> Result<()> {
    let config = config::load(&EnvSource).context("Notifier configuration incomplete")?;
    info!("Configuration resolved");
    let yaml = serde_yaml::to_string(&config)?;
    println!("{}", yaml);
    Ok(())
}
