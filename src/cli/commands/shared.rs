//! Shared components for CLI commands
//!
//! This module contains the statistics type every command returns, logging
//! setup, layered configuration loading and progress spinners.

use crate::cli::args::Args;
use crate::config::Config;
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Summary of what a command did
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommandStats {
    /// Model files read from disk
    pub files_read: usize,
    /// Model files written to disk
    pub files_written: usize,
    /// Precipitation events handled
    pub events: usize,
    /// Entities committed to the store
    pub entities: usize,
    /// Wall-clock time of the command
    #[serde(skip)]
    pub processing_time: Duration,
}

impl CommandStats {
    /// One-line summary for human output
    pub fn summary(&self) -> String {
        format!(
            "{} read, {} written, {} events, {} entities in {}",
            self.files_read,
            self.files_written,
            self.events,
            self.entities,
            indicatif::HumanDuration(self.processing_time)
        )
    }
}

/// Set up structured logging
///
/// `RUST_LOG` wins over the configured level. Calling this twice keeps the
/// first subscriber.
pub fn setup_logging(config: &Config) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = config.logging.level.as_str();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gssha_io={}", log_level)));

    let result = if config.logging.structured {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    };

    if result.is_err() {
        debug!("Logging already initialized");
    }
    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(args: &Args) -> Result<Config> {
    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    let mut config = Config::load_layered(config_file)?;
    apply_cli_overrides(&mut config, args);
    config.validate()?;

    match config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("No config file found, using defaults and environment variables"),
    }

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &Args) {
    if args.verbose > 0 || args.quiet {
        config.logging.level = args.get_log_level().to_string();
    }
    if args.quiet {
        config.logging.structured = false;
    }
    if args.lenient_periods() {
        config.read.strict_period_count = false;
    }
}

/// Create a spinner for a blocking read or write, hidden in quiet mode
pub fn create_spinner(message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
