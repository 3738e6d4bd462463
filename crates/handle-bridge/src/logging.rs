//! # Logging
//!
//! Installs the process-wide `tracing` subscriber for a [`LoggingConfig`].
//! `RUST_LOG`, when set, takes precedence over the configured level.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{LogOutput, LoggingConfig};

/// Filter directives used when `RUST_LOG` is not set, e.g. `info,handle_bridge=info`
pub fn default_directives(level: &tracing::Level) -> String {
    format!("{},handle_bridge={}", level.as_str(), level.as_str())
}

fn build_filter(level: &tracing::Level) -> Result<EnvFilter> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .with_context(|| format!("Invalid RUST_LOG directives '{}'", directives)),
        _ => EnvFilter::try_new(default_directives(level))
            .context("Invalid default log directives"),
    }
}

pub fn setup_global_logging(config: &LoggingConfig) -> Result<()> {
    let level: tracing::Level = config
        .level
        .parse()
        .with_context(|| format!("Invalid log level '{}'", config.level))?;
    let filter = build_filter(&level)?;

    let (file_layer, stdout_layer) = match config.output {
        LogOutput::File => {
            let log_path = config.log_path();
            if let Some(parent) = log_path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory {:?}", parent))?;
            }
            let file = File::create(&log_path)
                .with_context(|| format!("Failed to create log file {:?}", log_path))?;
            let layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_thread_ids(true)
                .with_line_number(true)
                .with_file(true)
                .with_target(true)
                .with_ansi(false);
            (Some(layer), None)
        }
        LogOutput::Stdout => {
            let layer = fmt::layer()
                .with_writer(std::io::stdout)
                .with_thread_ids(true)
                .with_target(true)
                .with_ansi(true)
                .pretty();
            (None, Some(layer))
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
