//! Console + log-file tracing setup.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::warn;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber: console output plus a plain-text copy
/// appended to `log_path`. `RUST_LOG` overrides the default `info` filter.
///
/// A log file that cannot be opened is reported and skipped.
pub fn init(log_path: &Path) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file, open_error) = match open_log_file(log_path) {
        Ok(file) => (Some(file), None),
        Err(e) => (None, Some(e)),
    };

    let file_layer = file.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init()?;

    if let Some(e) = open_error {
        warn!("Cannot open log file {}: {e}", log_path.display());
    }

    Ok(())
}

fn open_log_file(path: &Path) -> std::io::Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
