//! Diagnostic logging setup.

use std::io;

use color_eyre::eyre::{eyre, Result};
use tracing::level_filters::LevelFilter;

/// Maps the number of `-v` flags onto a maximum log level, starting from warnings.
pub(crate) const fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the global `tracing` subscriber.
///
/// This function routes all events to stderr, without timestamps or targets, so that stdout only
/// ever carries the rendered levels or the exported level set.
///
/// # Errors
///
/// This function returns an error if a global subscriber was already installed.
pub fn init(verbosity: u8) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level_for(verbosity))
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|err| eyre!("failed to install the log subscriber: {err}"))
}
