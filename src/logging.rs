//! Tracing setup.
//!
//! The terminal runs in raw mode while a session is active, so anything
//! beyond errors is only useful when written to a log file.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::Result;

static STDERR_SUSPENDED: AtomicBool = AtomicBool::new(false);

/// Hold back stderr events while the terminal belongs to the play screen.
///
/// Events emitted while suspended are dropped. File logging is unaffected.
pub fn suspend_stderr(suspended: bool) {
    STDERR_SUSPENDED.store(suspended, Ordering::Relaxed);
}

/// Whether stderr events are currently written
pub fn stderr_enabled() -> bool {
    !STDERR_SUSPENDED.load(Ordering::Relaxed)
}

/// Map a `-v` count to a filter level (0=error, 1=warn, 2=info, 3=debug, 4+=trace).
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    }
}

/// Initialize the logging system.
///
/// With `log_file` set, events at the requested verbosity are appended to
/// that file. Without it, only errors reach stderr, and none while the
/// display holds stderr (see [`suspend_stderr`]). `RUST_LOG` overrides
/// the computed filter in both cases.
pub fn init_logging(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
    let level = match log_file {
        Some(_) => level_for(verbosity),
        None => "error",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("spell_drop={}", level)));

    match log_file {
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_writer(std::io::stderr.with_filter(|_| stderr_enabled())),
                )
                .try_init()
                .map_err(|e| crate::Error::Io(std::io::Error::other(e.to_string())))?;
        }
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(file)
                        .with_ansi(false)
                        .with_target(true)
                        .with_file(verbosity >= 3)
                        .with_line_number(verbosity >= 3),
                )
                .try_init()
                .map_err(|e| crate::Error::Io(std::io::Error::other(e.to_string())))?;
        }
    }

    Ok(())
}
