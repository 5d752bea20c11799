//! Minimal logger for the scanning pipeline.
//!
//! Prints `LEVEL +elapsed message` to stderr. A periodic detection loop
//! produces a steady trickle of per-pass messages, so the format stays on
//! one short line. Use `init_with_level` once at startup.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct PassLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for PassLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed_ms = self.started.elapsed().as_millis();
        let _ = writeln!(
            std::io::stderr(),
            "{:>5} +{}ms {}",
            record.level(),
            elapsed_ms,
            record.args()
        );
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<PassLogger> = OnceLock::new();

/// Install the pass logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| PassLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install a `tracing` subscriber honoring `RUST_LOG`, with span close
/// events so per-pass spans report their duration.
#[cfg(feature = "tracing")]
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_timer(fmt::time::Uptime::default())
        .finish()
        .try_init();
}
