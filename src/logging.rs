//! Log thresholds and console output.
//!
//! The activity log panel filters poller events against the `RUST_LOG`
//! threshold. `watch` and `serve` print through a tracing subscriber instead.

pub use crate::error_classifier::LogLevel;
use std::env;
use tracing_subscriber::{EnvFilter, fmt};

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => LogLevel::Trace,
            log::Level::Debug => LogLevel::Debug,
            log::Level::Info => LogLevel::Info,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Error => LogLevel::Error,
        }
    }
}

/// Threshold from a `RUST_LOG` value.
///
/// Only the first directive counts, and a `target=level` directive contributes
/// its level. Anything unparseable means `Info`.
pub fn threshold_from_directives(directives: &str) -> LogLevel {
    directives
        .split(',')
        .next()
        .and_then(|first| first.rsplit('=').next())
        .and_then(|level| level.trim().parse::<log::Level>().ok())
        .map_or(LogLevel::Info, LogLevel::from)
}

pub fn should_log_with_env(event_level: LogLevel) -> bool {
    let threshold = env::var("RUST_LOG")
        .map(|value| threshold_from_directives(&value))
        .unwrap_or(LogLevel::Info);
    event_level >= threshold
}

/// Installs a stdout subscriber for the non-interactive modes.
///
/// The TUI never calls this: its output goes to the activity log panel.
pub fn init_console_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second init (tests, repeated commands) is harmless.
    let _ = fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_levels() {
        assert_eq!(threshold_from_directives("trace"), LogLevel::Trace);
        assert_eq!(threshold_from_directives("WARN"), LogLevel::Warn);
        assert_eq!(threshold_from_directives("error"), LogLevel::Error);
    }

    #[test]
    fn first_targeted_directive_wins() {
        assert_eq!(
            threshold_from_directives("prospecting_hub=debug,hyper=warn"),
            LogLevel::Debug
        );
    }

    #[test]
    fn garbage_falls_back_to_info() {
        assert_eq!(threshold_from_directives(""), LogLevel::Info);
        assert_eq!(threshold_from_directives("loud"), LogLevel::Info);
    }
}
