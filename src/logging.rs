use crate::error_classifier::LogLevel;
use env_logger::{Builder, Env, Target};
use std::env;
use std::fs::OpenOptions;
use std::path::Path;

/// Where log records go for the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// Plain stderr, used by one-shot commands.
    Stderr,
    /// Append to a file, used while the TUI owns the terminal.
    File,
}

/// Install the global logger. `RUST_LOG` controls the filter, `info` by default.
///
/// Falls back to stderr when the log file cannot be opened.
pub fn init_logging(sink: LogSink, log_file: &Path) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_secs();

    if sink == LogSink::File {
        if let Some(parent) = log_file.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match OpenOptions::new().create(true).append(true).open(log_file) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Cannot open log file {}: {}", log_file.display(), e),
        }
    }

    // A second initialisation (e.g. in tests) is harmless.
    let _ = builder.try_init();
}

pub fn get_rust_log_level() -> LogLevel {
    let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    parse_rust_log_level(&rust_log)
}

pub fn parse_rust_log_level(rust_log: &str) -> LogLevel {
    let level_str = rust_log
        .split(',')
        .next()
        .unwrap_or(rust_log)
        .split('=')
        .next_back()
        .unwrap_or(rust_log)
        .to_lowercase();

    match level_str.as_str() {
        "trace" => LogLevel::Trace,
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" | "warning" => LogLevel::Warn,
        "error" => LogLevel::Error,
        _ => LogLevel::Info,
    }
}

pub fn should_log(event_level: LogLevel, threshold: LogLevel) -> bool {
    event_level >= threshold
}

/// Whether a record at `event_level` passes the `RUST_LOG` threshold.
pub fn should_log_with_env(event_level: LogLevel) -> bool {
    should_log(event_level, get_rust_log_level())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rust_log_level() {
        assert_eq!(parse_rust_log_level("debug"), LogLevel::Debug);
        assert_eq!(parse_rust_log_level("warning"), LogLevel::Warn);
        assert_eq!(parse_rust_log_level("ERROR"), LogLevel::Error);

        // Module-specific formats keep the first directive's level
        assert_eq!(parse_rust_log_level("hotelsat_admin=debug"), LogLevel::Debug);
        assert_eq!(
            parse_rust_log_level("hotelsat_admin=trace,reqwest=info"),
            LogLevel::Trace
        );

        assert_eq!(parse_rust_log_level("nonsense"), LogLevel::Info);
    }

    #[test]
    fn test_should_log() {
        assert!(should_log(LogLevel::Error, LogLevel::Debug));
        assert!(should_log(LogLevel::Warn, LogLevel::Warn));
        assert!(!should_log(LogLevel::Info, LogLevel::Error));
    }
}
