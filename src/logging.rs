//! Log levels and the `RUST_LOG` threshold.

use log::LevelFilter;
use std::env;
use std::str::FromStr;

/// Target used for activity-log records and `RUST_LOG` directives.
pub const LOG_TARGET: &str = "equipment_visualizer";

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, strum::EnumString, strum::Display,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    #[strum(serialize = "warn", serialize = "warning")]
    Warn = 3,
    Error = 4,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::Level::Trace,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        log::Level::from(level).to_level_filter()
    }
}

pub fn get_rust_log_level() -> LogLevel {
    env::var("RUST_LOG")
        .map(|value| parse_rust_log_level(&value))
        .unwrap_or(LogLevel::Info)
}

/// Threshold from a `RUST_LOG` value such as `warn` or
/// `equipment_visualizer=debug,hyper=info`. A directive naming this crate
/// wins over a bare level; anything unparsable means `Info`.
pub fn parse_rust_log_level(rust_log: &str) -> LogLevel {
    let mut global = None;
    for directive in rust_log.split(',').map(str::trim) {
        match directive.split_once('=') {
            Some((target, level)) if target == LOG_TARGET => {
                if let Ok(level) = LogLevel::from_str(level) {
                    return level;
                }
            }
            Some(_) => {}
            None => global = global.or(LogLevel::from_str(directive).ok()),
        }
    }
    global.unwrap_or(LogLevel::Info)
}

pub fn should_log(event_level: LogLevel, threshold: LogLevel) -> bool {
    event_level >= threshold
}

pub fn should_log_with_env(event_level: LogLevel) -> bool {
    should_log(event_level, get_rust_log_level())
}

/// Caps the `log` facade at the `RUST_LOG` threshold.
pub fn init_max_level() {
    log::set_max_level(get_rust_log_level().into());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_levels_parse_case_insensitively() {
        assert_eq!(parse_rust_log_level("debug"), LogLevel::Debug);
        assert_eq!(parse_rust_log_level("WARN"), LogLevel::Warn);
        assert_eq!(parse_rust_log_level("warning"), LogLevel::Warn);
        assert_eq!(parse_rust_log_level("trace"), LogLevel::Trace);
        assert_eq!(parse_rust_log_level("invalid"), LogLevel::Info);
    }

    #[test]
    fn crate_directive_beats_global_level() {
        assert_eq!(
            parse_rust_log_level("error,equipment_visualizer=debug"),
            LogLevel::Debug
        );
        assert_eq!(parse_rust_log_level("hyper=trace,warn"), LogLevel::Warn);
        assert_eq!(parse_rust_log_level("hyper=trace"), LogLevel::Info);
    }

    #[test]
    fn threshold_comparison() {
        assert!(should_log(LogLevel::Error, LogLevel::Debug));
        assert!(should_log(LogLevel::Warn, LogLevel::Warn));
        assert!(!should_log(LogLevel::Debug, LogLevel::Error));
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::Warn);
    }
}
