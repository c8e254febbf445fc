//! Logger initialization.
//!
//! Logs always go to stderr; stdout is reserved for resolved names.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter, Record};

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first, then `level` is applied to this crate and as the
/// global default. HTTP client internals are capped at info and `hickory_proto`
/// at error.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Show resolver selection and progress
/// domain_cname --log-level info < domains.txt
///
/// # Machine-readable logs
/// domain_cname --log-level info --log-format json < domains.txt 2> log.jsonl
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder
        .target(env_logger::Target::Stderr)
        .filter_level(level)
        .filter_module("reqwest", LevelFilter::Info)
        .filter_module("hyper", LevelFilter::Info)
        // Malformed datagrams from public resolvers are routine
        .filter_module("hickory_proto", LevelFilter::Error)
        .filter_module("domain_cname", level);

    match format {
        LogFormat::Json => builder.format(|buf, record| {
            writeln!(
                buf,
                "{}",
                json_line(chrono::Utc::now().timestamp_millis(), record)
            )
        }),
        LogFormat::Plain => builder.format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                colored_level(record.level()),
                record.target().cyan(),
                record.args()
            )
        }),
    };

    builder.try_init()?;
    Ok(())
}

fn colored_level(level: Level) -> ColoredString {
    let label = level.as_str();
    match level {
        Level::Error => label.red(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.purple(),
    }
}

/// One JSON object per record: `{"ts":..,"level":..,"target":..,"msg":..}`.
fn json_line(ts_millis: i64, record: &Record<'_>) -> String {
    serde_json::json!({
        "ts": ts_millis,
        "level": record.level().as_str(),
        "target": record.target(),
        "msg": record.args().to_string(),
    })
    .to_string()
}
