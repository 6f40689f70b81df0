//! File logging
//!
//! The terminal belongs to the TUI, so log records go to a file only.

use std::path::PathBuf;
use std::time::SystemTime;

use log::LevelFilter;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::utils::format_log_time;

/// Environment variable that overrides `[logging] level`
pub const LEVEL_ENV: &str = "SAFEFM_LOG";

pub fn parse_level(name: &str) -> Option<LevelFilter> {
    match name.trim().to_lowercase().as_str() {
        "off" | "none" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Install the global logger. Returns the log file path, or `None` when
/// logging is off.
pub fn init(config: &Config) -> AppResult<Option<PathBuf>> {
    let requested = std::env::var(LEVEL_ENV).unwrap_or_else(|_| config.logging.level.clone());
    let level = parse_level(&requested)
        .ok_or_else(|| AppError::Logging(format!("unknown log level {:?}", requested)))?;
    if level == LevelFilter::Off {
        return Ok(None);
    }

    let Some(path) = config.log_file() else {
        return Ok(None);
    };
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} {}: {}",
                format_log_time(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(fern::log_file(&path)?)
        .apply()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("INFO"), Some(LevelFilter::Info));
        assert_eq!(parse_level(" warning "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }
}
