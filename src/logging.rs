//! File logging.
//!
//! The terminal belongs to the interface while a session runs, so log records
//! go to `$XDG_CACHE_HOME/segtran/segtran.log` instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;

use crate::config::LogConfig;
use crate::paths;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Parses a level name, falling back to `INFO` for anything unrecognised.
pub fn level_filter(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::INFO)
}

/// Installs the global subscriber writing to the default log file.
///
/// Logging is best effort: on failure the session runs without it. Returns
/// the log path when logging is active.
pub fn init(config: &LogConfig) -> Option<PathBuf> {
    let level = level_filter(&config.level);
    if level == LevelFilter::OFF {
        return None;
    }

    let path = paths::log_file().ok()?;
    match init_at(&path, level) {
        Ok(()) => Some(path),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    }
}

fn init_at(path: &Path, level: LevelFilter) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    TRACING_INIT.get_or_init(|| {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
            .with_max_level(level)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter_parsing() {
        assert_eq!(level_filter("debug"), LevelFilter::DEBUG);
        assert_eq!(level_filter(" WARN "), LevelFilter::WARN);
        assert_eq!(level_filter("off"), LevelFilter::OFF);
        assert_eq!(level_filter("chatty"), LevelFilter::INFO);
    }
}
