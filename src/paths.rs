//! XDG-style path utilities for configuration and log directories.
//!
//! This module provides consistent path resolution across platforms,
//! preferring XDG Base Directory Specification conventions over
//! OS-specific locations.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "segtran";

/// Returns the configuration directory for segtran.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/segtran` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/segtran` otherwise
pub fn config_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join(APP_DIR)),
        _ => Ok(home_dir()?.join(".config").join(APP_DIR)),
    }
}

/// Returns the cache directory for segtran, where the log file lives.
///
/// Resolution order:
/// 1. `$XDG_CACHE_HOME/segtran` if `XDG_CACHE_HOME` is set
/// 2. `~/.cache/segtran` otherwise
pub fn cache_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CACHE_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join(APP_DIR)),
        _ => Ok(home_dir()?.join(".cache").join(APP_DIR)),
    }
}

/// Path of the session log file.
pub fn log_file() -> Result<PathBuf> {
    Ok(cache_dir()?.join("segtran.log"))
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}
