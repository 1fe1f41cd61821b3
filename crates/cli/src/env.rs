// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

/// Resolve state directory: SJ_STATE_DIR > XDG_STATE_HOME/sj > ~/.local/state/sj
pub fn state_dir() -> Result<PathBuf> {
    if let Some(dir) = non_empty("SJ_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("sj"));
    }
    let home = dirs::home_dir().ok_or_else(|| anyhow!("cannot determine home directory; set SJ_STATE_DIR"))?;
    Ok(home.join(".local/state/sj"))
}

/// Explicit config file path (`SJ_CONFIG`).
pub fn config_path() -> Option<PathBuf> {
    non_empty("SJ_CONFIG").map(PathBuf::from)
}

/// Filter directive for stderr logging (`SJ_LOG`, default `warn`).
pub fn log_filter() -> String {
    non_empty("SJ_LOG").unwrap_or_else(|| "warn".to_string())
}

/// Filter directive for the log file (`SJ_FILE_LOG`, default `info`).
pub fn file_log_filter() -> String {
    non_empty("SJ_FILE_LOG").unwrap_or_else(|| "info".to_string())
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
