// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Optional TOML configuration and per-tool launch profiles.
//!
//! Limits resolve in layers: engine defaults, then the tool's built-in
//! values, then `[limits]`, then `[tools.<name>]`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use sj_core::{render_args, Tool};
use sj_engine::{ProcessLimits, SupervisorConfig};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 0 means unbounded.
    pub max_concurrent: Option<usize>,
    pub limits: LimitOverrides,
    pub tools: HashMap<String, ToolOverride>,
}

/// Limit values as written in the config file. Absent keys keep the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LimitOverrides {
    /// 0 disables the timeout.
    pub timeout_ms: Option<u64>,
    pub buffer_cap: Option<usize>,
    /// 0 disables partial-output snapshots.
    pub snapshot_interval_ms: Option<u64>,
    pub snapshot_cap: Option<usize>,
    /// 0 disables SIGKILL escalation.
    pub kill_grace_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolOverride {
    pub executable: Option<String>,
    pub args: Option<Vec<String>>,
    #[serde(flatten)]
    pub limits: LimitOverrides,
}

/// Everything needed to launch one tool against one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub executable: String,
    /// Argument template containing `{target}`.
    pub args: Vec<String>,
    pub limits: ProcessLimits,
}

impl Profile {
    pub fn render(&self, target: &str) -> Vec<String> {
        render_args(&self.args, target)
    }
}

impl LimitOverrides {
    pub fn apply(&self, mut limits: ProcessLimits) -> ProcessLimits {
        if let Some(ms) = self.timeout_ms {
            if ms == 0 {
                tracing::warn!("timeout_ms = 0: processes will run without a time limit");
                limits.timeout = None;
            } else {
                limits.timeout = Some(Duration::from_millis(ms));
            }
        }
        if let Some(cap) = self.buffer_cap {
            limits.buffer_cap = cap;
        }
        if let Some(ms) = self.snapshot_interval_ms {
            limits.snapshot_interval = Duration::from_millis(ms);
        }
        if let Some(cap) = self.snapshot_cap {
            limits.snapshot_cap = cap;
        }
        if let Some(ms) = self.kill_grace_ms {
            limits.kill_grace = (ms > 0).then(|| Duration::from_millis(ms));
        }
        limits
    }
}

impl Config {
    /// Load `path` if it exists; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
        };
        let config: Config = toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))?;
        for name in config.tools.keys() {
            if name.parse::<Tool>().is_err() {
                tracing::warn!(tool = %name, "ignoring profile for unknown tool");
            }
        }
        Ok(config)
    }

    /// `SJ_CONFIG`, else `<state_dir>/config.toml`.
    pub fn path(state_dir: &Path) -> PathBuf {
        crate::env::config_path().unwrap_or_else(|| state_dir.join("config.toml"))
    }

    pub fn supervisor(&self) -> SupervisorConfig {
        match self.max_concurrent {
            Some(max_concurrent) => SupervisorConfig { max_concurrent },
            None => SupervisorConfig::default(),
        }
    }

    /// Limits for an executable with no tool profile.
    pub fn base_limits(&self) -> ProcessLimits {
        self.limits.apply(ProcessLimits::default())
    }

    pub fn profile(&self, tool: Tool) -> Profile {
        let mut limits = ProcessLimits::default().timeout(Duration::from_millis(tool.default_timeout_ms()));
        if let Some(cap) = tool.default_buffer_cap() {
            limits.buffer_cap = cap;
        }
        let mut limits = self.limits.apply(limits);

        let mut executable = tool.name().to_string();
        let mut args: Vec<String> = tool.default_args().iter().map(|a| a.to_string()).collect();
        if let Some(custom) = self.tools.get(tool.name()) {
            limits = custom.limits.apply(limits);
            if let Some(exe) = &custom.executable {
                executable.clone_from(exe);
            }
            if let Some(custom_args) = &custom.args {
                args.clone_from(custom_args);
            }
        }
        Profile { executable, args, limits }
    }

    /// Limits for an arbitrary executable: its tool profile if it has one.
    pub fn limits_for(&self, executable: &str) -> ProcessLimits {
        match Tool::from_executable(executable) {
            Some(tool) => self.profile(tool).limits,
            None => self.base_limits(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
