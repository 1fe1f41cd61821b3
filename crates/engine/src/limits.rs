// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
pub const DEFAULT_BUFFER_CAP: usize = 200_000;
pub const DEFAULT_SNAPSHOT_INTERVAL: Duration = Duration::from_secs(2);
pub const DEFAULT_SNAPSHOT_CAP: usize = 50_000;
pub const DEFAULT_KILL_GRACE: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Per-process resource bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessLimits {
    /// Hard wall-clock bound; `None` lets the process run indefinitely.
    pub timeout: Option<Duration>,
    /// Bytes retained per output stream.
    pub buffer_cap: usize,
    /// Zero disables partial-output snapshots.
    pub snapshot_interval: Duration,
    /// Bytes of stdout written per snapshot.
    pub snapshot_cap: usize,
    /// Delay between SIGTERM and SIGKILL; `None` never escalates.
    pub kill_grace: Option<Duration>,
}

impl Default for ProcessLimits {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            buffer_cap: DEFAULT_BUFFER_CAP,
            snapshot_interval: DEFAULT_SNAPSHOT_INTERVAL,
            snapshot_cap: DEFAULT_SNAPSHOT_CAP,
            kill_grace: Some(DEFAULT_KILL_GRACE),
        }
    }
}

impl ProcessLimits {
    sj_core::setters! {
        option { timeout: Duration, kill_grace: Duration }
    }

    pub fn unbounded(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn buffer_cap(mut self, cap: usize) -> Self {
        self.buffer_cap = cap;
        self
    }

    pub fn snapshot(mut self, interval: Duration, cap: usize) -> Self {
        self.snapshot_interval = interval;
        self.snapshot_cap = cap;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupervisorConfig {
    /// Maximum simultaneously running processes; 0 means unbounded.
    pub max_concurrent: usize,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self { max_concurrent: DEFAULT_MAX_CONCURRENT }
    }
}
