// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use sj_core::JobId;
use sj_storage::StoreError;
use thiserror::Error;

/// Errors returned to the caller of [`crate::Supervisor`] operations.
///
/// Anything that goes wrong after `start` has returned becomes a terminal
/// job status instead.
#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("job {0} already has a running process")]
    AlreadyRunning(JobId),
    #[error("too many running jobs (limit {limit})")]
    AtCapacity { limit: usize },
    #[error("failed to spawn {executable}: {source}")]
    SpawnFailure {
        executable: String,
        #[source]
        source: std::io::Error,
    },
    #[error("job store error: {0}")]
    Persistence(#[from] StoreError),
}
