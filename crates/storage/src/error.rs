// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use sj_core::{JobId, TransitionError};
use thiserror::Error;

/// Errors from job store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("job not found: {0}")]
    NotFound(JobId),
    #[error("job already exists: {0}")]
    Duplicate(JobId),
    #[error("job id cannot be used as a file name: {0:?}")]
    InvalidId(JobId),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("injected failure: {0}")]
    Injected(String),
}

impl StoreError {
    /// The store refused a status change (as opposed to failing to write).
    pub fn is_transition(&self) -> bool {
        matches!(self, StoreError::Transition(_))
    }
}
