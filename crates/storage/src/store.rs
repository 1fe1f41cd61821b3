// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::StoreError;
use async_trait::async_trait;
use sj_core::{Job, JobId, JobPatch};

/// Persistent job records.
///
/// Implementations must apply each patch with [`Job::apply`] inside one
/// critical section so status monotonicity holds under concurrent writers.
#[async_trait]
pub trait JobStore: Clone + Send + Sync + 'static {
    async fn get(&self, id: &JobId) -> Result<Job, StoreError>;

    /// Add a new job. Fails with [`StoreError::Duplicate`] if the id exists.
    async fn insert(&self, job: Job) -> Result<(), StoreError>;

    /// Apply a patch and return the job as stored afterwards.
    async fn update(&self, id: &JobId, patch: JobPatch) -> Result<Job, StoreError>;

    /// All jobs, oldest first.
    async fn list(&self) -> Result<Vec<Job>, StoreError>;
}
