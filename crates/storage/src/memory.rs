// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::{JobStore, StoreError};
use async_trait::async_trait;
use parking_lot::Mutex;
use sj_core::{Clock, Job, JobId, JobPatch, SystemClock};
use std::collections::HashMap;
use std::sync::Arc;

/// In-process job store. Clones share the same records.
#[derive(Clone)]
pub struct MemoryJobStore<C: Clock = SystemClock> {
    jobs: Arc<Mutex<HashMap<JobId, Job>>>,
    clock: C,
}

impl MemoryJobStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryJobStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryJobStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { jobs: Arc::new(Mutex::new(HashMap::new())), clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.lock().is_empty()
    }

    /// Synchronous patch application shared with the fake store.
    pub(crate) fn apply(&self, id: &JobId, patch: JobPatch) -> Result<Job, StoreError> {
        let now = self.clock.epoch_ms();
        let mut jobs = self.jobs.lock();
        let job = jobs.get_mut(id).ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let kind = patch.name();
        let changed = job.apply(patch, now)?;
        if !changed {
            tracing::trace!(job_id = %id, patch = kind, "patch left job unchanged");
        }
        Ok(job.clone())
    }
}

#[async_trait]
impl<C: Clock> JobStore for MemoryJobStore<C> {
    async fn get(&self, id: &JobId) -> Result<Job, StoreError> {
        self.jobs.lock().get(id).cloned().ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn insert(&self, job: Job) -> Result<(), StoreError> {
        let mut jobs = self.jobs.lock();
        if jobs.contains_key(&job.id) {
            return Err(StoreError::Duplicate(job.id));
        }
        jobs.insert(job.id.clone(), job);
        Ok(())
    }

    async fn update(&self, id: &JobId, patch: JobPatch) -> Result<Job, StoreError> {
        self.apply(id, patch)
    }

    async fn list(&self) -> Result<Vec<Job>, StoreError> {
        let mut jobs: Vec<Job> = self.jobs.lock().values().cloned().collect();
        jobs.sort_by(|a, b| a.created_at_ms.cmp(&b.created_at_ms).then_with(|| a.id.cmp(&b.id)));
        Ok(jobs)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
