// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recording job store with failure injection.

use crate::{JobStore, MemoryJobStore, StoreError};
use async_trait::async_trait;
use parking_lot::Mutex;
use sj_core::{FakeClock, Job, JobId, JobPatch, JobStatus};
use std::sync::Arc;

/// One `update` call as seen by the fake store.
#[derive(Debug, Clone)]
pub struct StoreCall {
    pub id: JobId,
    pub patch: JobPatch,
    /// `None` when the update succeeded, else the error text.
    pub error: Option<String>,
}

impl StoreCall {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Default)]
struct FakeState {
    calls: Vec<StoreCall>,
    fail_started: bool,
    fail_partials: bool,
    /// Number of upcoming `Finished` patches to reject.
    fail_finished: usize,
    /// Only reject `Finished` patches carrying this status.
    fail_finished_status: Option<JobStatus>,
}

/// Fake job store for testing. Clones share records and recorded calls.
#[derive(Clone)]
pub struct FakeJobStore {
    records: MemoryJobStore<FakeClock>,
    inner: Arc<Mutex<FakeState>>,
}

impl Default for FakeJobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeJobStore {
    pub fn new() -> Self {
        Self { records: MemoryJobStore::with_clock(FakeClock::new()), inner: Arc::default() }
    }

    pub fn clock(&self) -> &FakeClock {
        self.records.clock()
    }

    /// Reject every `Started` patch.
    pub fn fail_started(&self) {
        self.inner.lock().fail_started = true;
    }

    /// Reject every `Partial` patch.
    pub fn fail_partials(&self) {
        self.inner.lock().fail_partials = true;
    }

    /// Reject the next `count` `Finished` patches.
    pub fn fail_finished(&self, count: usize) {
        let mut state = self.inner.lock();
        state.fail_finished = count;
        state.fail_finished_status = None;
    }

    /// Reject the next `count` `Finished` patches with the given status.
    pub fn fail_finished_with(&self, status: JobStatus, count: usize) {
        let mut state = self.inner.lock();
        state.fail_finished = count;
        state.fail_finished_status = Some(status);
    }

    /// All recorded `update` calls in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner.lock().calls.clone()
    }

    /// Successfully applied patches for one job, in order.
    pub fn applied(&self, id: &str) -> Vec<JobPatch> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| c.id == id && c.succeeded())
            .map(|c| c.patch.clone())
            .collect()
    }

    fn injected_failure(state: &mut FakeState, patch: &JobPatch) -> Option<String> {
        match patch {
            JobPatch::Started if state.fail_started => Some("started write rejected".to_string()),
            JobPatch::Partial { .. } if state.fail_partials => Some("partial write rejected".to_string()),
            JobPatch::Finished { status, .. }
                if state.fail_finished > 0 && state.fail_finished_status.is_none_or(|s| s == *status) =>
            {
                state.fail_finished -= 1;
                Some(format!("{status} write rejected"))
            }
            _ => None,
        }
    }
}

#[async_trait]
impl JobStore for FakeJobStore {
    async fn get(&self, id: &JobId) -> Result<Job, StoreError> {
        self.records.get(id).await
    }

    async fn insert(&self, job: Job) -> Result<(), StoreError> {
        self.records.insert(job).await
    }

    async fn update(&self, id: &JobId, patch: JobPatch) -> Result<Job, StoreError> {
        // Held across apply so recorded order matches applied order.
        let mut state = self.inner.lock();
        let result = match Self::injected_failure(&mut state, &patch) {
            Some(reason) => Err(StoreError::Injected(reason)),
            None => self.records.apply(id, patch.clone()),
        };
        state.calls.push(StoreCall {
            id: id.clone(),
            patch,
            error: result.as_ref().err().map(|e| e.to_string()),
        });
        result
    }

    async fn list(&self) -> Result<Vec<Job>, StoreError> {
        self.records.list().await
    }
}
