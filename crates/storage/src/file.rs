// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One JSON file per job under a state directory.
//!
//! Writes go to a temporary file that is renamed over the record, so a crash
//! never leaves a half-written job behind. Every read-modify-write holds an
//! exclusive lock on `<id>.lock`, so separate `sj` processes sharing a state
//! directory see each other's terminal writes.

use crate::{JobStore, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use sj_core::{Clock, Job, JobId, JobPatch, SystemClock};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Current on-disk record schema version
pub const CURRENT_RECORD_VERSION: u32 = 1;

/// On-disk envelope around a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredJob {
    #[serde(rename = "v")]
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub job: Job,
}

/// File-backed job store. Clones share the in-process write lock; the
/// per-job lock file covers other processes.
#[derive(Clone)]
pub struct FileJobStore<C: Clock = SystemClock> {
    dir: PathBuf,
    // Serializes read-modify-write cycles across all jobs.
    write_lock: Arc<Mutex<()>>,
    clock: C,
}

impl FileJobStore<SystemClock> {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_clock(dir, SystemClock)
    }
}

impl<C: Clock> FileJobStore<C> {
    pub fn with_clock(dir: impl Into<PathBuf>, clock: C) -> Self {
        Self { dir: dir.into(), write_lock: Arc::new(Mutex::new(())), clock }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &JobId) -> Result<PathBuf, StoreError> {
        let name = id.as_str();
        let usable = !name.is_empty()
            && !name.starts_with('.')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !usable {
            return Err(StoreError::InvalidId(id.clone()));
        }
        Ok(self.dir.join(format!("{name}.json")))
    }

    /// Blocks until this process holds `<id>.lock`. Released when the file drops.
    async fn lock_job(&self, id: &JobId) -> Result<File, StoreError> {
        let path = self.path_for(id)?.with_extension("lock");
        tokio::fs::create_dir_all(&self.dir).await?;
        let file = tokio::task::spawn_blocking(move || -> std::io::Result<File> {
            let file = std::fs::OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(false)
                .open(&path)?;
            file.lock_exclusive()?;
            Ok(file)
        })
        .await
        .map_err(std::io::Error::other)??;
        Ok(file)
    }

    async fn read(&self, id: &JobId) -> Result<Job, StoreError> {
        let path = self.path_for(id)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        let stored: StoredJob = serde_json::from_slice(&bytes)?;
        Ok(stored.job)
    }

    async fn write(&self, job: &Job) -> Result<(), StoreError> {
        let path = self.path_for(&job.id)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let stored = StoredJob { version: CURRENT_RECORD_VERSION, saved_at: Utc::now(), job: job.clone() };
        let bytes = serde_json::to_vec_pretty(&stored)?;
        // Unique per writer so concurrent processes never share a temp file.
        let seq = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp = path.with_extension(format!("json.{}.{seq}.tmp", std::process::id()));
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl<C: Clock> JobStore for FileJobStore<C> {
    async fn get(&self, id: &JobId) -> Result<Job, StoreError> {
        self.read(id).await
    }

    async fn insert(&self, job: Job) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let _file_lock = self.lock_job(&job.id).await?;
        match self.read(&job.id).await {
            Ok(_) => return Err(StoreError::Duplicate(job.id)),
            Err(StoreError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }
        self.write(&job).await
    }

    async fn update(&self, id: &JobId, patch: JobPatch) -> Result<Job, StoreError> {
        let _guard = self.write_lock.lock().await;
        let _file_lock = self.lock_job(id).await?;
        let mut job = self.read(id).await?;
        if job.apply(patch, self.clock.epoch_ms())? {
            self.write(&job).await?;
        }
        Ok(job)
    }

    async fn list(&self) -> Result<Vec<Job>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut jobs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let parsed = tokio::fs::read(&path)
                .await
                .map_err(StoreError::from)
                .and_then(|bytes| serde_json::from_slice::<StoredJob>(&bytes).map_err(StoreError::from));
            match parsed {
                Ok(stored) => jobs.push(stored.job),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable job record"),
            }
        }
        jobs.sort_by(|a, b| a.created_at_ms.cmp(&b.created_at_ms).then_with(|| a.id.cmp(&b.id)));
        Ok(jobs)
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
