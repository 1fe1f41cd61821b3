// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process registry and the start/cancel surface.

use crate::buffer::OutputBuffers;
use crate::error::SupervisorError;
use crate::limits::{ProcessLimits, SupervisorConfig};
use crate::task::{Control, Supervised};
use parking_lot::Mutex;
use sj_core::{JobId, JobPatch, JobStatus};
use sj_storage::JobStore;
use std::collections::HashMap;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::process::Command;
use tokio::sync::{mpsc, oneshot, watch};

/// Cancel reason used by [`Supervisor::kill_all`].
pub const SHUTDOWN_REASON: &str = "supervisor shutting down";

/// A request to run one job's process.
#[derive(Debug, Clone)]
pub struct StartRequest {
    pub job_id: JobId,
    pub executable: String,
    pub args: Vec<String>,
    /// Defaults to the last argument.
    pub target: Option<String>,
    pub limits: ProcessLimits,
}

impl StartRequest {
    pub fn new(job_id: JobId, executable: impl Into<String>, args: Vec<String>) -> Self {
        Self { job_id, executable: executable.into(), args, target: None, limits: ProcessLimits::default() }
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn limits(mut self, limits: ProcessLimits) -> Self {
        self.limits = limits;
        self
    }

    pub(crate) fn resolved_target(&self) -> String {
        match &self.target {
            Some(t) => t.clone(),
            None => self.args.last().cloned().unwrap_or_default(),
        }
    }
}

/// Returned by a successful [`Supervisor::start`].
#[derive(Debug, Clone)]
pub struct Started {
    pub pid: u32,
    exit: watch::Receiver<Option<JobStatus>>,
}

impl Started {
    /// Wait for the supervision task to record a final status.
    pub async fn finished(&mut self) -> Option<JobStatus> {
        match self.exit.wait_for(Option::is_some).await {
            Ok(status) => *status,
            Err(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelOutcome {
    /// A live process was signalled.
    pub killed: bool,
    /// The job is now recorded as cancelled.
    pub recorded: bool,
}

/// Registry record for a running process.
pub(crate) struct ActiveEntry {
    pub(crate) pid: u32,
    pub(crate) generation: u64,
    pub(crate) control: mpsc::Sender<Control>,
    pub(crate) buffers: Arc<Mutex<OutputBuffers>>,
    pub(crate) limits: ProcessLimits,
    pub(crate) exit: watch::Receiver<Option<JobStatus>>,
}

pub(crate) struct Inner<S: JobStore> {
    pub(crate) store: S,
    pub(crate) config: SupervisorConfig,
    pub(crate) registry: Mutex<HashMap<JobId, ActiveEntry>>,
    next_generation: AtomicU64,
}

impl<S: JobStore> Inner<S> {
    /// Drop the entry for `id` if it still belongs to `generation`.
    pub(crate) fn release(&self, id: &JobId, generation: u64) {
        let mut registry = self.registry.lock();
        if registry.get(id).is_some_and(|e| e.generation == generation) {
            registry.remove(id);
        }
    }
}

/// Runs external scan processes and records their outcome.
///
/// Cheap to clone; clones share one registry.
pub struct Supervisor<S: JobStore> {
    pub(crate) inner: Arc<Inner<S>>,
}

impl<S: JobStore> Clone for Supervisor<S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S: JobStore> Supervisor<S> {
    pub fn new(store: S, config: SupervisorConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                config,
                registry: Mutex::new(HashMap::new()),
                next_generation: AtomicU64::new(1),
            }),
        }
    }

    pub fn store(&self) -> &S {
        &self.inner.store
    }

    /// Spawn the job's process and return once it is running.
    pub async fn start(&self, request: StartRequest) -> Result<Started, SupervisorError> {
        let job_id = request.job_id.clone();
        let limits = request.limits;
        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);
        let (control_tx, control_rx) = mpsc::channel(4);
        let (exit_tx, exit_rx) = watch::channel(None);
        let buffers = Arc::new(Mutex::new(OutputBuffers::new(limits.buffer_cap)));

        let spawned = {
            let mut registry = self.inner.registry.lock();
            if registry.contains_key(&job_id) {
                return Err(SupervisorError::AlreadyRunning(job_id));
            }
            let limit = self.inner.config.max_concurrent;
            if limit > 0 && registry.len() >= limit {
                return Err(SupervisorError::AtCapacity { limit });
            }

            let mut command = Command::new(&request.executable);
            command
                .args(&request.args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true);
            command.spawn().map(|child| {
                let pid = child.id().unwrap_or(0);
                registry.insert(
                    job_id.clone(),
                    ActiveEntry {
                        pid,
                        generation,
                        control: control_tx,
                        buffers: Arc::clone(&buffers),
                        limits,
                        exit: exit_rx.clone(),
                    },
                );
                (child, pid, exit_rx)
            })
        };

        let (child, pid, exit_rx) = match spawned {
            Ok(spawned) => spawned,
            Err(source) => {
                tracing::warn!(job_id = %job_id, executable = %request.executable, error = %source, "spawn failed");
                let patch = JobPatch::failed(format!("failed to start {}: {source}", request.executable));
                if let Err(e) = self.inner.store.update(&job_id, patch).await {
                    tracing::warn!(job_id = %job_id, error = %e, "failed to record spawn failure");
                }
                return Err(SupervisorError::SpawnFailure { executable: request.executable, source });
            }
        };
        let started_at = tokio::time::Instant::now();

        tracing::info!(job_id = %job_id, pid, executable = %request.executable, "process started");
        if let Err(e) = self.inner.store.update(&job_id, JobPatch::Started).await {
            tracing::warn!(job_id = %job_id, error = %e, "failed to record running status");
        }

        let supervised = Supervised {
            job_id,
            generation,
            pid,
            executable: request.executable.clone(),
            target: request.resolved_target(),
            limits,
            deadline: limits.timeout.map(|t| started_at + t),
            buffers,
            control: control_rx,
            exit: exit_tx,
        };
        tokio::spawn(supervised.run(Arc::clone(&self.inner), child));

        Ok(Started { pid, exit: exit_rx })
    }

    /// Stop a job's process (if any) and record it as cancelled.
    pub async fn cancel(&self, job_id: &JobId, reason: &str) -> Result<CancelOutcome, SupervisorError> {
        let entry = self.inner.registry.lock().remove(job_id);
        if let Some(entry) = entry {
            let (ack_tx, ack_rx) = oneshot::channel();
            let sent = entry.control.send(Control::Cancel { reason: reason.to_string(), ack: ack_tx }).await;
            if sent.is_ok() {
                if let Ok(recorded) = ack_rx.await {
                    tracing::info!(job_id = %job_id, pid = entry.pid, reason, "job cancelled");
                    return Ok(CancelOutcome { killed: true, recorded });
                }
            }
            // The supervision task finished between lookup and send.
            tracing::debug!(job_id = %job_id, "process exited before cancel was delivered");
        }

        let partial = match self.inner.store.get(job_id).await {
            Ok(job) => job.results.partial_output,
            Err(_) => None,
        };
        match self.inner.store.update(job_id, JobPatch::cancelled(reason, String::new(), partial)).await {
            Ok(_) => Ok(CancelOutcome { killed: false, recorded: true }),
            Err(e) if e.is_transition() => {
                tracing::debug!(job_id = %job_id, error = %e, "job already finished, cancel not recorded");
                Ok(CancelOutcome { killed: false, recorded: false })
            }
            Err(e) => Err(SupervisorError::Persistence(e)),
        }
    }

    /// Cancel every job running at the time of the call. Returns how many.
    pub async fn kill_all(&self) -> usize {
        let ids: Vec<JobId> = self.inner.registry.lock().keys().cloned().collect();
        for id in &ids {
            if let Err(e) = self.cancel(id, SHUTDOWN_REASON).await {
                tracing::warn!(job_id = %id, error = %e, "failed to cancel during shutdown");
            }
        }
        ids.len()
    }

    pub fn has_active(&self, job_id: &JobId) -> bool {
        self.inner.registry.lock().contains_key(job_id)
    }

    pub fn active_count(&self) -> usize {
        self.inner.registry.lock().len()
    }

    /// Pid and limits of a running job.
    pub fn active_process(&self, job_id: &JobId) -> Option<(u32, ProcessLimits)> {
        self.inner.registry.lock().get(job_id).map(|e| (e.pid, e.limits))
    }

    /// Current partial output of a running job.
    pub fn peek_output(&self, job_id: &JobId) -> Option<String> {
        let buffers = self.inner.registry.lock().get(job_id).map(|e| Arc::clone(&e.buffers))?;
        let text = buffers.lock().combined_text();
        Some(text)
    }

    /// Receiver that yields the final status once the job's supervision
    /// ends. `None` when no process is registered for the id.
    pub fn watch(&self, job_id: &JobId) -> Option<watch::Receiver<Option<JobStatus>>> {
        self.inner.registry.lock().get(job_id).map(|e| e.exit.clone())
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
