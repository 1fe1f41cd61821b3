// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job supervision task.
//!
//! Owns the child process, its timers and its output pumps. The registry
//! only holds a control channel into this task.

use crate::buffer::{OutputBuffers, Stream};
use crate::limits::ProcessLimits;
use crate::signal;
use crate::supervisor::Inner;
use parking_lot::Mutex;
use sj_core::{JobId, JobPatch, JobResults, JobStatus};
use sj_storage::JobStore;
use std::process::ExitStatus;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep_until, Instant, MissedTickBehavior};

pub(crate) const TIMEOUT_REASON: &str = "process terminated: exceeded time budget";
pub(crate) const SIGTERM_REASON: &str = "process terminated by signal 15";

/// How long to wait for the output pumps after the process exits. Output
/// pipes can outlive the child when it leaves grandchildren behind.
const PUMP_DRAIN: Duration = Duration::from_secs(2);

const READ_CHUNK: usize = 8 * 1024;

pub(crate) enum Control {
    /// Stop the process and record the job as cancelled. The ack carries
    /// whether the cancelled status was written.
    Cancel { reason: String, ack: oneshot::Sender<bool> },
}

struct Cancellation {
    reason: String,
    recorded: bool,
}

/// Everything the supervision task needs besides the child itself.
pub(crate) struct Supervised {
    pub(crate) job_id: JobId,
    pub(crate) generation: u64,
    pub(crate) pid: u32,
    pub(crate) executable: String,
    pub(crate) target: String,
    pub(crate) limits: ProcessLimits,
    pub(crate) deadline: Option<Instant>,
    pub(crate) buffers: Arc<Mutex<OutputBuffers>>,
    pub(crate) control: mpsc::Receiver<Control>,
    pub(crate) exit: watch::Sender<Option<JobStatus>>,
}

fn spawn_pump<R>(reader: Option<R>, buffers: Arc<Mutex<OutputBuffers>>, stream: Stream) -> Option<JoinHandle<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut reader = reader?;
    Some(tokio::spawn(async move {
        let mut chunk = vec![0u8; READ_CHUNK];
        loop {
            match reader.read(&mut chunk).await {
                Ok(0) => break,
                Ok(n) => buffers.lock().push(stream, &chunk[..n]),
                Err(e) => {
                    tracing::debug!(?stream, error = %e, "output pipe read failed");
                    break;
                }
            }
        }
    }))
}

/// Instant far enough away to stand in for "never".
fn never() -> Instant {
    Instant::now() + Duration::from_secs(365 * 24 * 60 * 60)
}

impl Supervised {
    pub(crate) async fn run<S: JobStore>(mut self, inner: Arc<Inner<S>>, mut child: Child) {
        let stdout = spawn_pump(child.stdout.take(), Arc::clone(&self.buffers), Stream::Stdout);
        let stderr = spawn_pump(child.stderr.take(), Arc::clone(&self.buffers), Stream::Stderr);

        let interval = self.limits.snapshot_interval;
        let mut snapshots_on = !interval.is_zero();
        let period = if snapshots_on { interval } else { Duration::from_secs(3600) };
        let mut snapshots = interval_at(Instant::now() + period, period);
        snapshots.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut timed_out = false;
        let mut kill_at: Option<Instant> = None;
        let mut cancellation: Option<Cancellation> = None;

        let waited = loop {
            tokio::select! {
                biased;

                Some(control) = self.control.recv(), if cancellation.is_none() => {
                    let Control::Cancel { reason, ack } = control;
                    signal::terminate(self.pid);
                    kill_at = self.limits.kill_grace.map(|g| Instant::now() + g);
                    snapshots_on = false;
                    let recorded = self.record_cancel(&inner, &reason).await;
                    let _ = ack.send(recorded);
                    cancellation = Some(Cancellation { reason, recorded });
                }

                status = child.wait() => break status,

                _ = sleep_until(self.deadline.unwrap_or_else(never)),
                    if self.deadline.is_some() && !timed_out && cancellation.is_none() =>
                {
                    tracing::info!(job_id = %self.job_id, pid = self.pid, "time budget exceeded, terminating");
                    timed_out = true;
                    snapshots_on = false;
                    signal::terminate(self.pid);
                    kill_at = self.limits.kill_grace.map(|g| Instant::now() + g);
                }

                _ = sleep_until(kill_at.unwrap_or_else(never)), if kill_at.is_some() => {
                    tracing::warn!(job_id = %self.job_id, pid = self.pid, "process ignored SIGTERM, killing");
                    kill_at = None;
                    if let Err(e) = child.start_kill() {
                        tracing::warn!(job_id = %self.job_id, error = %e, "failed to kill process");
                    }
                }

                _ = snapshots.tick(), if snapshots_on => {
                    let output = self.buffers.lock().snapshot_text(self.limits.snapshot_cap);
                    if let Err(e) = inner.store.update(&self.job_id, JobPatch::Partial { output }).await {
                        tracing::warn!(job_id = %self.job_id, error = %e, "failed to write partial output");
                    }
                }
            }
        };

        for pump in [stdout, stderr].into_iter().flatten() {
            self.drain(pump).await;
        }
        inner.release(&self.job_id, self.generation);

        let status = self.finish(&inner, waited, timed_out, cancellation).await;
        let _ = self.exit.send(Some(status));
    }

    async fn drain(&self, mut pump: JoinHandle<()>) {
        if tokio::time::timeout(PUMP_DRAIN, &mut pump).await.is_err() {
            tracing::debug!(job_id = %self.job_id, "output pipe still open after exit, abandoning");
            pump.abort();
        }
    }

    /// Current raw text and partial-output tail.
    fn captured(&self) -> (String, String) {
        let buffers = self.buffers.lock();
        (buffers.combined_text(), buffers.snapshot_text(self.limits.snapshot_cap))
    }

    async fn record_cancel<S: JobStore>(&self, inner: &Inner<S>, reason: &str) -> bool {
        let (raw, partial) = self.captured();
        match inner.store.update(&self.job_id, JobPatch::cancelled(reason, raw, Some(partial))).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(job_id = %self.job_id, error = %e, "failed to record cancellation, will retry on exit");
                false
            }
        }
    }

    /// Write the terminal status. Returns the status actually recorded
    /// (or intended, when even the fallback write failed).
    async fn finish<S: JobStore>(
        &self,
        inner: &Inner<S>,
        waited: std::io::Result<ExitStatus>,
        timed_out: bool,
        cancellation: Option<Cancellation>,
    ) -> JobStatus {
        let (raw, partial) = self.captured();

        let exit = match waited {
            Ok(exit) => exit,
            Err(e) => {
                tracing::error!(job_id = %self.job_id, error = %e, "failed to wait for process");
                let results = JobResults {
                    raw_output: raw,
                    partial_output: Some(partial),
                    error: Some(format!("failed to wait for process: {e}")),
                    ..JobResults::default()
                };
                return self.persist(inner, JobStatus::Failed, results).await;
            }
        };
        tracing::info!(job_id = %self.job_id, pid = self.pid, exit = %signal::describe(&exit), "process exited");

        if let Some(cancellation) = cancellation {
            if cancellation.recorded {
                return JobStatus::Cancelled;
            }
            let results = JobResults::cancelled(cancellation.reason, raw, Some(partial));
            return self.persist(inner, JobStatus::Cancelled, results).await;
        }

        if timed_out || signal::terminated_by_sigterm(&exit) {
            let reason = if timed_out { TIMEOUT_REASON } else { SIGTERM_REASON };
            let results = JobResults { exit_code: exit.code(), ..JobResults::cancelled(reason, raw, Some(partial)) };
            return self.persist(inner, JobStatus::Cancelled, results).await;
        }

        let report = sj_parse::parse_output(&self.executable, &raw, &self.target);
        let (status, error) = if raw.trim().is_empty() {
            (JobStatus::Failed, Some(format!("process produced no output ({})", signal::describe(&exit))))
        } else {
            (JobStatus::Completed, None)
        };
        let results = JobResults {
            report: Some(report),
            raw_output: raw,
            partial_output: None,
            error,
            cancelled: false,
            exit_code: exit.code(),
        };
        self.persist(inner, status, results).await
    }

    async fn persist<S: JobStore>(&self, inner: &Inner<S>, status: JobStatus, results: JobResults) -> JobStatus {
        let raw = results.raw_output.clone();
        let partial = results.partial_output.clone();
        let err = match inner.store.update(&self.job_id, JobPatch::finished(status, results)).await {
            Ok(job) => {
                tracing::info!(job_id = %self.job_id, status = %job.status, "job finished");
                return job.status;
            }
            Err(e) => e,
        };
        if err.is_transition() {
            tracing::warn!(job_id = %self.job_id, %status, error = %err, "job already finished elsewhere");
            return self.stored_status(inner, status).await;
        }

        tracing::warn!(job_id = %self.job_id, %status, error = %err, "failed to record result, writing fallback");
        let fallback = JobResults {
            raw_output: raw,
            partial_output: partial,
            error: Some(format!("persistence failed: {err}")),
            ..JobResults::default()
        };
        match inner.store.update(&self.job_id, JobPatch::finished(JobStatus::Failed, fallback)).await {
            Ok(job) => job.status,
            Err(e) if e.is_transition() => self.stored_status(inner, status).await,
            Err(e) => {
                tracing::error!(job_id = %self.job_id, error = %e, "fallback write failed, job result lost");
                status
            }
        }
    }

    /// Status the store holds after it refused our terminal write.
    async fn stored_status<S: JobStore>(&self, inner: &Inner<S>, intended: JobStatus) -> JobStatus {
        match inner.store.get(&self.job_id).await {
            Ok(job) => job.status,
            Err(e) => {
                tracing::warn!(job_id = %self.job_id, error = %e, "failed to read back stored status");
                intended
            }
        }
    }
}
