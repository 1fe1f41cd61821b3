// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job record and its status state machine.
//!
//! A job is mutated only through [`JobPatch`] values applied with
//! [`Job::apply`], which refuses every transition out of a terminal state
//! other than re-finishing with the same status.

pub use crate::id::JobId;
use crate::report::ScanReport;
use crate::tool::Tool;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// Completed, failed and cancelled jobs never change status again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown job status: {0}")]
pub struct UnknownStatus(pub String);

impl From<String> for UnknownStatus {
    fn from(s: String) -> Self {
        Self(s)
    }
}

crate::str_enum! {
    JobStatus: UnknownStatus {
        Pending => "pending",
        Running => "running",
        Completed => "completed",
        Failed => "failed",
        Cancelled => "cancelled",
    }
}

/// Everything a finished (or finishing) job produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<ScanReport>,
    #[serde(default)]
    pub raw_output: String,
    /// Most recent stdout tail, written while the process runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl JobResults {
    /// Results of a job that was stopped before producing a report.
    pub fn cancelled(reason: impl Into<String>, raw_output: String, partial: Option<String>) -> Self {
        Self {
            raw_output,
            partial_output: partial,
            error: Some(reason.into()),
            cancelled: true,
            ..Self::default()
        }
    }

    /// Results of a job that could not run or could not be recorded.
    pub fn failed(error: impl Into<String>) -> Self {
        Self { error: Some(error.into()), ..Self::default() }
    }
}

/// A single mutation of a stored job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobPatch {
    /// The supervisor accepted the job and spawned its process.
    Started,
    /// Periodic snapshot of the process's recent output.
    Partial { output: String },
    /// The job reached a terminal status.
    Finished { status: JobStatus, results: JobResults },
}

impl JobPatch {
    pub fn finished(status: JobStatus, results: JobResults) -> Self {
        JobPatch::Finished { status, results }
    }

    pub fn cancelled(reason: impl Into<String>, raw_output: String, partial: Option<String>) -> Self {
        Self::finished(JobStatus::Cancelled, JobResults::cancelled(reason, raw_output, partial))
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self::finished(JobStatus::Failed, JobResults::failed(error))
    }

    pub fn name(&self) -> &'static str {
        match self {
            JobPatch::Started => "started",
            JobPatch::Partial { .. } => "partial",
            JobPatch::Finished { .. } => "finished",
        }
    }
}

/// A patch that would move a job out of a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid job transition: {from} -> {to}")]
pub struct TransitionError {
    pub from: JobStatus,
    pub to: JobStatus,
}

/// A stored scan job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub tool: String,
    pub executable: String,
    #[serde(default)]
    pub args: Vec<String>,
    pub target: String,
    pub status: JobStatus,
    #[serde(default)]
    pub results: JobResults,
    pub created_at_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at_ms: Option<u64>,
    pub updated_at_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at_ms: Option<u64>,
}

impl Job {
    /// Create a pending job from a spec.
    pub fn new(spec: JobSpec, now_ms: u64) -> Self {
        let tool = match spec.tool {
            Some(name) => name,
            None => Tool::from_executable(&spec.executable)
                .map(|t| t.name().to_string())
                .unwrap_or_else(|| spec.executable.clone()),
        };
        let target = if spec.target.is_empty() {
            spec.args.last().cloned().unwrap_or_default()
        } else {
            spec.target
        };
        Self {
            id: spec.id.unwrap_or_else(JobId::generate),
            tool,
            executable: spec.executable,
            args: spec.args,
            target,
            status: JobStatus::Pending,
            results: JobResults::default(),
            created_at_ms: now_ms,
            started_at_ms: None,
            updated_at_ms: now_ms,
            completed_at_ms: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Apply a patch. Returns `Ok(true)` when the job changed.
    pub fn apply(&mut self, patch: JobPatch, now_ms: u64) -> Result<bool, TransitionError> {
        match patch {
            JobPatch::Started => match self.status {
                JobStatus::Pending => {
                    self.status = JobStatus::Running;
                    self.started_at_ms = Some(now_ms);
                    self.updated_at_ms = now_ms;
                    Ok(true)
                }
                JobStatus::Running => Ok(false),
                from => Err(TransitionError { from, to: JobStatus::Running }),
            },
            JobPatch::Partial { output } => {
                if self.is_terminal() {
                    return Ok(false);
                }
                self.results.partial_output = Some(output);
                self.updated_at_ms = now_ms;
                Ok(true)
            }
            JobPatch::Finished { status, results } => {
                if !status.is_terminal() || (self.is_terminal() && self.status != status) {
                    return Err(TransitionError { from: self.status, to: status });
                }
                self.status = status;
                self.results = results;
                self.updated_at_ms = now_ms;
                self.completed_at_ms = Some(now_ms);
                Ok(true)
            }
        }
    }
}

/// Parameters for creating a job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSpec {
    pub id: Option<JobId>,
    pub tool: Option<String>,
    pub executable: String,
    pub args: Vec<String>,
    /// Empty means "use the last argument".
    pub target: String,
}

impl JobSpec {
    pub fn builder(executable: impl Into<String>) -> JobSpecBuilder {
        JobSpecBuilder { executable: executable.into(), ..JobSpecBuilder::default() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct JobSpecBuilder {
    id: Option<JobId>,
    tool: Option<String>,
    executable: String,
    args: Vec<String>,
    target: String,
}

impl JobSpecBuilder {
    crate::setters! {
        into { target: String }
        option { id: JobId, tool: String }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> JobSpec {
        JobSpec {
            id: self.id,
            tool: self.tool,
            executable: self.executable,
            args: self.args,
            target: self.target,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
