// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sj show` - print one stored job

use anyhow::Result;
use serde::Serialize;
use sj_core::{Clock, Job, JobId, SystemClock};
use sj_parse::{explain, reconcile_job};
use sj_storage::{JobStore, StoreError};

use super::Context;
use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat};

#[derive(Serialize)]
struct JobView<'a> {
    #[serde(flatten)]
    job: &'a Job,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

pub async fn handle(ctx: &Context, id: &str) -> Result<()> {
    let job = resolve(&ctx.store(), id).await?;
    display(ctx.format, job)
}

/// Look up a job by exact id, falling back to a unique id prefix.
pub(crate) async fn resolve<S: JobStore>(store: &S, query: &str) -> Result<Job> {
    match store.get(&JobId::from(query)).await {
        Ok(job) => return Ok(job),
        Err(StoreError::NotFound(_) | StoreError::InvalidId(_)) => {}
        Err(e) => return Err(e.into()),
    }
    let mut matches: Vec<Job> = store.list().await?.into_iter().filter(|j| j.id.as_str().starts_with(query)).collect();
    match matches.len() {
        0 => Err(ExitError::new(1, format!("no job matches {query:?}")).into()),
        1 => Ok(matches.remove(0)),
        n => Err(ExitError::usage(format!("{query:?} is ambiguous ({n} jobs match)")).into()),
    }
}

/// Print a job, filling in port-scan fields recoverable from its raw output.
///
/// The reconciled record is only displayed, never written back.
pub(crate) fn display(format: OutputFormat, mut job: Job) -> Result<()> {
    if reconcile_job(&mut job) {
        tracing::debug!(job_id = %job.id, "reconciled port scan on read");
    }
    let note = job.results.report.as_ref().and_then(explain);
    match format {
        OutputFormat::Json => output::print_json(&JobView { job: &job, note }),
        OutputFormat::Text => {
            output::print_job(&job, note.as_deref(), SystemClock.epoch_ms());
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "show_tests.rs"]
mod tests;
