// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sj scan` and `sj run` - launch a job and wait for it in the foreground

use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Args;
use sj_core::{normalize_host, injection_url, Clock, Job, JobSpec, JobStatus, SystemClock, Tool};
use sj_engine::{ProcessLimits, StartRequest, Supervisor, SupervisorError};
use sj_storage::JobStore;

use super::{show, Context};
use crate::color;
use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct ScanArgs {
    /// Scanner to run (nmap, nikto, sslscan, sqlmap)
    pub tool: Tool,

    /// Host or URL to scan
    pub target: String,

    /// Override the profile's timeout (0 runs without a limit)
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Args)]
pub struct RunArgs {
    /// Target recorded on the job (defaults to the last argument)
    #[arg(long)]
    pub target: Option<String>,

    /// Timeout in milliseconds (0 runs without a limit)
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Executable and its arguments
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

pub async fn scan(ctx: &Context, args: ScanArgs) -> Result<()> {
    let target = if args.tool.wants_host() { normalize_host(&args.target) } else { injection_url(&args.target) }
        .map_err(|e| ExitError::usage(e.to_string()))?;
    let profile = ctx.config.profile(args.tool);
    let spec = JobSpec::builder(profile.executable.clone())
        .tool(args.tool.name())
        .args(profile.render(&target))
        .target(target)
        .build();
    execute(ctx, spec, with_timeout(profile.limits, args.timeout_ms)).await
}

pub async fn run(ctx: &Context, args: RunArgs) -> Result<()> {
    let mut command = args.command.into_iter();
    let Some(executable) = command.next() else {
        return Err(ExitError::usage("missing executable").into());
    };
    let limits = with_timeout(ctx.config.limits_for(&executable), args.timeout_ms);
    let mut spec = JobSpec::builder(executable).args(command);
    if let Some(target) = args.target {
        spec = spec.target(target);
    }
    execute(ctx, spec.build(), limits).await
}

fn with_timeout(limits: ProcessLimits, timeout_ms: Option<u64>) -> ProcessLimits {
    match timeout_ms {
        Some(0) => {
            tracing::warn!("--timeout-ms 0: process will run without a time limit");
            limits.unbounded()
        }
        Some(ms) => limits.timeout(Duration::from_millis(ms)),
        None => limits,
    }
}

/// Create the job, supervise it to completion, and print the result.
///
/// Ctrl-C or SIGTERM cancels the running process before exiting.
async fn execute(ctx: &Context, spec: JobSpec, limits: ProcessLimits) -> Result<()> {
    let store = ctx.store();
    let job = Job::new(spec, SystemClock.epoch_ms());
    let id = job.id.clone();
    let request =
        StartRequest::new(id.clone(), job.executable.clone(), job.args.clone()).target(job.target.clone()).limits(limits);
    store.insert(job).await.context("failed to create job")?;

    let supervisor = Supervisor::new(store.clone(), ctx.config.supervisor());
    let mut started = match supervisor.start(request).await {
        Ok(started) => started,
        Err(e @ SupervisorError::SpawnFailure { .. }) => {
            show::display(ctx.format, store.get(&id).await?)?;
            return Err(ExitError::new(1, e.to_string()).into());
        }
        Err(e) => return Err(e.into()),
    };
    if ctx.format == OutputFormat::Text {
        eprintln!("{} {} (pid {})", color::muted("started"), id, started.pid);
    }

    let status = tokio::select! {
        status = started.finished() => status,
        () = shutdown_signal() => {
            tracing::info!(job_id = %id, "shutdown requested, cancelling running jobs");
            let cancelled = supervisor.kill_all().await;
            tracing::debug!(cancelled, "cancelled on shutdown");
            started.finished().await
        }
    };
    tracing::debug!(job_id = %id, ?status, "supervision ended");

    let job = store.get(&id).await?;
    let completed = job.status == JobStatus::Completed;
    show::display(ctx.format, job)?;
    if completed {
        Ok(())
    } else {
        Err(ExitError::silent().into())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
