// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sj list` - list stored jobs, newest last

use anyhow::Result;
use clap::Args;
use sj_core::{Clock, JobStatus, SystemClock};
use sj_storage::JobStore;

use super::Context;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct ListArgs {
    /// Filter by status (pending, running, completed, failed, cancelled)
    #[arg(long)]
    pub status: Option<JobStatus>,

    /// Filter by tool name
    #[arg(long)]
    pub tool: Option<String>,

    /// Maximum number of jobs to show (most recent)
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,
}

pub async fn handle(ctx: &Context, args: ListArgs) -> Result<()> {
    let mut jobs = ctx.store().list().await?;
    jobs.retain(|job| {
        args.status.is_none_or(|s| job.status == s) && args.tool.as_deref().is_none_or(|t| job.tool == t)
    });
    let skip = jobs.len().saturating_sub(args.limit);
    let jobs = &jobs[skip..];

    match ctx.format {
        OutputFormat::Json => output::print_json(&jobs),
        OutputFormat::Text => {
            if jobs.is_empty() {
                println!("No jobs");
            } else {
                let rows = output::job_rows(jobs, SystemClock.epoch_ms());
                print!("{}", output::render_table(["ID", "TOOL", "STATUS", "TARGET", "AGE"], &rows));
            }
            Ok(())
        }
    }
}
