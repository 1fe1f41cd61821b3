// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sj cancel` - record a job as cancelled

use anyhow::Result;
use sj_storage::JobStore;
use sj_engine::Supervisor;

use super::{show, Context};
use crate::color;
use crate::output::{self, OutputFormat};

pub const DEFAULT_REASON: &str = "cancelled by user";

pub async fn handle(ctx: &Context, id: &str, reason: &str) -> Result<()> {
    let store = ctx.store();
    let job = show::resolve(&store, id).await?;
    let supervisor = Supervisor::new(store.clone(), ctx.config.supervisor());
    let outcome = supervisor.cancel(&job.id, reason).await?;
    let job = store.get(&job.id).await?;

    match ctx.format {
        OutputFormat::Json => output::print_json(&serde_json::json!({
            "id": job.id,
            "killed": outcome.killed,
            "recorded": outcome.recorded,
            "status": job.status,
        })),
        OutputFormat::Text => {
            if outcome.recorded {
                println!("Cancelled job {}", color::header(job.id.as_str()));
            } else {
                println!("Job {} already finished ({})", color::header(job.id.as_str()), color::status(job.status));
            }
            Ok(())
        }
    }
}
