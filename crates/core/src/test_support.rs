// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Job, JobId, JobPatch, JobResults, JobSpec, JobStatus};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for the job state machine.
pub mod strategies {
    use crate::{JobPatch, JobResults, JobStatus};
    use proptest::prelude::*;

    pub fn arb_job_status() -> impl Strategy<Value = JobStatus> {
        prop_oneof![
            Just(JobStatus::Pending),
            Just(JobStatus::Running),
            Just(JobStatus::Completed),
            Just(JobStatus::Failed),
            Just(JobStatus::Cancelled),
        ]
    }

    /// Any patch, including ones the state machine must refuse.
    pub fn arb_patch() -> impl Strategy<Value = JobPatch> {
        prop_oneof![
            Just(JobPatch::Started),
            "[a-z ]{0,12}".prop_map(|output| JobPatch::Partial { output }),
            (arb_job_status(), "[a-z ]{0,12}").prop_map(|(status, raw_output)| JobPatch::Finished {
                status,
                results: JobResults { raw_output, ..JobResults::default() },
            }),
        ]
    }
}

// ── Job fixtures ────────────────────────────────────────────────────────

pub const FIXTURE_EPOCH_MS: u64 = 1_000_000;

/// A pending nmap job with a fixed id.
pub fn pending_job(id: &str) -> Job {
    let spec = JobSpec::builder("nmap").id(JobId::from(id)).args(["-sV", "scanme.example.org"]).build();
    Job::new(spec, FIXTURE_EPOCH_MS)
}

pub fn running_job(id: &str) -> Job {
    let mut job = pending_job(id);
    let _ = job.apply(JobPatch::Started, FIXTURE_EPOCH_MS);
    job
}

/// A completed job whose report is missing, as left behind by a host that
/// only kept the raw text.
pub fn completed_raw_job(id: &str, executable: &str, raw: &str) -> Job {
    let spec = JobSpec::builder(executable).id(JobId::from(id)).target("scanme.example.org").build();
    let mut job = Job::new(spec, FIXTURE_EPOCH_MS);
    let results = JobResults { raw_output: raw.to_string(), ..JobResults::default() };
    let _ = job.apply(JobPatch::finished(JobStatus::Completed, results), FIXTURE_EPOCH_MS);
    job
}
