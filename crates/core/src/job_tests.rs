// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::pending_job;
use crate::test_support::strategies::arb_patch;
use proptest::prelude::*;
use yare::parameterized;

#[parameterized(
    pending   = { JobStatus::Pending,   false },
    running   = { JobStatus::Running,   false },
    completed = { JobStatus::Completed, true },
    failed    = { JobStatus::Failed,    true },
    cancelled = { JobStatus::Cancelled, true },
)]
fn terminal_statuses(status: JobStatus, terminal: bool) {
    assert_eq!(status.is_terminal(), terminal);
}

#[test]
fn status_round_trips_through_str() {
    for status in JobStatus::ALL {
        assert_eq!(status.as_str().parse::<JobStatus>().unwrap(), *status);
    }
    assert!("done".parse::<JobStatus>().is_err());
}

#[test]
fn new_job_defaults_target_to_last_arg_and_tool_from_executable() {
    let spec = JobSpec::builder("/usr/bin/nmap").args(["-sV", "example.com"]).build();
    let job = Job::new(spec, 10);
    assert_eq!(job.tool, "nmap");
    assert_eq!(job.target, "example.com");
    assert_eq!(job.status, JobStatus::Pending);
    assert!(job.id.as_str().starts_with(JobId::PREFIX));
    assert_eq!(job.created_at_ms, 10);
}

#[test]
fn explicit_id_and_target_win() {
    let spec = JobSpec::builder("mytool")
        .id(JobId::from("abc"))
        .target("t.example")
        .args(["x"])
        .build();
    let job = Job::new(spec, 0);
    assert_eq!(job.id, "abc");
    assert_eq!(job.target, "t.example");
    assert_eq!(job.tool, "mytool");
}

#[test]
fn started_moves_pending_to_running_once() {
    let mut job = pending_job("j1");
    assert_eq!(job.apply(JobPatch::Started, 5), Ok(true));
    assert_eq!(job.status, JobStatus::Running);
    assert_eq!(job.started_at_ms, Some(5));
    assert_eq!(job.apply(JobPatch::Started, 6), Ok(false));
    assert_eq!(job.started_at_ms, Some(5));
}

#[test]
fn partial_after_finish_is_ignored() {
    let mut job = pending_job("j1");
    job.apply(JobPatch::Started, 1).unwrap();
    job.apply(JobPatch::Partial { output: "early".into() }, 2).unwrap();
    let results = JobResults { raw_output: "final".into(), ..JobResults::default() };
    job.apply(JobPatch::finished(JobStatus::Completed, results), 3).unwrap();

    assert_eq!(job.apply(JobPatch::Partial { output: "late".into() }, 4), Ok(false));
    assert_eq!(job.results.raw_output, "final");
    assert_eq!(job.updated_at_ms, 3);
}

#[test]
fn repeated_cancel_overwrites_reason() {
    let mut job = pending_job("j1");
    job.apply(JobPatch::cancelled("first", String::new(), None), 1).unwrap();
    job.apply(JobPatch::cancelled("second", String::new(), None), 2).unwrap();
    assert_eq!(job.status, JobStatus::Cancelled);
    assert_eq!(job.results.error.as_deref(), Some("second"));
    assert!(job.results.cancelled);
}

#[test]
fn cancel_after_completion_is_refused() {
    let mut job = pending_job("j1");
    job.apply(JobPatch::finished(JobStatus::Completed, JobResults::default()), 1).unwrap();
    let err = job.apply(JobPatch::cancelled("late", String::new(), None), 2).unwrap_err();
    assert_eq!(err, TransitionError { from: JobStatus::Completed, to: JobStatus::Cancelled });
    assert_eq!(job.status, JobStatus::Completed);
}

#[test]
fn finishing_with_non_terminal_status_is_refused() {
    let mut job = pending_job("j1");
    assert!(job.apply(JobPatch::finished(JobStatus::Running, JobResults::default()), 1).is_err());
    assert_eq!(job.status, JobStatus::Pending);
}

#[test]
fn job_serializes_snake_case_status() {
    let job = pending_job("j1");
    let value = serde_json::to_value(&job).unwrap();
    assert_eq!(value["status"], "pending");
    let back: Job = serde_json::from_value(value).unwrap();
    assert_eq!(back, job);
}

proptest! {
    #[test]
    fn status_never_leaves_terminal(patches in proptest::collection::vec(arb_patch(), 0..24)) {
        let mut job = pending_job("prop");
        let mut terminal: Option<JobStatus> = None;
        for (i, patch) in patches.into_iter().enumerate() {
            let _ = job.apply(patch, i as u64);
            if let Some(t) = terminal {
                prop_assert_eq!(job.status, t);
            }
            if job.status.is_terminal() {
                terminal = Some(job.status);
            }
        }
    }
}
