// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sj cancel` specs

use crate::prelude::*;

#[test]
fn cancel_is_idempotent() {
    let temp = Project::empty();
    let out = temp.sj().args(&["--json", "run", "--timeout-ms", "100", "--", "/bin/sh", "-c", "exec sleep 10"]).exits_with(1);
    let id = temp.job_id(&out);

    temp.sj().args(&["cancel", &id]).passes().stdout_has("Cancelled job");
    temp.sj().args(&["cancel", &id, "--reason", "again"]).passes().stdout_has("Cancelled job");
    let job = temp.sj().args(&["--json", "show", &id]).passes().json();
    assert_eq!(job["status"], "cancelled");
    assert_eq!(job["results"]["error"], "again");
}

#[test]
fn cancel_after_completion_keeps_result() {
    let temp = Project::empty();
    let out = temp.sj().args(&["--json", "run", "--", "/bin/echo", "done"]).passes();
    let id = temp.job_id(&out);

    let cancel = temp.sj().args(&["--json", "cancel", &id]).passes().json();
    assert_eq!(cancel["recorded"], false);
    assert_eq!(cancel["killed"], false);
    temp.sj().args(&["show", &id]).passes().stdout_has("Status: completed");
}

#[test]
fn cancel_unknown_job_fails() {
    Project::empty().sj().args(&["cancel", "job-missing"]).exits_with(1).stderr_has("no job matches");
}
