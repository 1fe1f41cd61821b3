// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sj show` and `sj list` specs

use crate::prelude::*;

#[test]
fn list_empty() {
    Project::empty().sj().args(&["list"]).passes().stdout_has("No jobs");
}

#[test]
fn show_by_prefix() {
    let temp = Project::empty();
    let out = temp.sj().args(&["--json", "run", "--", "/bin/echo", "hi"]).passes();
    let id = temp.job_id(&out);

    temp.sj().args(&["show", &id[..10]]).passes().stdout_has(&format!("Job: {id}"));
}

#[test]
fn list_filters_by_status() {
    let temp = Project::empty();
    temp.sj().args(&["run", "--", "/bin/echo", "ok"]).passes();
    temp.sj().args(&["run", "--", "/bin/sh", "-c", "exit 1"]).exits_with(1);

    temp.sj().args(&["list", "--status", "failed"]).passes().stdout_has("failed").stdout_lacks("completed");
    let all = temp.sj().args(&["--json", "list"]).passes().json();
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[test]
fn show_reconciles_stored_nmap_output() {
    let temp = Project::empty();
    let nmap = temp.fake_tool("fake-nmap");
    let script = format!("cat <<'EOF'\n{NMAP_OUTPUT}EOF");
    let out = temp.sj().args(&["--json", "run", "--", &nmap, "-c", &script]).passes();
    let id = temp.job_id(&out);

    let job = temp.sj().args(&["--json", "show", &id]).passes().json();
    assert_eq!(job["results"]["report"]["tool"], "port_scan");
    assert_eq!(job["results"]["report"]["open_ports"].as_array().unwrap().len(), 2);
    assert_eq!(job["results"]["report"]["host_info"]["service_info"], "Service Info: OS: Linux; CPE: cpe:/o:linux:linux_kernel");
}

#[test]
fn show_unknown_job_fails() {
    Project::empty().sj().args(&["show", "job-nope"]).exits_with(1).stderr_has("no job matches");
}
