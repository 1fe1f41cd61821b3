// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sj run` specs: supervising arbitrary executables

use crate::prelude::*;

#[test]
fn successful_run_completes() {
    let temp = Project::empty();
    temp.sj()
        .args(&["run", "--", "/bin/echo", "hello"])
        .passes()
        .stdout_has("Status: completed (exit code 0)")
        .stdout_has("unparsed output from /bin/echo");

    temp.sj().args(&["list"]).passes().stdout_has("completed").stdout_has("hello");
}

#[test]
fn fake_nmap_output_is_parsed() {
    let temp = Project::empty();
    let nmap = temp.fake_tool("fake-nmap");
    let script = "echo '80/tcp open http Apache httpd 2.4.1'; echo 'CVE-2021-1234 detected'";
    let out = temp
        .sj()
        .args(&["--json", "run", "--target", "scanme.example.org", "--", &nmap, "-c", script])
        .passes();
    let job = out.json();
    assert_eq!(job["status"], "completed");
    assert_eq!(job["tool"], "nmap");
    assert_eq!(job["target"], "scanme.example.org");
    let report = &job["results"]["report"];
    assert_eq!(report["tool"], "port_scan");
    assert_eq!(report["open_ports"], serde_json::json!(["80/tcp open http Apache httpd 2.4.1"]));
    assert_eq!(report["cve_list"], serde_json::json!(["CVE-2021-1234"]));
}

#[test]
fn silent_failure_exits_nonzero() {
    let temp = Project::empty();
    temp.sj()
        .args(&["run", "--", "/bin/sh", "-c", "exit 3"])
        .exits_with(1)
        .stdout_has("Status: failed (exit code 3)")
        .stdout_has("no output");
}

#[test]
fn timeout_cancels_with_partial_output() {
    let temp = Project::empty();
    let out = temp
        .sj()
        .args(&["--json", "run", "--timeout-ms", "200", "--", "/bin/sh", "-c", "echo partial; exec sleep 10"])
        .exits_with(1);
    let job = out.json();
    assert_eq!(job["status"], "cancelled");
    assert_eq!(job["results"]["cancelled"], true);
    assert!(job["results"]["error"].as_str().unwrap().contains("time budget"));
    assert!(job["results"]["partial_output"].as_str().unwrap().contains("partial"));
}

#[test]
fn missing_executable_fails_the_job() {
    let temp = Project::empty();
    temp.sj()
        .args(&["run", "--", "/nonexistent/scanner", "x"])
        .exits_with(1)
        .stdout_has("Status: failed")
        .stderr_has("/nonexistent/scanner");
}
