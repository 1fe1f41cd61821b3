// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sj scan` specs: tool profiles and target normalisation

use crate::prelude::*;

fn with_profile(temp: &Project, tool: &str, script: &str) {
    let exe = temp.fake_tool(&format!("fake-{tool}"));
    temp.config(&format!(
        "[tools.{tool}]\nexecutable = {exe:?}\nargs = [\"-c\", {script:?}, \"{{target}}\"]\n"
    ));
}

#[test]
fn scan_strips_scheme_and_www() {
    let temp = Project::empty();
    with_profile(&temp, "nmap", "echo \"22/tcp open ssh on $0\"");
    let out = temp.sj().args(&["--json", "scan", "nmap", "https://www.example.com/login"]).passes();
    let job = out.json();
    assert_eq!(job["target"], "example.com");
    assert_eq!(job["args"][2], "example.com");
    let open = job["results"]["report"]["open_ports"][0].as_str().unwrap();
    assert_eq!(open, "22/tcp open ssh on example.com");
}

#[test]
fn sqlmap_gets_a_injection_url() {
    let temp = Project::empty();
    with_profile(&temp, "sqlmap", "echo \"testing $0\"");
    let out = temp.sj().args(&["--json", "scan", "sqlmap", "example.com/app/"]).passes();
    let job = out.json();
    assert_eq!(job["target"], "http://example.com/app/?id=1");
    assert_eq!(job["results"]["report"]["tool"], "injection");
}

#[test]
fn invalid_host_is_rejected() {
    let temp = Project::empty();
    temp.sj().args(&["scan", "nmap", "bad host!"]).exits_with(2).stderr_has("invalid hostname");
    temp.sj().args(&["list"]).passes().stdout_has("No jobs");
}

#[test]
fn profile_timeout_applies() {
    let temp = Project::empty();
    let exe = temp.fake_tool("fake-nikto");
    temp.config(&format!(
        "[tools.nikto]\nexecutable = {exe:?}\nargs = [\"-c\", \"echo '+ Server: test'; exec sleep 10\"]\ntimeout_ms = 200\n"
    ));
    let out = temp.sj().args(&["--json", "scan", "nikto", "example.com"]).exits_with(1);
    assert_eq!(out.json()["status"], "cancelled");
}
