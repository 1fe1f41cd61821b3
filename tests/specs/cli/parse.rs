// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sj parse` specs: structuring saved output

use crate::prelude::*;

#[test]
fn parses_saved_nmap_output() {
    let temp = Project::empty();
    let file = temp.file("nmap.txt", NMAP_OUTPUT);
    temp.sj()
        .args(&["parse", "nmap", &file, "--target", "scanme.example.org"])
        .passes()
        .stdout_has("2 open")
        .stdout_has("80/tcp   open     http    Apache httpd 2.4.7")
        .stdout_has("CVE-2021-1234");
}

#[test]
fn parse_json_is_structured() {
    let temp = Project::empty();
    let file = temp.file("nmap.txt", NMAP_OUTPUT);
    let out = temp.sj().args(&["--json", "parse", "/usr/bin/nmap", &file]).passes();
    let json = out.json();
    assert_eq!(json["report"]["tool"], "port_scan");
    assert_eq!(json["report"]["cve_list"], serde_json::json!(["CVE-2021-1234"]));
    assert_eq!(json["report"]["scan_completed"], true);
}

#[test]
fn parse_tls_output() {
    let temp = Project::empty();
    let file = temp.file("ssl.txt", "Subject: example.com\nNot valid after: 2020-01-01\n");
    let out = temp.sj().args(&["--json", "parse", "sslscan", &file]).passes();
    let report = &out.json()["report"];
    assert_eq!(report["supports_tls12"], false);
    assert_eq!(report["supports_tls13"], false);
    assert_eq!(report["certificate"]["valid_to"], "2020-01-01");
}

#[test]
fn unknown_tool_output_stays_raw() {
    let temp = Project::empty();
    let file = temp.file("out.txt", "hello\n");
    temp.sj()
        .args(&["parse", "mytool", &file])
        .passes()
        .stdout_has("unparsed output from mytool")
        .stdout_has("No parser is available");
}

#[test]
fn resolution_failure_is_explained() {
    let temp = Project::empty();
    let file = temp.file("nmap.txt", "Failed to resolve \"nohost.invalid\".\n");
    temp.sj().args(&["parse", "nmap", &file]).passes().stdout_has("Note:");
}

#[test]
fn missing_file_fails() {
    let temp = Project::empty();
    temp.sj().args(&["parse", "nmap", "nope.txt"]).exits_with(1).stderr_has("failed to read");
}
