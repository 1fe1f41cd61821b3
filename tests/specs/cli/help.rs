// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    Project::empty()
        .sj()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("scan")
        .stdout_has("run")
        .stdout_has("parse")
        .stdout_has("cancel");
}

#[test]
fn no_args_is_a_usage_error() {
    Project::empty().sj().exits_with(2).stderr_has("Usage:");
}

#[test]
fn unknown_tool_is_a_usage_error() {
    Project::empty().sj().args(&["scan", "metasploit", "example.com"]).exits_with(2).stderr_has("unknown tool");
}

#[test]
fn version_shows_version() {
    Project::empty().sj().args(&["--version"]).passes().stdout_has("0.2");
}
