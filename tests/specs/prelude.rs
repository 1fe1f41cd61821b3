// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers: an isolated state directory per test and fluent
//! assertions over the binary's output.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub use serde_json::Value;

pub const NMAP_OUTPUT: &str = "\
Starting Nmap 7.94 ( https://nmap.org )
Nmap scan report for scanme.example.org (45.33.32.156)
Not shown: 996 closed tcp ports (reset)
PORT     STATE    SERVICE VERSION
22/tcp   open     ssh     OpenSSH 6.6.1p1 Ubuntu 2ubuntu2.13
80/tcp   open     http    Apache httpd 2.4.7
|_http-server-header: Apache/2.4.7 (Ubuntu)
9929/tcp filtered nping-echo
Service Info: OS: Linux; CPE: cpe:/o:linux:linux_kernel
CVE-2021-1234 detected
Nmap done: 1 IP address (1 host up) scanned in 12.34 seconds
";

/// A temp directory holding the state dir and any fixture files.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("state")).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn state_dir(&self) -> PathBuf {
        self.path().join("state")
    }

    /// Write a fixture file, returning its absolute path.
    pub fn file(&self, rel: &str, contents: &str) -> String {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    /// `/bin/sh` reachable under a scanner-like name, so output dispatch
    /// picks the matching parser. Invoke it with `-c <script>`.
    pub fn fake_tool(&self, name: &str) -> String {
        let path = self.path().join(name);
        std::os::unix::fs::symlink("/bin/sh", &path).unwrap();
        path.to_string_lossy().into_owned()
    }

    pub fn config(&self, toml: &str) {
        self.file("state/config.toml", toml);
    }

    pub fn sj(&self) -> Sj {
        let mut cmd = Command::cargo_bin("sj").unwrap();
        cmd.env("SJ_STATE_DIR", self.state_dir())
            .env("NO_COLOR", "1")
            .env("SJ_LOG", "off")
            .env_remove("SJ_CONFIG")
            .env_remove("COLOR")
            .current_dir(self.path());
        Sj { cmd }
    }

    /// Run a command expected to print a job as JSON and return its id.
    pub fn job_id(&self, output: &Output) -> String {
        output.json()["id"].as_str().unwrap().to_string()
    }
}

pub struct Sj {
    cmd: Command,
}

impl Sj {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn passes(self) -> Output {
        self.exits_with(0)
    }

    pub fn exits_with(mut self, code: i32) -> Output {
        let out = self.cmd.output().unwrap();
        let output = Output {
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        };
        assert_eq!(
            out.status.code(),
            Some(code),
            "unexpected exit status\n--- stdout ---\n{}\n--- stderr ---\n{}",
            output.stdout,
            output.stderr
        );
        output
    }
}

pub struct Output {
    stdout: String,
    stderr: String,
}

impl Output {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout lacks {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout unexpectedly has {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr lacks {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}
