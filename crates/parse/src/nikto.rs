// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Web vulnerability scanner output.

use crate::lines::{constant, first_capture, lines, push_unique};
use regex::Regex;
use sj_core::{ScanStats, WebScanReport};
use std::sync::LazyLock;

const FINDINGS_CAP: usize = 200;

/// Lines carrying these markers are scan metadata, not findings.
const METADATA_MARKERS: &[&str] = &[
    "Target IP:",
    "Target Hostname:",
    "Target Port:",
    "Start Time:",
    "End Time:",
    "Server:",
    "requests:",
    "item(s) reported",
    "host(s) tested",
];

static REQUESTS: LazyLock<Regex> = LazyLock::new(|| constant(r"(\d+)\s+requests:"));
static ITEMS: LazyLock<Regex> = LazyLock::new(|| constant(r"and\s+(\d+)\s+item\(s\)\s+reported"));
static SERVER: LazyLock<Regex> = LazyLock::new(|| constant(r"(?im)Server:\s*(.+)$"));

static CRITICAL: LazyLock<Regex> = LazyLock::new(|| {
    constant(r"(?i)\b(sql injection|command execution|remote shell|rce|critical)\b")
});
static HIGH: LazyLock<Regex> = LazyLock::new(|| {
    constant(r"(?i)\b(xss|cross-site|directory traversal|file upload|high)\b")
});
static MEDIUM: LazyLock<Regex> = LazyLock::new(|| {
    constant(r"(?i)\b(information disclosure|directory listing|misconfiguration|medium)\b")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

/// First matching keyword set wins.
pub(crate) fn classify(finding: &str) -> Severity {
    if CRITICAL.is_match(finding) {
        Severity::Critical
    } else if HIGH.is_match(finding) {
        Severity::High
    } else if MEDIUM.is_match(finding) {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Parse nikto text output.
pub fn parse_nikto(raw: &str, target: &str) -> WebScanReport {
    let scan_completed = raw.contains("Start Time:") && raw.contains("End Time:");
    let stats = ScanStats {
        requests_made: first_capture(&REQUESTS, raw).and_then(|n| n.parse().ok()).unwrap_or(0),
        items_reported: first_capture(&ITEMS, raw).and_then(|n| n.parse().ok()).unwrap_or(0),
        scan_completed,
    };

    let mut findings: Vec<String> = Vec::new();
    let mut report = WebScanReport {
        success: scan_completed,
        server_info: first_capture(&SERVER, raw),
        stats,
        raw_output: raw.to_string(),
        target: target.to_string(),
        ..WebScanReport::default()
    };

    for line in lines(raw) {
        if !line.starts_with("+ ") || METADATA_MARKERS.iter().any(|m| line.contains(m)) {
            continue;
        }
        let cleaned = line.trim_start_matches('+').trim();
        if cleaned.chars().count() <= 5 || !push_unique(&mut findings, cleaned) {
            continue;
        }
        let bucket = match classify(cleaned) {
            Severity::Critical => &mut report.critical,
            Severity::High => &mut report.high,
            Severity::Medium => &mut report.medium,
            Severity::Low => &mut report.low,
        };
        bucket.push(cleaned.to_string());
    }

    report.total_findings = findings.len();
    findings.truncate(FINDINGS_CAP);
    report.findings = findings;
    report
}

#[cfg(test)]
#[path = "nikto_tests.rs"]
mod tests;
