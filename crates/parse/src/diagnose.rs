// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Explanations for empty or incomplete scan results.
//!
//! [`diagnose`] matches known failure signatures in raw tool output;
//! [`explain`] falls back to gaps visible in a parsed report.

use crate::lines::constant;
use regex::Regex;
use sj_core::ScanReport;
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    DnsFailure,
    HostUnreachable,
    AllPortsClosed,
    PrivilegesRequired,
    NoOsMatch,
    ConnectionRefused,
    AuthRequired,
    TimedOut,
    NotInjectable,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DnsFailure => "dns_failure",
            Self::HostUnreachable => "host_unreachable",
            Self::AllPortsClosed => "all_ports_closed",
            Self::PrivilegesRequired => "privileges_required",
            Self::NoOsMatch => "no_os_match",
            Self::ConnectionRefused => "connection_refused",
            Self::AuthRequired => "auth_required",
            Self::TimedOut => "timed_out",
            Self::NotInjectable => "not_injectable",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: &'static str,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

struct Signature {
    kind: DiagnosticKind,
    pattern: &'static str,
    message: &'static str,
}

/// Checked in order; the first match wins.
const SIGNATURES: &[Signature] = &[
    Signature {
        kind: DiagnosticKind::DnsFailure,
        pattern: r"(?i)Failed to resolve|Name or service not known|Could not resolve",
        message: "Target DNS resolution failed; check the hostname.",
    },
    Signature {
        kind: DiagnosticKind::HostUnreachable,
        pattern: r"(?i)Failed to find any hosts|Host seems down|host unreachable|No route to host",
        message: "The target host could not be reached; it may be down or filtered.",
    },
    Signature {
        kind: DiagnosticKind::AllPortsClosed,
        pattern: r"(?i)All \d+ scanned ports on .* are closed",
        message: "All scanned ports appear closed; no open services were discovered.",
    },
    Signature {
        kind: DiagnosticKind::PrivilegesRequired,
        pattern: r"(?i)requires root|You must be root|root privileges",
        message: "The scan needs root privileges for some scan types (such as OS detection).",
    },
    Signature {
        kind: DiagnosticKind::NoOsMatch,
        pattern: r"(?i)No exact OS matches for host|No OS matches",
        message: "OS fingerprinting did not produce a confident match.",
    },
    Signature {
        kind: DiagnosticKind::ConnectionRefused,
        pattern: r"(?i)could not connect|connection refused",
        message: "The scanner could not connect to the target service.",
    },
    Signature {
        kind: DiagnosticKind::AuthRequired,
        pattern: r"(?i)login required|authentication required|401 Unauthorized",
        message: "The target requires authentication; unauthenticated scanning misses protected endpoints.",
    },
    Signature {
        kind: DiagnosticKind::TimedOut,
        pattern: r"(?i)timed out",
        message: "The scan timed out before completing.",
    },
    Signature {
        kind: DiagnosticKind::NotInjectable,
        pattern: r"(?i)not injectable|does not seem to be injectable",
        message: "No injectable parameters were found.",
    },
];

static COMPILED: LazyLock<Vec<(Regex, &'static Signature)>> =
    LazyLock::new(|| SIGNATURES.iter().map(|s| (constant(s.pattern), s)).collect());

/// Match raw output against known failure signatures.
pub fn diagnose(raw: &str) -> Option<Diagnostic> {
    if raw.trim().is_empty() {
        return None;
    }
    COMPILED
        .iter()
        .find(|(re, _)| re.is_match(raw))
        .map(|(_, sig)| Diagnostic { kind: sig.kind, message: sig.message })
}

/// Best available explanation for a report that looks empty or incomplete.
///
/// Returns `None` when the report has nothing to explain.
pub fn explain(report: &ScanReport) -> Option<String> {
    let raw = report.raw_output();
    if raw.trim().is_empty() {
        return Some("No scanner output was captured.".to_string());
    }
    if let Some(diagnostic) = diagnose(raw) {
        return Some(diagnostic.message.to_string());
    }

    match report {
        ScanReport::PortScan(r) => {
            let mut gaps = Vec::new();
            if r.open_ports.is_empty() {
                gaps.push("No open ports discovered.");
            }
            if r.service_versions.is_empty() {
                gaps.push("Service detection produced no banners.");
            }
            if r.os_detection.is_none() {
                gaps.push("OS detection produced no match.");
            }
            (!gaps.is_empty()).then(|| gaps.join(" "))
        }
        ScanReport::WebScan(r) if !r.stats.scan_completed => {
            Some("The web scan did not complete; findings may be partial.".to_string())
        }
        ScanReport::WebScan(r) if r.total_findings == 0 => {
            Some("The web scan completed with no findings.".to_string())
        }
        ScanReport::Raw(r) => Some(format!("No parser is available for {}.", r.tool)),
        _ => None,
    }
}

#[cfg(test)]
#[path = "diagnose_tests.rs"]
mod tests;
