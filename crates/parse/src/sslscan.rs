// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TLS scanner output.

use crate::lines::{constant, lines, push_unique};
use regex::Regex;
use sj_core::{CertificateDetails, TlsScanReport};
use std::sync::LazyLock;

const ISSUES_CAP: usize = 100;

static DEPRECATED: LazyLock<Regex> =
    LazyLock::new(|| constant(r"(?i)\b(sslv2|sslv3|tlsv1\.0|tlsv1\.1)\b"));
static WEAK_CIPHER: LazyLock<Regex> =
    LazyLock::new(|| constant(r"(?i)\b(weak|null|export|des|3des|rc4)\b"));
static CERT_PROBLEM: LazyLock<Regex> =
    LazyLock::new(|| constant(r"(?i)\b(expired|self-signed|invalid|revoked|mismatch)\b"));
static TLS12: LazyLock<Regex> = LazyLock::new(|| constant(r"(?i)\bTLSv1\.2\b"));
static TLS13: LazyLock<Regex> = LazyLock::new(|| constant(r"(?i)\bTLSv1\.3\b"));

fn marked_off(lower: &str) -> bool {
    lower.contains("disabled") || lower.contains("not offered")
}

/// Value after a case-insensitive `prefix` at the start of `line`.
fn field<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    let value = line[prefix.len()..].trim();
    (!value.is_empty()).then_some(value)
}

fn set_once(slot: &mut Option<String>, value: Option<&str>) {
    if slot.is_none() {
        *slot = value.map(str::to_string);
    }
}

/// Parse sslscan text output.
pub fn parse_sslscan(raw: &str, target: &str) -> TlsScanReport {
    let mut critical = Vec::new();
    let mut weak_issues = Vec::new();
    let mut report = TlsScanReport {
        success: !raw.is_empty(),
        raw_output: raw.to_string(),
        target: target.to_string(),
        ..TlsScanReport::default()
    };
    let mut cert = CertificateDetails::default();

    for line in lines(raw) {
        let lower = line.to_lowercase();

        if DEPRECATED.is_match(line) && !marked_off(&lower) {
            report.deprecated_protocols.push(line.to_string());
            push_unique(&mut critical, &format!("Deprecated protocol: {line}"));
        }
        if WEAK_CIPHER.is_match(line) && !marked_off(&lower) {
            report.weak_ciphers.push(line.to_string());
            push_unique(&mut weak_issues, &format!("Weak cipher: {line}"));
        }
        if CERT_PROBLEM.is_match(line) {
            report.certificate_issues.push(line.to_string());
            push_unique(&mut critical, &format!("Certificate issue: {line}"));
        }

        set_once(&mut cert.subject, field(line, "Subject:"));
        set_once(&mut cert.issuer, field(line, "Issuer:"));
        set_once(&mut cert.valid_from, field(line, "Not valid before:"));
        set_once(&mut cert.valid_to, field(line, "Not valid after:"));
        set_once(&mut cert.signature_algorithm, field(line, "Signature Algorithm:"));

        if !marked_off(&lower) {
            report.supports_tls12 |= TLS12.is_match(line);
            report.supports_tls13 |= TLS13.is_match(line);
        }
    }

    let mut issues = critical.clone();
    for issue in &weak_issues {
        push_unique(&mut issues, issue);
    }
    report.total_issues = issues.len();
    issues.truncate(ISSUES_CAP);
    report.issues = issues;
    report.critical_issues = critical;
    report.certificate = cert;
    report
}

#[cfg(test)]
#[path = "sslscan_tests.rs"]
mod tests;
