// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SQL-injection tester output.

use crate::lines::{constant, first_capture, push_unique};
use regex::Regex;
use sj_core::{InjectionDetails, InjectionReport};
use std::sync::LazyLock;

const VULNERABILITIES_CAP: usize = 100;
const WARNINGS_CAP: usize = 50;
const TABLES_CAP: usize = 200;

// "sql injection" alone is deliberately absent: sqlmap prints it on
// ordinary [INFO] progress lines.
static VULNERABLE: LazyLock<Regex> =
    LazyLock::new(|| constant(r"(?i)is vulnerable|is injectable|payload:"));
static WARNING: LazyLock<Regex> = LazyLock::new(|| {
    constant(r"(?i)does not seem to be injectable|not injectable|could not fingerprint")
});
static NUMBERED_DB: LazyLock<Regex> = LazyLock::new(|| constant(r"^\[\d+\]\s*([\w-]+)"));
static LISTED_DB: LazyLock<Regex> = LazyLock::new(|| constant(r"^\[\*\]\s*([\w-]+)\s*$"));
static DB_BLOCK: LazyLock<Regex> = LazyLock::new(|| constant(r"(?i)available databases\s*\[\d+\]:"));
static TABLE: LazyLock<Regex> = LazyLock::new(|| constant(r"(?i)table:|tables"));
static INJECTION_POINT: LazyLock<Regex> =
    LazyLock::new(|| constant(r"(?i)parameter:|injection point|injection:|payload:"));
static DBMS: LazyLock<Regex> = LazyLock::new(|| constant(r"(?i)back-end DBMS:\s*([^\r\n]+)"));
static PAYLOAD: LazyLock<Regex> = LazyLock::new(|| constant(r"(?i)Payload:\s*([^\r\n]+)"));

/// Parse sqlmap text output.
pub fn parse_sqlmap(raw: &str, target: &str) -> InjectionReport {
    let mut vulnerabilities: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();
    let mut databases = Vec::new();
    let mut tables: Vec<String> = Vec::new();
    let mut injection_points = Vec::new();
    let mut in_db_block = false;

    for line in raw.lines().map(str::trim) {
        if line.is_empty() {
            in_db_block = false;
            continue;
        }

        if VULNERABLE.is_match(line) {
            vulnerabilities.push(line.to_string());
        }
        if WARNING.is_match(line) {
            warnings.push(line.to_string());
        }

        if DB_BLOCK.is_match(line) {
            in_db_block = true;
        } else if let Some(name) = first_capture(&NUMBERED_DB, line) {
            push_unique(&mut databases, &name);
        } else if in_db_block {
            match first_capture(&LISTED_DB, line) {
                Some(name) => {
                    push_unique(&mut databases, &name);
                }
                None => in_db_block = false,
            }
        }

        if TABLE.is_match(line) {
            push_unique(&mut tables, line);
        }
        if INJECTION_POINT.is_match(line) {
            push_unique(&mut injection_points, line);
        }
    }

    let vulnerable = !vulnerabilities.is_empty();
    let dbms = first_capture(&DBMS, raw);
    let summary = if vulnerable {
        format!("SQL injection likely (DB: {})", dbms.as_deref().unwrap_or("unknown"))
    } else {
        "No SQL injection detected".to_string()
    };
    let details = InjectionDetails {
        tested_url: target.to_string(),
        dbms,
        payload: first_capture(&PAYLOAD, raw),
        findings_count: vulnerabilities.len(),
        databases_found: databases.len(),
        tables_found: tables.len(),
    };

    tracing::debug!(target_url = target, vulnerable, findings = details.findings_count, "parsed sqlmap output");

    vulnerabilities.truncate(VULNERABILITIES_CAP);
    warnings.truncate(WARNINGS_CAP);
    tables.truncate(TABLES_CAP);

    InjectionReport {
        success: vulnerable,
        vulnerable,
        vulnerabilities,
        warnings,
        databases,
        tables,
        injection_points,
        details,
        summary,
        raw_output: raw.to_string(),
        target: target.to_string(),
    }
}

#[cfg(test)]
#[path = "sqlmap_tests.rs"]
mod tests;
