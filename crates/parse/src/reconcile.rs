// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backfill missing port-scan fields from the stored raw text.
//!
//! Reconciliation only ever adds: a field that already has a value keeps it.
//! Running it twice gives the same record as running it once.

use crate::{extract_cves, parse_nmap};
use sj_core::{HostInfo, Job, PortScanReport, ScanReport, Tool};

fn keep_vec(existing: &[String], parsed: Vec<String>) -> Vec<String> {
    if existing.is_empty() {
        parsed
    } else {
        existing.to_vec()
    }
}

fn keep_opt(existing: &Option<String>, parsed: Option<String>) -> Option<String> {
    match existing {
        Some(value) if !value.trim().is_empty() => Some(value.clone()),
        _ => parsed,
    }
}

fn keep_str(existing: &str, fallback: &str) -> String {
    if existing.is_empty() {
        fallback.to_string()
    } else {
        existing.to_string()
    }
}

fn merge_host_info(existing: &HostInfo, parsed: HostInfo) -> HostInfo {
    HostInfo {
        service_info: keep_opt(&existing.service_info, parsed.service_info),
        os: keep_opt(&existing.os, parsed.os),
        not_shown: keep_opt(&existing.not_shown, parsed.not_shown),
        ssh_host_keys: keep_vec(&existing.ssh_host_keys, parsed.ssh_host_keys),
    }
}

/// Merge fields recovered from `raw` into `existing`.
///
/// The existing record's own raw text takes precedence over `raw`. A record
/// that already has ports, banners or an OS guess only gets its CVE list
/// backfilled.
pub fn reconcile_port_scan(existing: &PortScanReport, raw: &str) -> PortScanReport {
    let text = if existing.raw_output.trim().is_empty() { raw } else { existing.raw_output.as_str() };
    if text.trim().is_empty() {
        return existing.clone();
    }

    let cve_list = if existing.cve_list.is_empty() { extract_cves(text) } else { existing.cve_list.clone() };

    if existing.is_useful() {
        return PortScanReport {
            cve_list,
            raw_output: keep_str(&existing.raw_output, text),
            ..existing.clone()
        };
    }

    let parsed = parse_nmap(text, &existing.target);
    let open_ports = keep_vec(&existing.open_ports, parsed.open_ports);
    let filtered_ports = keep_vec(&existing.filtered_ports, parsed.filtered_ports);
    PortScanReport {
        success: existing.success || parsed.success,
        total_ports: existing.total_ports.max(open_ports.len()),
        filtered_count: existing.filtered_count.max(filtered_ports.len()),
        open_ports,
        filtered_ports,
        closed_ports: keep_vec(&existing.closed_ports, parsed.closed_ports),
        service_versions: keep_vec(&existing.service_versions, parsed.service_versions),
        vulnerabilities: keep_vec(&existing.vulnerabilities, parsed.vulnerabilities),
        cve_list,
        os_detection: keep_opt(&existing.os_detection, parsed.os_detection),
        host_info: merge_host_info(&existing.host_info, parsed.host_info),
        scan_completed: existing.scan_completed || parsed.scan_completed,
        raw_output: keep_str(&existing.raw_output, text),
        target: existing.target.clone(),
    }
}

fn is_port_scan_job(job: &Job) -> bool {
    job.tool == Tool::Nmap.name() || Tool::from_executable(&job.executable) == Some(Tool::Nmap)
}

/// Reconcile a stored nmap job in place. Returns whether anything changed.
///
/// Jobs for other tools, and jobs with no raw text at all, are left alone.
pub fn reconcile_job(job: &mut Job) -> bool {
    if !is_port_scan_job(job) {
        return false;
    }
    let existing = match &job.results.report {
        Some(ScanReport::PortScan(report)) => report.clone(),
        Some(ScanReport::Raw(raw)) => PortScanReport {
            raw_output: raw.raw_output.clone(),
            target: keep_str(&raw.target, &job.target),
            ..PortScanReport::default()
        },
        None => PortScanReport { target: job.target.clone(), ..PortScanReport::default() },
        Some(_) => return false,
    };

    if existing.raw_output.trim().is_empty() && job.results.raw_output.trim().is_empty() {
        return false;
    }

    let merged = reconcile_port_scan(&existing, &job.results.raw_output);
    if job.results.report.as_ref() == Some(&ScanReport::PortScan(merged.clone())) {
        return false;
    }
    tracing::debug!(job_id = %job.id, open = merged.open_ports.len(), "reconciled port scan from raw output");
    job.results.report = Some(ScanReport::PortScan(merged));
    true
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
