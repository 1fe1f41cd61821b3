// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Port/service scanner output.

use crate::lines::{append_line, constant, extract_cves, has_cve, lines, push_unique};
use regex::Regex;
use sj_core::{HostInfo, PortScanReport};
use std::sync::LazyLock;

const CLOSED_PORTS_CAP: usize = 20;

static PORT_LINE: LazyLock<Regex> =
    LazyLock::new(|| constant(r"(?i)^(\d+)/(tcp|udp|sctp)\s+(\S+)(?:\s+(.*))?$"));
static DISCOVERED: LazyLock<Regex> =
    LazyLock::new(|| constant(r"(?i)Discovered open port (\d+)/(tcp|udp|sctp)"));
static VULN_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| constant(r"(?i)vulnerable|security hole|exploitable"));
static OS_HINT: LazyLock<Regex> =
    LazyLock::new(|| constant(r"(?i)OS details:|Running:|Aggressive OS guesses:"));
/// `|   2048 aa:bb:... (RSA)` under an ssh-hostkey script header.
static HOST_KEY_LINE: LazyLock<Regex> = LazyLock::new(|| constant(r"^\|_?\s+\d+\s+[0-9a-fA-F:]{8,}"));

/// Parse nmap text output.
pub fn parse_nmap(raw: &str, target: &str) -> PortScanReport {
    let mut open_ports: Vec<String> = Vec::new();
    let mut filtered_ports = Vec::new();
    let mut closed_ports = Vec::new();
    let mut service_versions = Vec::new();
    let mut vulnerabilities = Vec::new();
    let mut host_info = HostInfo::default();
    let mut scan_completed = false;
    let mut in_host_keys = false;

    for line in lines(raw) {
        let lower = line.to_lowercase();

        if let Some(caps) = PORT_LINE.captures(line) {
            let port = format!("{}/{}", &caps[1], caps[2].to_lowercase());
            let state = caps[3].to_lowercase();
            if state.starts_with("open") {
                // A table row supersedes an earlier "Discovered open port" entry.
                let short = format!("{port} open");
                if let Some(slot) = open_ports.iter_mut().find(|p| **p == short) {
                    *slot = line.to_string();
                } else {
                    push_unique(&mut open_ports, line);
                }
            } else if state.starts_with("filtered") {
                push_unique(&mut filtered_ports, line);
            } else if state.starts_with("closed") && closed_ports.len() < CLOSED_PORTS_CAP {
                push_unique(&mut closed_ports, line);
            }
        } else if let Some(caps) = DISCOVERED.captures(line) {
            let port = format!("{}/{}", &caps[1], caps[2].to_lowercase());
            let prefix = format!("{port} ");
            if !open_ports.iter().any(|p| p.to_lowercase().starts_with(&prefix)) {
                open_ports.push(format!("{port} open"));
            }
        }

        if line.starts_with('|') && line.contains(':') {
            push_unique(&mut service_versions, line);
        }

        if lower.contains("ssh-hostkey") {
            in_host_keys = true;
            push_unique(&mut host_info.ssh_host_keys, line);
        } else if in_host_keys && HOST_KEY_LINE.is_match(line) {
            push_unique(&mut host_info.ssh_host_keys, line);
        } else if !line.starts_with('|') {
            in_host_keys = false;
        }

        if lower.contains("service info:") {
            append_line(&mut host_info.service_info, line);
        }
        if OS_HINT.is_match(line) {
            append_line(&mut host_info.os, line);
        }
        if lower.contains("not shown:") {
            append_line(&mut host_info.not_shown, line);
        }

        if has_cve(line) || VULN_KEYWORD.is_match(line) {
            push_unique(&mut vulnerabilities, line);
        }

        if lower.starts_with("nmap done") {
            scan_completed = true;
        }
    }

    tracing::debug!(
        target_host = target,
        open = open_ports.len(),
        completed = scan_completed,
        "parsed nmap output"
    );

    PortScanReport {
        success: !raw.is_empty(),
        total_ports: open_ports.len(),
        filtered_count: filtered_ports.len(),
        open_ports,
        filtered_ports,
        closed_ports,
        service_versions,
        vulnerabilities,
        cve_list: extract_cves(raw),
        os_detection: host_info.os.clone(),
        host_info,
        scan_completed,
        raw_output: raw.to_string(),
        target: target.to_string(),
    }
}

#[cfg(test)]
#[path = "nmap_tests.rs"]
mod tests;
