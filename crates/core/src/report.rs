// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured scan results, one shape per tool family.
//!
//! Every report keeps the raw text and target it was built from so that a
//! reader can always fall back to the tool's own output.

use serde::{Deserialize, Serialize};

/// Parsed output of one scanning tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ScanReport {
    PortScan(PortScanReport),
    WebScan(WebScanReport),
    TlsScan(TlsScanReport),
    Injection(InjectionReport),
    Raw(RawReport),
}

impl ScanReport {
    pub fn raw_output(&self) -> &str {
        match self {
            ScanReport::PortScan(r) => &r.raw_output,
            ScanReport::WebScan(r) => &r.raw_output,
            ScanReport::TlsScan(r) => &r.raw_output,
            ScanReport::Injection(r) => &r.raw_output,
            ScanReport::Raw(r) => &r.raw_output,
        }
    }

    pub fn target(&self) -> &str {
        match self {
            ScanReport::PortScan(r) => &r.target,
            ScanReport::WebScan(r) => &r.target,
            ScanReport::TlsScan(r) => &r.target,
            ScanReport::Injection(r) => &r.target,
            ScanReport::Raw(r) => &r.target,
        }
    }

    pub fn success(&self) -> bool {
        match self {
            ScanReport::PortScan(r) => r.success,
            ScanReport::WebScan(r) => r.success,
            ScanReport::TlsScan(r) => r.success,
            ScanReport::Injection(r) => r.success,
            ScanReport::Raw(r) => r.success,
        }
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        match self {
            ScanReport::PortScan(r) => format!(
                "{} open, {} filtered, {} CVEs, {} vulnerability lines",
                r.open_ports.len(),
                r.filtered_count,
                r.cve_list.len(),
                r.vulnerabilities.len()
            ),
            ScanReport::WebScan(r) => format!(
                "{} findings ({} critical, {} high, {} medium, {} low)",
                r.total_findings,
                r.critical.len(),
                r.high.len(),
                r.medium.len(),
                r.low.len()
            ),
            ScanReport::TlsScan(r) => format!(
                "{} issues, TLS1.2 {}, TLS1.3 {}",
                r.total_issues,
                yes_no(r.supports_tls12),
                yes_no(r.supports_tls13)
            ),
            ScanReport::Injection(r) => r.summary.clone(),
            ScanReport::Raw(r) => format!("unparsed output from {} ({} bytes)", r.tool, r.raw_output.len()),
        }
    }
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

/// Host metadata reported alongside a port scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    /// The "Not shown: ..." summary line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_shown: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ssh_host_keys: Vec<String>,
}

impl HostInfo {
    pub fn is_empty(&self) -> bool {
        self.service_info.is_none() && self.os.is_none() && self.not_shown.is_none() && self.ssh_host_keys.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortScanReport {
    pub success: bool,
    pub open_ports: Vec<String>,
    pub total_ports: usize,
    pub filtered_ports: Vec<String>,
    pub filtered_count: usize,
    pub closed_ports: Vec<String>,
    pub service_versions: Vec<String>,
    pub vulnerabilities: Vec<String>,
    pub cve_list: Vec<String>,
    pub os_detection: Option<String>,
    pub host_info: HostInfo,
    pub scan_completed: bool,
    pub raw_output: String,
    pub target: String,
}

impl PortScanReport {
    /// Whether the record carries enough structure to be shown as-is.
    pub fn is_useful(&self) -> bool {
        !self.open_ports.is_empty()
            || !self.service_versions.is_empty()
            || self.os_detection.as_deref().is_some_and(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanStats {
    pub requests_made: u64,
    pub items_reported: u64,
    pub scan_completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebScanReport {
    pub success: bool,
    pub total_findings: usize,
    pub findings: Vec<String>,
    pub critical: Vec<String>,
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
    pub server_info: Option<String>,
    pub stats: ScanStats,
    pub raw_output: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateDetails {
    pub subject: Option<String>,
    pub issuer: Option<String>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub signature_algorithm: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TlsScanReport {
    pub success: bool,
    pub total_issues: usize,
    pub issues: Vec<String>,
    pub critical_issues: Vec<String>,
    pub weak_ciphers: Vec<String>,
    pub deprecated_protocols: Vec<String>,
    pub certificate_issues: Vec<String>,
    pub certificate: CertificateDetails,
    pub supports_tls12: bool,
    pub supports_tls13: bool,
    pub raw_output: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectionDetails {
    pub tested_url: String,
    pub dbms: Option<String>,
    pub payload: Option<String>,
    pub findings_count: usize,
    pub databases_found: usize,
    pub tables_found: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectionReport {
    pub success: bool,
    pub vulnerable: bool,
    pub vulnerabilities: Vec<String>,
    pub warnings: Vec<String>,
    pub databases: Vec<String>,
    pub tables: Vec<String>,
    pub injection_points: Vec<String>,
    pub details: InjectionDetails,
    pub summary: String,
    pub raw_output: String,
    pub target: String,
}

/// Fallback for executables no parser recognises.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawReport {
    /// Name of the executable that produced the output.
    #[serde(rename = "executable")]
    pub tool: String,
    pub success: bool,
    pub raw_output: String,
    pub target: String,
}
