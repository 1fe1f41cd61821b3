// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use sj_core::test_support::completed_raw_job;
use sj_core::{JobResults, RawReport};

const RAW: &str = "\
Discovered open port 80/tcp on 10.0.0.5
80/tcp open  http    nginx 1.18.0
|_http-server-header: nginx/1.18.0
| vulners: CVE-2021-23017 7.7
OS details: Linux 4.15 - 5.6
Nmap done: 1 IP address (1 host up) scanned in 9.87 seconds
";

#[test]
fn empty_record_is_rebuilt_from_raw() {
    let existing = PortScanReport { target: "web".into(), ..PortScanReport::default() };
    let merged = reconcile_port_scan(&existing, RAW);
    assert_eq!(merged.open_ports, ["80/tcp open  http    nginx 1.18.0"]);
    assert_eq!(merged.cve_list, ["CVE-2021-23017"]);
    assert_eq!(merged.os_detection.as_deref(), Some("OS details: Linux 4.15 - 5.6"));
    assert_eq!(merged.raw_output, RAW);
    assert_eq!(merged.target, "web");
    assert!(merged.success);
}

#[test]
fn useful_record_only_gets_cves() {
    let existing = PortScanReport {
        open_ports: vec!["22/tcp open ssh".into()],
        raw_output: RAW.into(),
        ..PortScanReport::default()
    };
    let merged = reconcile_port_scan(&existing, "");
    assert_eq!(merged.open_ports, ["22/tcp open ssh"]);
    assert!(merged.service_versions.is_empty());
    assert_eq!(merged.cve_list, ["CVE-2021-23017"]);
}

#[test]
fn existing_values_are_kept() {
    let existing = PortScanReport {
        cve_list: vec!["CVE-1999-0001".into()],
        host_info: HostInfo { not_shown: Some("Not shown: 999 closed".into()), ..HostInfo::default() },
        ..PortScanReport::default()
    };
    let merged = reconcile_port_scan(&existing, RAW);
    assert_eq!(merged.cve_list, ["CVE-1999-0001"]);
    assert_eq!(merged.host_info.not_shown.as_deref(), Some("Not shown: 999 closed"));
    assert_eq!(merged.open_ports.len(), 1);
}

#[test]
fn blank_raw_changes_nothing() {
    let existing = PortScanReport::default();
    assert_eq!(reconcile_port_scan(&existing, "  \n"), existing);
}

#[test]
fn job_without_report_is_reconciled_once() {
    let mut job = completed_raw_job("j1", "nmap", RAW);
    assert!(reconcile_job(&mut job));
    let Some(ScanReport::PortScan(report)) = &job.results.report else { panic!("expected port scan") };
    assert_eq!(report.cve_list, ["CVE-2021-23017"]);
    assert!(!reconcile_job(&mut job));
}

#[test]
fn raw_only_report_is_upgraded() {
    let mut job = completed_raw_job("j2", "/opt/bin/nmap", "");
    job.results.report = Some(ScanReport::Raw(RawReport {
        tool: "nmap".into(),
        success: false,
        raw_output: RAW.into(),
        target: String::new(),
    }));
    assert!(reconcile_job(&mut job));
    let Some(ScanReport::PortScan(report)) = &job.results.report else { panic!("expected port scan") };
    assert_eq!(report.target, "scanme.example.org");
    assert_eq!(report.open_ports.len(), 1);
}

#[test]
fn other_tools_and_empty_jobs_are_ignored() {
    let mut nikto = completed_raw_job("j3", "nikto", "+ Server: nginx");
    assert!(!reconcile_job(&mut nikto));
    let mut empty = completed_raw_job("j4", "nmap", "");
    assert!(!reconcile_job(&mut empty));
    assert_eq!(empty.results, JobResults::default());
}

fn arb_scan_text() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        (1u16..1024).prop_map(|p| format!("{p}/tcp open http")),
        (1u16..1024).prop_map(|p| format!("{p}/tcp filtered x")),
        (1000u32..9999).prop_map(|n| format!("| vulners: CVE-2020-{n}")),
        Just("OS details: Linux".to_string()),
        Just("Not shown: 10 closed ports".to_string()),
        "[a-z ]{0,20}",
    ];
    proptest::collection::vec(line, 0..12).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn reconcile_is_idempotent(raw in arb_scan_text(), keep_ports in any::<bool>()) {
        let existing = PortScanReport {
            open_ports: if keep_ports { vec!["1/tcp open x".into()] } else { vec![] },
            ..PortScanReport::default()
        };
        let once = reconcile_port_scan(&existing, &raw);
        let twice = reconcile_port_scan(&once, &raw);
        prop_assert_eq!(once, twice);
    }
}
