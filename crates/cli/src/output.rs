// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use sj_core::{Job, ScanReport};

use crate::color;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

/// Items shown per detail section before eliding the rest.
const DETAIL_LIMIT: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format elapsed seconds compactly ("5s", "2m", "1h", "3d").
pub fn format_elapsed(secs: u64) -> String {
    match secs {
        0..=59 => format!("{secs}s"),
        60..=3599 => format!("{}m", secs / 60),
        3600..=86_399 => format!("{}h", secs / 3600),
        _ => format!("{}d", secs / 86_400),
    }
}

/// Format a timestamp as relative time (e.g., "5s", "2m", "1h", "3d")
pub fn format_time_ago(epoch_ms: u64, now_ms: u64) -> String {
    if epoch_ms == 0 {
        return "-".to_string();
    }
    format_elapsed(now_ms.saturating_sub(epoch_ms) / 1000)
}

/// Detail lines for a report: the interesting findings, capped per section.
pub fn report_details(report: &ScanReport) -> Vec<String> {
    let mut out = Vec::new();
    match report {
        ScanReport::PortScan(r) => {
            section(&mut out, "Open ports", &r.open_ports);
            section(&mut out, "Service versions", &r.service_versions);
            section(&mut out, "CVEs", &r.cve_list);
            section(&mut out, "Vulnerabilities", &r.vulnerabilities);
            if let Some(os) = r.host_info.os.as_deref().or(r.os_detection.as_deref()) {
                out.push(format!("OS: {os}"));
            }
        }
        ScanReport::WebScan(r) => {
            if let Some(server) = &r.server_info {
                out.push(format!("Server: {server}"));
            }
            section(&mut out, "Critical", &r.critical);
            section(&mut out, "High", &r.high);
            section(&mut out, "Findings", &r.findings);
        }
        ScanReport::TlsScan(r) => {
            section(&mut out, "Issues", &r.issues);
            section(&mut out, "Deprecated protocols", &r.deprecated_protocols);
            if let Some(valid_to) = &r.certificate.valid_to {
                out.push(format!("Certificate valid until: {valid_to}"));
            }
        }
        ScanReport::Injection(r) => {
            section(&mut out, "Injection points", &r.injection_points);
            section(&mut out, "Databases", &r.databases);
            section(&mut out, "Warnings", &r.warnings);
        }
        ScanReport::Raw(_) => {}
    }
    out
}

fn section(out: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push(format!("{title}:"));
    for item in items.iter().take(DETAIL_LIMIT) {
        out.push(format!("  {item}"));
    }
    if items.len() > DETAIL_LIMIT {
        out.push(format!("  ... and {} more", items.len() - DETAIL_LIMIT));
    }
}

/// Print a report (from `sj parse`) with an optional diagnostic note.
pub fn print_report(report: &ScanReport, note: Option<&str>) {
    println!("{} {}", color::header("Summary:"), report.summary());
    if let Some(note) = note {
        println!("{} {}", color::header("Note:"), note);
    }
    for line in report_details(report) {
        println!("{line}");
    }
}

pub fn print_job(job: &Job, note: Option<&str>, now_ms: u64) {
    println!("{} {}", color::header("Job:"), job.id);
    println!("{} {} ({})", color::header("Tool:"), job.tool, color::muted(&job.executable));
    println!("{} {}", color::header("Target:"), job.target);
    let exit = job.results.exit_code.map(|c| format!(" (exit code {c})")).unwrap_or_default();
    println!("{} {}{}", color::header("Status:"), color::status(job.status), exit);
    println!("{} {} ago", color::header("Created:"), format_time_ago(job.created_at_ms, now_ms));
    if let Some(err) = &job.results.error {
        println!("{} {}", color::header("Error:"), err);
    }
    match &job.results.report {
        Some(report) => print_report(report, note),
        None => {
            if let Some(note) = note {
                println!("{} {}", color::header("Note:"), note);
            }
            if let Some(partial) = job.results.partial_output.as_deref().filter(|p| !p.trim().is_empty()) {
                println!("{}", color::header("Partial output:"));
                println!("{}", partial.trim_end());
            }
        }
    }
}

/// One row per job: id, tool, status, target, age.
pub fn job_rows(jobs: &[Job], now_ms: u64) -> Vec<[String; 5]> {
    jobs.iter()
        .map(|job| {
            [
                job.id.to_string(),
                job.tool.clone(),
                job.status.to_string(),
                job.target.clone(),
                format_time_ago(job.created_at_ms, now_ms),
            ]
        })
        .collect()
}

/// Render rows as left-aligned columns under a header.
pub fn render_table(header: [&str; 5], rows: &[[String; 5]]) -> String {
    let mut widths = header.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }
    let mut out = String::new();
    let mut push_row = |cells: [&str; 5]| {
        let line: Vec<String> = cells.iter().zip(widths).map(|(cell, w)| format!("{cell:<w$}")).collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    };
    push_row(header);
    for row in rows {
        push_row([row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str(), row[4].as_str()]);
    }
    out
}
