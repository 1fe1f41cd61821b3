// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Route raw output to the parser for the tool that produced it.

use crate::{parse_nikto, parse_nmap, parse_sqlmap, parse_sslscan};
use sj_core::{RawReport, ScanReport, Tool};

/// Parse output from a known tool.
pub fn parse_tool(tool: Tool, raw: &str, target: &str) -> ScanReport {
    match tool {
        Tool::Nmap => ScanReport::PortScan(parse_nmap(raw, target)),
        Tool::Nikto => ScanReport::WebScan(parse_nikto(raw, target)),
        Tool::Sslscan => ScanReport::TlsScan(parse_sslscan(raw, target)),
        Tool::Sqlmap => ScanReport::Injection(parse_sqlmap(raw, target)),
    }
}

/// Parse output by executable name; unknown executables get a raw report.
pub fn parse_output(executable: &str, raw: &str, target: &str) -> ScanReport {
    match Tool::from_executable(executable) {
        Some(tool) => parse_tool(tool, raw, target),
        None => {
            tracing::debug!(executable, "no parser for executable, keeping raw output");
            ScanReport::Raw(RawReport {
                tool: if executable.is_empty() { "unknown".to_string() } else { executable.to_string() },
                success: false,
                raw_output: raw.to_string(),
                target: target.to_string(),
            })
        }
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
