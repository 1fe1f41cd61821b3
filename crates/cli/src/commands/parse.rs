// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sj parse` - structure saved scanner output without running anything

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use sj_core::ScanReport;
use sj_parse::{explain, parse_output};

use super::Context;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct ParseArgs {
    /// Tool name or executable path that produced the output
    pub tool: String,

    /// File containing the output, or `-` for stdin
    pub file: PathBuf,

    /// Target the output refers to
    #[arg(long, default_value = "")]
    pub target: String,
}

#[derive(Serialize)]
struct ReportView {
    report: ScanReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

pub fn handle(ctx: &Context, args: ParseArgs) -> Result<()> {
    let raw = read_input(&args.file)?;
    let report = parse_output(&args.tool, &raw, &args.target);
    let note = explain(&report);
    match ctx.format {
        OutputFormat::Json => output::print_json(&ReportView { report, note }),
        OutputFormat::Text => {
            output::print_report(&report, note.as_deref());
            Ok(())
        }
    }
}

fn read_input(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw).context("failed to read stdin")?;
        return Ok(raw);
    }
    let bytes = std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
