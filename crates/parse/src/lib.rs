// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sj-parse: turns scanner text into structured reports
//!
//! Parsers are heuristic line classifiers. They never fail: output they do
//! not understand degrades to an empty or minimal report.

mod lines;

pub mod diagnose;
mod dispatch;
mod nikto;
mod nmap;
pub mod reconcile;
mod sqlmap;
mod sslscan;

pub use diagnose::{diagnose, explain, Diagnostic, DiagnosticKind};
pub use dispatch::{parse_output, parse_tool};
pub use lines::extract_cves;
pub use nikto::parse_nikto;
pub use nmap::parse_nmap;
pub use reconcile::{reconcile_job, reconcile_port_scan};
pub use sqlmap::parse_sqlmap;
pub use sslscan::parse_sslscan;
