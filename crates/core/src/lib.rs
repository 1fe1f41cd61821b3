// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sj-core: shared domain types for supervised scan jobs

pub mod macros;

pub mod clock;
pub mod id;
pub mod job;
pub mod report;
pub mod target;
pub mod tool;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use job::{
    Job, JobId, JobPatch, JobResults, JobSpec, JobSpecBuilder, JobStatus, TransitionError, UnknownStatus,
};
pub use report::{
    CertificateDetails, HostInfo, InjectionDetails, InjectionReport, PortScanReport, RawReport,
    ScanReport, ScanStats, TlsScanReport, WebScanReport,
};
pub use target::{normalize_host, injection_url, TargetError};
pub use tool::{render_args, Tool, UnknownTool, TARGET_PLACEHOLDER};
