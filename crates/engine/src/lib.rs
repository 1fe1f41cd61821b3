// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sj-engine: supervises external scan processes
//!
//! The [`Supervisor`] owns a registry of active processes, one supervision
//! task per job, and writes every lifecycle change through a
//! [`sj_storage::JobStore`].

mod buffer;
mod error;
mod limits;
mod signal;
mod supervisor;
mod task;

pub use buffer::{OutputBuffers, TailBuffer};
pub use error::SupervisorError;
pub use limits::{ProcessLimits, SupervisorConfig};
pub use supervisor::{CancelOutcome, StartRequest, Started, Supervisor, SHUTDOWN_REASON};
