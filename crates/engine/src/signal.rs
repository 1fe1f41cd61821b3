// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Termination signals for supervised processes.

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

/// Ask a process to terminate. A process that already exited is not an error.
pub(crate) fn terminate(pid: u32) {
    send(pid, Signal::SIGTERM);
}

fn send(pid: u32, signal: Signal) {
    let Ok(raw) = i32::try_from(pid) else {
        return;
    };
    if raw <= 0 {
        return;
    }
    match kill(Pid::from_raw(raw), signal) {
        Ok(()) => tracing::debug!(pid, %signal, "sent signal"),
        Err(nix::errno::Errno::ESRCH) => {}
        Err(e) => tracing::warn!(pid, %signal, error = %e, "failed to signal process"),
    }
}

/// Whether the process was stopped by SIGTERM.
pub(crate) fn terminated_by_sigterm(status: &ExitStatus) -> bool {
    status.signal() == Some(Signal::SIGTERM as i32)
}

pub(crate) fn describe(status: &ExitStatus) -> String {
    match (status.code(), status.signal()) {
        (Some(code), _) => format!("exit code {code}"),
        (None, Some(sig)) => format!("signal {sig}"),
        (None, None) => "unknown exit status".to_string(),
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
