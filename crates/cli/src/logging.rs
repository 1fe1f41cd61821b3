// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup: terse stderr output plus a persistent log file.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::env;

/// Install the global subscriber. The returned guard flushes the file
/// writer on drop and must live until the process exits.
///
/// A log directory that cannot be created degrades to stderr-only logging.
pub fn init(state_dir: &Path) -> Option<WorkerGuard> {
    let stderr = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter(&env::log_filter(), "warn"));

    let log_dir = state_dir.join("logs");
    let (file, guard) = match std::fs::create_dir_all(&log_dir) {
        Ok(()) => {
            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(&log_dir, "sj.log"));
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter(&env::file_log_filter(), "info"));
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("warning: cannot create log directory {}: {e}", log_dir.display());
            (None, None)
        }
    };

    // Fails only when a subscriber is already installed.
    let _ = tracing_subscriber::registry().with(stderr).with(file).try_init();
    guard
}

fn filter(directive: &str, fallback: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(fallback))
}
