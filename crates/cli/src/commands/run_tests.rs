// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::{Arc, Mutex};
use yare::parameterized;

#[parameterized(
    keep = { None, Some(Duration::from_secs(300)) },
    zero_unbounded = { Some(0), None },
    explicit = { Some(250), Some(Duration::from_millis(250)) },
)]
fn timeout_override(timeout_ms: Option<u64>, expected: Option<Duration>) {
    assert_eq!(with_timeout(ProcessLimits::default(), timeout_ms).timeout, expected);
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn logs_of(f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn zero_timeout_override_is_logged() {
    let logs = logs_of(|| {
        let _ = with_timeout(ProcessLimits::default(), Some(0));
    });
    assert!(logs.contains("WARN"), "{logs}");
    assert!(logs.contains("without a time limit"), "{logs}");
}

#[test]
fn explicit_timeout_override_is_quiet() {
    let logs = logs_of(|| {
        let _ = with_timeout(ProcessLimits::default(), Some(250));
    });
    assert!(logs.is_empty(), "{logs}");
}
