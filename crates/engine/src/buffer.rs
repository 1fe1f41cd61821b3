// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded tail buffers for captured process output.

/// Keeps the most recent `cap` bytes appended to it.
#[derive(Debug, Clone, Default)]
pub struct TailBuffer {
    bytes: Vec<u8>,
    cap: usize,
    /// Total bytes ever appended, including dropped ones.
    seen: u64,
}

impl TailBuffer {
    pub fn new(cap: usize) -> Self {
        Self { bytes: Vec::with_capacity(cap.min(64 * 1024)), cap, seen: 0 }
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.seen += chunk.len() as u64;
        if chunk.len() >= self.cap {
            self.bytes.clear();
            self.bytes.extend_from_slice(&chunk[chunk.len() - self.cap..]);
            return;
        }
        self.bytes.extend_from_slice(chunk);
        if self.bytes.len() > self.cap {
            let excess = self.bytes.len() - self.cap;
            self.bytes.drain(..excess);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn truncated(&self) -> bool {
        self.seen > self.bytes.len() as u64
    }

    /// Last `n` bytes as text (lossy at a split code point).
    pub fn tail_text(&self, n: usize) -> String {
        let start = self.bytes.len().saturating_sub(n);
        String::from_utf8_lossy(&self.bytes[start..]).into_owned()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stream {
    Stdout,
    Stderr,
}

/// The stdout/stderr pair of one process.
#[derive(Debug, Clone, Default)]
pub struct OutputBuffers {
    pub stdout: TailBuffer,
    pub stderr: TailBuffer,
}

impl OutputBuffers {
    pub fn new(cap: usize) -> Self {
        Self { stdout: TailBuffer::new(cap), stderr: TailBuffer::new(cap) }
    }

    pub(crate) fn push(&mut self, stream: Stream, chunk: &[u8]) {
        match stream {
            Stream::Stdout => self.stdout.push(chunk),
            Stream::Stderr => self.stderr.push(chunk),
        }
    }

    /// Stdout followed by stderr, as handed to the parsers.
    pub fn combined_text(&self) -> String {
        let mut text = self.stdout.text();
        if !self.stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&self.stderr.text());
        }
        text
    }

    /// Recent stdout for partial-output snapshots; falls back to stderr when
    /// stdout is empty.
    pub fn snapshot_text(&self, cap: usize) -> String {
        if self.stdout.is_empty() {
            self.stderr.tail_text(cap)
        } else {
            self.stdout.tail_text(cap)
        }
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
