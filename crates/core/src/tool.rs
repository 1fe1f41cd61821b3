// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Known scanning tools and their built-in invocation profiles.

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the normalised target in argument templates.
pub const TARGET_PLACEHOLDER: &str = "{target}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Nmap,
    Nikto,
    Sslscan,
    Sqlmap,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool: {0} (expected one of nmap, nikto, sslscan, sqlmap)")]
pub struct UnknownTool(pub String);

impl From<String> for UnknownTool {
    fn from(s: String) -> Self {
        Self(s)
    }
}

crate::str_enum! {
    Tool: UnknownTool {
        Nmap => "nmap",
        Nikto => "nikto",
        Sslscan => "sslscan",
        Sqlmap => "sqlmap",
    }
}

impl Tool {
    /// Identify a tool from an executable name or path.
    ///
    /// Case-insensitive substring match, checked in the order nmap, nikto,
    /// sqlmap, ssl.
    pub fn from_executable(executable: &str) -> Option<Tool> {
        let lower = executable.to_lowercase();
        if lower.contains("nmap") {
            Some(Tool::Nmap)
        } else if lower.contains("nikto") {
            Some(Tool::Nikto)
        } else if lower.contains("sqlmap") {
            Some(Tool::Sqlmap)
        } else if lower.contains("ssl") {
            Some(Tool::Sslscan)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        self.as_str()
    }

    /// Whether the tool takes a bare hostname (as opposed to a URL).
    pub fn wants_host(&self) -> bool {
        !matches!(self, Tool::Sqlmap)
    }

    /// Built-in argument template; `{target}` marks the target slot.
    pub fn default_args(&self) -> &'static [&'static str] {
        match self {
            Tool::Nmap => &[
                "-Pn",
                "-T4",
                "-sV",
                "-sC",
                "-O",
                "-v",
                "--top-ports",
                "1000",
                "--max-retries",
                "1",
                "--host-timeout",
                "240s",
                TARGET_PLACEHOLDER,
            ],
            Tool::Nikto => &["-h", TARGET_PLACEHOLDER, "-port", "80", "-Tuning", "b", "-maxtime", "120s", "-nointeractive"],
            Tool::Sslscan => &["--no-colour", TARGET_PLACEHOLDER],
            Tool::Sqlmap => &[
                "-u",
                TARGET_PLACEHOLDER,
                "--batch",
                "--smart",
                "--level",
                "5",
                "--risk",
                "3",
                "--threads",
                "3",
                "--forms",
                "--crawl",
                "3",
                "--no-cast",
                "--disable-coloring",
            ],
        }
    }

    /// Built-in hard timeout in milliseconds.
    pub fn default_timeout_ms(&self) -> u64 {
        match self {
            Tool::Nmap => 360_000,
            Tool::Nikto => 180_000,
            Tool::Sslscan => 180_000,
            Tool::Sqlmap => 185_000,
        }
    }

    /// Built-in output buffer cap, when it differs from the global default.
    pub fn default_buffer_cap(&self) -> Option<usize> {
        match self {
            Tool::Nmap => Some(400_000),
            Tool::Sslscan => Some(10_000),
            Tool::Nikto | Tool::Sqlmap => None,
        }
    }
}

/// Substitute `{target}` in every argument of a template.
pub fn render_args<S: AsRef<str>>(template: &[S], target: &str) -> Vec<String> {
    template.iter().map(|a| a.as_ref().replace(TARGET_PLACEHOLDER, target)).collect()
}

#[cfg(test)]
#[path = "tool_tests.rs"]
mod tests;
