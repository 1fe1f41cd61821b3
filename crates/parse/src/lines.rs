// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line scanning helpers shared by the parsers.

use regex::Regex;
use std::sync::LazyLock;

/// Compile a pattern that is a compile-time constant.
#[allow(clippy::expect_used)]
pub(crate) fn constant(pattern: &str) -> Regex {
    Regex::new(pattern).expect("constant regex pattern is valid")
}

static CVE_ID: LazyLock<Regex> = LazyLock::new(|| constant(r"(?i)CVE-\d{4}-\d{4,7}"));

/// Trimmed, non-blank lines.
pub(crate) fn lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines().map(str::trim).filter(|l| !l.is_empty())
}

/// Push unless already present. Returns whether the item was added.
pub(crate) fn push_unique(list: &mut Vec<String>, item: &str) -> bool {
    if list.iter().any(|existing| existing == item) {
        return false;
    }
    list.push(item.to_string());
    true
}

/// Append `line` to a newline-joined field.
pub(crate) fn append_line(field: &mut Option<String>, line: &str) {
    match field {
        Some(existing) => {
            existing.push('\n');
            existing.push_str(line);
        }
        None => *field = Some(line.to_string()),
    }
}

/// First capture group of `re` in `text`, trimmed.
pub(crate) fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// CVE identifiers in `text`: uppercased, unique, in first-seen order.
pub fn extract_cves(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    for m in CVE_ID.find_iter(text) {
        push_unique(&mut out, &m.as_str().to_uppercase());
    }
    out
}

pub(crate) fn has_cve(line: &str) -> bool {
    CVE_ID.is_match(line)
}

#[cfg(test)]
#[path = "lines_tests.rs"]
mod tests;
