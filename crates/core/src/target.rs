// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan target normalisation.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("target is empty")]
    Empty,
    #[error("invalid hostname {0:?}: only letters, digits, dots and hyphens are allowed")]
    InvalidHost(String),
    #[error("hostname {0:?} is too short")]
    TooShort(String),
}

/// Reduce a URL or host string to a bare hostname.
///
/// Strips the scheme, any path/query, a port suffix and a leading `www.`.
pub fn normalize_host(input: &str) -> Result<String, TargetError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TargetError::Empty);
    }
    let without_scheme = match trimmed.find("://") {
        Some(idx) => &trimmed[idx + 3..],
        None => trimmed,
    };
    let authority = without_scheme.split(['/', '?', '#']).next().unwrap_or_default();
    // user:pass@host:port
    let host_port = authority.rsplit('@').next().unwrap_or_default();
    let host = host_port.split(':').next().unwrap_or_default();
    let host = match host.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("www.") => &host[4..],
        _ => host,
    };

    if host.is_empty() || !host.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-') {
        return Err(TargetError::InvalidHost(host.to_string()));
    }
    if host.len() < 3 {
        return Err(TargetError::TooShort(host.to_string()));
    }
    Ok(host.to_string())
}

/// URL handed to an injection tester: needs at least one query parameter.
pub fn injection_url(input: &str) -> Result<String, TargetError> {
    let url = input.trim();
    if url.is_empty() {
        return Err(TargetError::Empty);
    }
    // Validates the host portion even though the URL is passed through.
    normalize_host(url)?;
    if url.contains('?') {
        return Ok(url.to_string());
    }
    let with_scheme = if url.contains("://") { url.to_string() } else { format!("http://{url}") };
    Ok(format!("{}/?id=1", with_scheme.trim_end_matches('/')))
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
