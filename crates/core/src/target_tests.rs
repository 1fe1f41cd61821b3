// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    bare          = { "example.com",                         "example.com" },
    https_path    = { "https://example.com/login?x=1",       "example.com" },
    www           = { "http://www.example.com/",             "example.com" },
    upper_www     = { "WWW.Example.com",                     "Example.com" },
    port          = { "https://example.com:8443/a",          "example.com" },
    credentials   = { "ftp://user:pw@files.example.org",     "files.example.org" },
    ip            = { "10.0.0.1",                            "10.0.0.1" },
    padded        = { "  scanme.nmap.org  ",                 "scanme.nmap.org" },
)]
fn normalizes_hosts(input: &str, expected: &str) {
    assert_eq!(normalize_host(input).unwrap(), expected);
}

#[parameterized(
    empty      = { "   " },
    shell_meta = { "example.com;rm -rf" },
    underscore = { "bad_host.com" },
    too_short  = { "ab" },
)]
fn rejects_bad_hosts(input: &str) {
    assert!(normalize_host(input).is_err());
}

#[test]
fn short_host_reports_too_short() {
    assert_eq!(normalize_host("http://a.b/").unwrap(), "a.b");
    assert_eq!(normalize_host("ab"), Err(TargetError::TooShort("ab".into())));
}

#[parameterized(
    adds_query       = { "http://example.com",        "http://example.com/?id=1" },
    trailing_slash   = { "https://example.com/app/",  "https://example.com/app/?id=1" },
    keeps_query      = { "http://example.com/?q=1",   "http://example.com/?q=1" },
    adds_scheme      = { "example.com",               "http://example.com/?id=1" },
)]
fn injection_urls(input: &str, expected: &str) {
    assert_eq!(injection_url(input).unwrap(), expected);
}
