// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const VULNERABLE_RUN: &str = "\
[10:00:01] [INFO] testing connection to the target URL
[10:00:02] [INFO] testing 'AND boolean-based blind - WHERE or HAVING clause'
[10:00:05] [INFO] GET parameter 'id' appears to be 'AND boolean-based blind' injectable
[10:00:09] [INFO] GET parameter 'id' is vulnerable. Do you want to keep testing the others? [y/N] N
sqlmap identified the following injection point(s) with a total of 46 HTTP(s) requests:
---
Parameter: id (GET)
    Type: boolean-based blind
    Title: AND boolean-based blind - WHERE or HAVING clause
    Payload: id=1 AND 4521=4521
---
[10:00:10] [INFO] the back-end DBMS is MySQL
back-end DBMS: MySQL >= 5.0.12
available databases [2]:
[*] information_schema
[*] shop

Database: shop
[3 tables]
+----------+
| orders   |
+----------+
";

#[test]
fn vulnerable_run_is_summarised() {
    let report = parse_sqlmap(VULNERABLE_RUN, "http://shop.example.com/?id=1");
    assert!(report.vulnerable);
    assert!(report.success);
    assert_eq!(report.summary, "SQL injection likely (DB: MySQL >= 5.0.12)");
    assert_eq!(report.details.dbms.as_deref(), Some("MySQL >= 5.0.12"));
    assert_eq!(report.details.payload.as_deref(), Some("id=1 AND 4521=4521"));
    assert_eq!(report.details.tested_url, "http://shop.example.com/?id=1");
    assert_eq!(report.vulnerabilities.len(), 2);
}

#[test]
fn databases_from_listing_block() {
    let report = parse_sqlmap(VULNERABLE_RUN, "u");
    assert_eq!(report.databases, ["information_schema", "shop"]);
    assert_eq!(report.details.databases_found, 2);
}

#[test]
fn injection_points_and_tables() {
    let report = parse_sqlmap(VULNERABLE_RUN, "u");
    assert_eq!(
        report.injection_points,
        [
            "sqlmap identified the following injection point(s) with a total of 46 HTTP(s) requests:",
            "Parameter: id (GET)",
            "Payload: id=1 AND 4521=4521",
        ]
    );
    assert_eq!(report.tables, ["[3 tables]"]);
}

#[test]
fn info_lines_mentioning_sql_injection_are_not_findings() {
    let raw = "\
[10:00:01] [INFO] testing for SQL injection on GET parameter 'id'
[10:00:20] [WARNING] GET parameter 'id' does not seem to be injectable
[10:00:21] [CRITICAL] all tested parameters do not appear to be injectable
";
    let report = parse_sqlmap(raw, "u");
    assert!(!report.vulnerable);
    assert!(!report.success);
    assert_eq!(report.summary, "No SQL injection detected");
    assert_eq!(report.warnings.len(), 1);
    assert!(report.databases.is_empty());
}

#[test]
fn numbered_database_lines() {
    let raw = "[1] information_schema\n[2] wordpress\n[1] information_schema\n";
    let report = parse_sqlmap(raw, "u");
    assert_eq!(report.databases, ["information_schema", "wordpress"]);
}

#[test]
fn unknown_dbms_in_summary() {
    let report = parse_sqlmap("Parameter 'q' is injectable\n", "u");
    assert_eq!(report.summary, "SQL injection likely (DB: unknown)");
}
