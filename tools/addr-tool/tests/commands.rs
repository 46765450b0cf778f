// Copyright 2025 Anapaya Systems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tests for the `quic-addr` subcommands.

use std::io::Write;

use addr_tool::{cli::FamilyArg, commands};
use test_log::test;

#[test]
fn parse_reports_properties() {
    let report = commands::parse("10.0.0.1:443", FamilyArg::Any, 0).unwrap();
    assert_eq!(report.family, "IPv4");
    assert_eq!(report.address.as_deref(), Some("10.0.0.1"));
    assert_eq!(report.port, 443);
    assert!(!report.wildcard);
    assert_eq!(report.rendered, "10.0.0.1:443");
}

#[test]
fn parse_applies_default_port() {
    let report = commands::parse("192.168.1.1", FamilyArg::Any, 53).unwrap();
    assert_eq!(report.port, 53);
    assert_eq!(report.rendered, "192.168.1.1:53");
}

#[test]
fn parse_respects_family() {
    assert!(commands::parse("2001:db8::1", FamilyArg::V4, 0).is_err());
    let report = commands::parse("2001:db8::1", FamilyArg::V6, 0).unwrap();
    assert_eq!(report.rendered, "2001:db8::1");
    assert_eq!(report.port, 0);
}

#[test]
fn parse_error_names_status() {
    let err = commands::parse("[::1", FamilyArg::Any, 0).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("INVALID_PARAMETER"), "{message}");
}

#[test]
fn map_and_unmap() {
    let mapped = commands::map("192.0.2.1:443").unwrap();
    assert_eq!(mapped.family, "IPv6");
    assert_eq!(mapped.rendered, "[::ffff:192.0.2.1]:443");

    let unmapped = commands::unmap(&mapped.rendered).unwrap();
    assert_eq!(unmapped.rendered, "192.0.2.1:443");

    let untouched = commands::unmap("[2001:db8::1]:443").unwrap();
    assert_eq!(untouched.rendered, "[2001:db8::1]:443");
}

#[test]
fn status_reports_polarity() {
    let pending = commands::status(-2);
    assert_eq!(pending.name, Some("PENDING"));
    assert!(pending.succeeded);

    let custom = commands::status(200_000_013);
    assert_eq!(custom.name, Some("PROTOCOL_ERROR"));
    assert!(custom.custom);
    assert!(!custom.succeeded);
    assert_eq!(
        custom.to_string(),
        "200000013 (PROTOCOL_ERROR): failed, custom range"
    );
}

#[test]
fn check_finds_invalid_and_duplicate_entries() {
    let report = commands::check_entries(&[
        "10.0.0.1:443",
        "[::1]:8080",
        "10.0.0.1:443",
        "10.0.0.1:444",
        "not-an-address",
    ]);
    assert_eq!(report.valid, 4);
    assert_eq!(report.invalid.len(), 1);
    assert_eq!(report.invalid[0].0, "not-an-address");
    assert_eq!(
        report.duplicates,
        vec![("10.0.0.1:443".to_string(), "10.0.0.1:443".to_string())]
    );
    assert!(!report.is_ok());
}

#[test]
fn check_reads_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"["[::1]:443", "::1", "[::1]:443"]"#).unwrap();

    let report = commands::check(file.path()).unwrap();
    assert!(report.is_ok());
    assert_eq!(report.valid, 3);
    assert_eq!(report.duplicates.len(), 1);
}

#[test]
fn check_rejects_malformed_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"endpoints": []}}"#).unwrap();
    assert!(commands::check(file.path()).is_err());
}
