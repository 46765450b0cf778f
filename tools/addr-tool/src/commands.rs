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

//! Implementation of the `quic-addr` subcommands.
//!
//! Every command produces a serializable report, so the binary only decides how to print it.

use std::{
    collections::{HashMap, hash_map::Entry},
    fmt::{self, Display, Formatter},
    path::Path,
};

use anyhow::Context;
use quic_platform::{
    address::{AddressParseError, Endpoint},
    status::Status,
};
use serde::Serialize;

use crate::cli::FamilyArg;

/// Properties of a parsed endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointReport {
    /// Address family name.
    pub family: String,
    /// The IP address, if the family has one.
    pub address: Option<String>,
    /// Port in host byte order.
    pub port: u16,
    /// Whether the endpoint is a wildcard.
    pub wildcard: bool,
    /// The 32-bit endpoint hash.
    pub hash: u32,
    /// Canonical rendering.
    pub rendered: String,
}

impl From<&Endpoint> for EndpointReport {
    fn from(endpoint: &Endpoint) -> Self {
        Self {
            family: endpoint.family().to_string(),
            address: endpoint.ip().map(|ip| ip.to_string()),
            port: endpoint.port(),
            wildcard: endpoint.is_wildcard(),
            hash: endpoint.hash32(),
            rendered: endpoint.to_string(),
        }
    }
}

impl Display for EndpointReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "endpoint: {}", self.rendered)?;
        writeln!(f, "family:   {}", self.family)?;
        writeln!(f, "address:  {}", self.address.as_deref().unwrap_or("-"))?;
        writeln!(f, "port:     {}", self.port)?;
        writeln!(f, "wildcard: {}", self.wildcard)?;
        write!(f, "hash:     {:#010x}", self.hash)
    }
}

/// Parses `text` with the parser selected by `family`.
pub fn parse_endpoint(
    text: &str,
    family: FamilyArg,
    default_port: u16,
) -> Result<Endpoint, AddressParseError> {
    let result = match family {
        FamilyArg::Any => Endpoint::parse(text, default_port),
        FamilyArg::V4 => Endpoint::parse_v4_with_port(text, default_port),
        FamilyArg::V6 => Endpoint::parse_v6_with_port(text, default_port),
    };
    if let Err(e) = &result {
        tracing::debug!(input = text, ?family, error = %e, "Failed to parse endpoint");
    }
    result
}

/// Runs the `parse` subcommand.
pub fn parse(text: &str, family: FamilyArg, default_port: u16) -> anyhow::Result<EndpointReport> {
    let endpoint = parse_endpoint(text, family, default_port)
        .map_err(|e| status_error(e.into(), e))
        .with_context(|| format!("cannot parse {text:?}"))?;
    Ok(EndpointReport::from(&endpoint))
}

/// Runs the `map` subcommand.
pub fn map(text: &str) -> anyhow::Result<EndpointReport> {
    let endpoint = parse_endpoint(text, FamilyArg::Any, 0)
        .map_err(|e| status_error(e.into(), e))
        .with_context(|| format!("cannot parse {text:?}"))?;
    let mapped = endpoint.to_v4_mapped();
    tracing::debug!(%endpoint, %mapped, "Mapped endpoint");
    Ok(EndpointReport::from(&mapped))
}

/// Runs the `unmap` subcommand.
pub fn unmap(text: &str) -> anyhow::Result<EndpointReport> {
    let endpoint = parse_endpoint(text, FamilyArg::V6, 0)
        .map_err(|e| status_error(e.into(), e))
        .with_context(|| format!("cannot parse {text:?} as IPv6"))?;
    if !endpoint.is_v4_mapped() {
        tracing::info!(%endpoint, "Endpoint is not V4-mapped, leaving it unchanged");
    }
    Ok(EndpointReport::from(&endpoint.to_v4_unmapped()))
}

/// Description of a raw status value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// The raw value.
    pub code: i32,
    /// Symbolic name, if the value is a named alias.
    pub name: Option<&'static str>,
    /// Whether the value lies in the custom range.
    pub custom: bool,
    /// Whether the value denotes success.
    pub succeeded: bool,
}

impl Display for StatusReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let outcome = if self.succeeded { "succeeded" } else { "failed" };
        let origin = if self.custom { "custom" } else { "platform" };
        write!(
            f,
            "{} ({}): {outcome}, {origin} range",
            self.code,
            self.name.unwrap_or("unnamed")
        )
    }
}

/// Runs the `status` subcommand.
pub fn status(code: i32) -> StatusReport {
    let status = Status::from_raw(code);
    StatusReport {
        code,
        name: status.name(),
        custom: status.is_custom(),
        succeeded: status.succeeded(),
    }
}

/// Result of validating a file of endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Number of entries that parsed.
    pub valid: usize,
    /// Entries that did not parse, with the reason.
    pub invalid: Vec<(String, String)>,
    /// Entries equal to an earlier entry, paired with that earlier entry.
    pub duplicates: Vec<(String, String)>,
}

impl CheckReport {
    /// Returns true if every entry parsed.
    pub fn is_ok(&self) -> bool {
        self.invalid.is_empty()
    }
}

impl Display for CheckReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} valid, {} invalid, {} duplicate",
            self.valid,
            self.invalid.len(),
            self.duplicates.len()
        )?;
        for (entry, reason) in &self.invalid {
            write!(f, "\ninvalid:   {entry:?}: {reason}")?;
        }
        for (entry, first) in &self.duplicates {
            write!(f, "\nduplicate: {entry:?} repeats {first:?}")?;
        }
        Ok(())
    }
}

/// Validates a list of endpoint strings and reports duplicates.
pub fn check_entries<S: AsRef<str>>(entries: &[S]) -> CheckReport {
    let mut report = CheckReport::default();
    let mut seen: HashMap<Endpoint, &str> = HashMap::new();

    for entry in entries {
        let entry = entry.as_ref();
        let endpoint = match parse_endpoint(entry, FamilyArg::Any, 0) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                report.invalid.push((entry.to_string(), e.to_string()));
                continue;
            }
        };
        report.valid += 1;

        match seen.entry(endpoint) {
            Entry::Occupied(first) => {
                tracing::warn!(entry, first = *first.get(), "Duplicate endpoint");
                report
                    .duplicates
                    .push((entry.to_string(), first.get().to_string()));
            }
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
        }
    }
    report
}

/// Runs the `check` subcommand.
pub fn check(path: &Path) -> anyhow::Result<CheckReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let entries: Vec<String> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of strings", path.display()))?;
    tracing::debug!(entries = entries.len(), path = %path.display(), "Loaded endpoint list");
    Ok(check_entries(&entries))
}

fn status_error(status: Status, err: AddressParseError) -> anyhow::Error {
    anyhow::anyhow!("{err} (status {status})")
}
