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

//! Platform-level types shared by every layer of a QUIC stack
//!
//! The stack never branches on the address family of a peer. Instead it stores, compares,
//! hashes, parses and renders IPv4 and IPv6 endpoints through a single value type, and it
//! reports every failure through one stack-wide status code space.
//!
//! This crate provides:
//!
//! - [endpoints][address] which carry an address family, an IPv4 or IPv6 address and a port;
//! - [status codes][status] which unify host `errno` values with stack-defined conditions; and
//! - [certificate flags][cert_flags] which relax certificate validation.
//!
//! This crate does not perform any I/O, does not resolve names and does not allocate. Endpoints
//! convert to and from [`std::net::SocketAddr`] at the boundary to the operating system.

pub mod address;
pub mod cert_flags;
pub mod status;

pub(crate) mod utils;

#[cfg(test)]
pub(crate) mod test_utils;
