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

//! Address families supported by an [`Endpoint`][super::Endpoint].

use std::fmt::{self, Display, Formatter};

use crate::status::Status;

/// The address kind of an [`Endpoint`][super::Endpoint].
///
/// The discriminants are the host's `AF_*` values, so a family converts losslessly to and from
/// the `sa_family` field of a native socket address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[repr(u16)]
pub enum AddressFamily {
    /// No family, used for wildcard endpoints that accept either IP version.
    #[default]
    Unspecified = libc::AF_UNSPEC as u16,
    /// IPv4.
    Inet = libc::AF_INET as u16,
    /// IPv6.
    Inet6 = libc::AF_INET6 as u16,
}

impl AddressFamily {
    /// Returns true if `raw` is one of the three supported `AF_*` values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quic_platform::address::AddressFamily;
    /// assert!(AddressFamily::is_valid_raw(libc::AF_INET6 as u16));
    /// assert!(!AddressFamily::is_valid_raw(libc::AF_UNIX as u16));
    /// ```
    pub const fn is_valid_raw(raw: u16) -> bool {
        raw == Self::Unspecified as u16 || raw == Self::Inet as u16 || raw == Self::Inet6 as u16
    }

    /// Returns the raw `AF_*` value.
    pub const fn to_raw(self) -> u16 {
        self as u16
    }

    /// The number of address bytes that belong to this family.
    ///
    /// Every family other than IPv4 uses the full IPv6 region, so an endpoint of unspecified
    /// family compares and hashes like an IPv6 one.
    pub const fn address_len(self) -> usize {
        match self {
            Self::Inet => 4,
            Self::Unspecified | Self::Inet6 => 16,
        }
    }

    /// The host name that resolves to the loopback address of this family.
    pub const fn localhost_name(self) -> &'static str {
        match self {
            Self::Inet => "localhost",
            Self::Unspecified | Self::Inet6 => "ip6-localhost",
        }
    }
}

impl TryFrom<u16> for AddressFamily {
    type Error = InvalidFamily;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        match raw {
            x if x == Self::Unspecified as u16 => Ok(Self::Unspecified),
            x if x == Self::Inet as u16 => Ok(Self::Inet),
            x if x == Self::Inet6 as u16 => Ok(Self::Inet6),
            _ => Err(InvalidFamily(raw)),
        }
    }
}

impl From<AddressFamily> for u16 {
    fn from(family: AddressFamily) -> Self {
        family.to_raw()
    }
}

impl Display for AddressFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unspecified => "unspecified",
            Self::Inet => "IPv4",
            Self::Inet6 => "IPv6",
        };
        f.write_str(name)
    }
}

/// Raised for a raw family value other than `AF_UNSPEC`, `AF_INET` or `AF_INET6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unsupported address family {0}")]
pub struct InvalidFamily(pub u16);

impl From<InvalidFamily> for Status {
    fn from(_: InvalidFamily) -> Self {
        Status::INVALID_PARAMETER
    }
}
