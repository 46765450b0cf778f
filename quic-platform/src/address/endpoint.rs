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

//! The [`Endpoint`] value type and its family-aware operations.

use std::{
    fmt,
    hash::{Hash, Hasher},
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6},
};

use super::{AddressFamily, InvalidFamily};

const IPV4_OCTETS: usize = 4;
const IPV6_OCTETS: usize = 16;

/// Seed of [`Endpoint::hash32`].
const HASH_SEED: u32 = 5387;

/// An IPv4 or IPv6 address with a port, or an endpoint of unspecified family.
///
/// The address storage always has room for an IPv6 address. An IPv4 endpoint uses the first
/// four bytes; the remaining bytes are ignored by comparison and hashing, so two endpoints can
/// differ there and still be equal. The port is kept in network byte order and exposed in host
/// byte order.
///
/// Endpoints are plain values. Every operation takes its inputs by value or reference and
/// returns or writes a fresh result, so no two calls ever share state.
#[derive(Clone, Copy, Default)]
pub struct Endpoint {
    family: AddressFamily,
    octets: [u8; IPV6_OCTETS],
    port: [u8; 2],
}

impl Endpoint {
    /// An endpoint of unspecified family with a zero address and port.
    pub const UNSPECIFIED: Self = Self::new(AddressFamily::Unspecified);

    /// Creates an endpoint of the given family with a zero address and port.
    pub const fn new(family: AddressFamily) -> Self {
        Self {
            family,
            octets: [0; IPV6_OCTETS],
            port: [0; 2],
        }
    }

    /// Creates an IPv4 endpoint.
    pub const fn v4(ip: Ipv4Addr, port: u16) -> Self {
        let ip = ip.octets();
        let mut octets = [0; IPV6_OCTETS];
        octets[0] = ip[0];
        octets[1] = ip[1];
        octets[2] = ip[2];
        octets[3] = ip[3];
        Self {
            family: AddressFamily::Inet,
            octets,
            port: port.to_be_bytes(),
        }
    }

    /// Creates an IPv6 endpoint.
    pub const fn v6(ip: Ipv6Addr, port: u16) -> Self {
        Self {
            family: AddressFamily::Inet6,
            octets: ip.octets(),
            port: port.to_be_bytes(),
        }
    }

    /// Creates an endpoint from an IP address of either version.
    pub const fn from_ip(ip: IpAddr, port: u16) -> Self {
        match ip {
            IpAddr::V4(ip) => Self::v4(ip, port),
            IpAddr::V6(ip) => Self::v6(ip, port),
        }
    }

    /// Returns true if the family is valid.
    ///
    /// The address bytes are not inspected; an all-zero address is a legitimate wildcard.
    pub const fn is_valid(&self) -> bool {
        AddressFamily::is_valid_raw(self.family.to_raw())
    }

    /// Returns the address family.
    pub const fn family(&self) -> AddressFamily {
        self.family
    }

    /// Sets the address family.
    ///
    /// The address bytes and the port are kept as they are. Switching between IPv4 and IPv6 does
    /// not translate the address; use [`Self::to_v4_mapped`] for that.
    pub fn set_family(&mut self, family: AddressFamily) {
        self.family = family;
    }

    /// Returns the port in host byte order.
    pub const fn port(&self) -> u16 {
        u16::from_be_bytes(self.port)
    }

    /// Sets the port, given in host byte order.
    pub fn set_port(&mut self, port: u16) {
        self.port = port.to_be_bytes();
    }

    /// Returns the port bytes in network byte order.
    pub const fn port_bytes(&self) -> [u8; 2] {
        self.port
    }

    /// Returns the address bytes of the active family.
    ///
    /// An endpoint of unspecified family exposes the full 16-byte region.
    pub fn octets(&self) -> &[u8] {
        &self.octets[..self.family.address_len()]
    }

    /// Returns the IP address, or `None` for an endpoint of unspecified family.
    pub fn ip(&self) -> Option<IpAddr> {
        match self.family {
            AddressFamily::Unspecified => None,
            AddressFamily::Inet => Some(IpAddr::V4(self.ipv4())),
            AddressFamily::Inet6 => Some(IpAddr::V6(Ipv6Addr::from(self.octets))),
        }
    }

    fn ipv4(&self) -> Ipv4Addr {
        Ipv4Addr::new(self.octets[0], self.octets[1], self.octets[2], self.octets[3])
    }

    /// Compares only the addresses, using the family of `self`.
    ///
    /// The port is ignored and the families are assumed to agree; the caller is responsible for
    /// that. Use `==` for a comparison that also checks family and port.
    pub fn ip_eq(&self, other: &Self) -> bool {
        let len = self.family.address_len();
        self.octets[..len] == other.octets[..len]
    }

    /// Returns true for a wildcard endpoint.
    ///
    /// An endpoint of unspecified family is always a wildcard. Otherwise the endpoint is a
    /// wildcard if its address is all zero, whatever the port.
    pub fn is_wildcard(&self) -> bool {
        self.family == AddressFamily::Unspecified || self.octets().iter().all(|byte| *byte == 0)
    }

    /// Sets the address to the loopback address of the family.
    ///
    /// Family and port are left unchanged. Any family other than IPv4 receives the IPv6 loopback
    /// address.
    pub fn set_to_loopback(&mut self) {
        match self.family {
            AddressFamily::Inet => {
                self.octets[..IPV4_OCTETS].copy_from_slice(&Ipv4Addr::LOCALHOST.octets())
            }
            AddressFamily::Unspecified | AddressFamily::Inet6 => {
                self.octets = Ipv6Addr::LOCALHOST.octets()
            }
        }
    }

    /// Increments the last address byte by one. Intended for tests only.
    ///
    /// This generates sequentially distinct addresses. There is no carry into the preceding byte;
    /// the last byte wraps from 255 to 0.
    pub fn increment(&mut self) {
        let last = match self.family {
            AddressFamily::Inet => IPV4_OCTETS - 1,
            AddressFamily::Unspecified | AddressFamily::Inet6 => IPV6_OCTETS - 1,
        };
        self.octets[last] = self.octets[last].wrapping_add(1);
    }

    /// A 32-bit hash of the port and the active address bytes.
    ///
    /// The hash starts from a fixed seed and folds in both port bytes in network order followed
    /// by each address byte, using `h = (h << 5) - h + byte` with wrapping arithmetic. Equal
    /// endpoints always have equal hashes.
    pub fn hash32(&self) -> u32 {
        self.port
            .iter()
            .chain(self.octets())
            .fold(HASH_SEED, |hash, byte| {
                (hash << 5).wrapping_sub(hash).wrapping_add(u32::from(*byte))
            })
    }

    /// Converts an IPv4 endpoint to its V4-mapped IPv6 form (`::ffff:a.b.c.d`), keeping the
    /// port. Any other endpoint is returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quic_platform::address::{AddressFamily, Endpoint};
    /// let endpoint: Endpoint = "192.0.2.1:443".parse().unwrap();
    /// let mapped = endpoint.to_v4_mapped();
    /// assert_eq!(mapped.family(), AddressFamily::Inet6);
    /// assert_eq!(mapped.to_string(), "[::ffff:192.0.2.1]:443");
    /// assert_eq!(mapped.to_v4_unmapped(), endpoint);
    /// ```
    pub fn to_v4_mapped(&self) -> Self {
        match self.family {
            AddressFamily::Inet => Self::v6(self.ipv4().to_ipv6_mapped(), self.port()),
            AddressFamily::Unspecified | AddressFamily::Inet6 => *self,
        }
    }

    /// Converts a V4-mapped IPv6 endpoint back to IPv4, keeping the port. Any other endpoint is
    /// returned unchanged.
    pub fn to_v4_unmapped(&self) -> Self {
        if self.family != AddressFamily::Inet6 {
            return *self;
        }
        match Ipv6Addr::from(self.octets).to_ipv4_mapped() {
            Some(ip) => Self::v4(ip, self.port()),
            None => *self,
        }
    }

    /// Returns true if this is an IPv6 endpoint with a V4-mapped address.
    pub fn is_v4_mapped(&self) -> bool {
        self.family == AddressFamily::Inet6
            && Ipv6Addr::from(self.octets).to_ipv4_mapped().is_some()
    }
}

impl PartialEq for Endpoint {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family && self.port == other.port && self.ip_eq(other)
    }
}

impl Eq for Endpoint {}

impl Hash for Endpoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family.hash(state);
        state.write_u32(self.hash32());
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("family", &self.family)
            .field("ip", &self.ip())
            .field("port", &self.port())
            .finish()
    }
}

impl From<SocketAddr> for Endpoint {
    fn from(addr: SocketAddr) -> Self {
        Self::from_ip(addr.ip(), addr.port())
    }
}

impl From<SocketAddrV4> for Endpoint {
    fn from(addr: SocketAddrV4) -> Self {
        Self::v4(*addr.ip(), addr.port())
    }
}

impl From<SocketAddrV6> for Endpoint {
    fn from(addr: SocketAddrV6) -> Self {
        Self::v6(*addr.ip(), addr.port())
    }
}

impl TryFrom<Endpoint> for SocketAddr {
    type Error = InvalidFamily;

    /// Fails for an endpoint of unspecified family, which has no socket address.
    fn try_from(endpoint: Endpoint) -> Result<Self, Self::Error> {
        endpoint
            .ip()
            .map(|ip| SocketAddr::new(ip, endpoint.port()))
            .ok_or(InvalidFamily(endpoint.family.to_raw()))
    }
}
