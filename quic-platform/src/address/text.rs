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

//! Textual forms of an [`Endpoint`]: `a.b.c.d`, `a.b.c.d:port`, `h:h::h` and `[h:h::h]:port`.

use std::{
    fmt::{self, Display, Formatter, Write},
    net::{Ipv4Addr, Ipv6Addr},
    ops::Deref,
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use super::{AddressFamily, AddressParseError, Endpoint, RenderError};

/// Capacity of the host buffer for IPv4 text, including the terminator slot.
const IPV4_HOST_CAPACITY: usize = 16;
/// Capacity of the host buffer for bracketed IPv6 text, including the terminator slot.
const IPV6_HOST_CAPACITY: usize = 64;

/// Capacity of an [`AddressString`]. This fits the longest bracketed IPv6 endpoint with a port.
pub const ADDRESS_STRING_CAPACITY: usize = 64;

impl Endpoint {
    /// Parses `host` or `host:port` as an IPv4 endpoint. A missing port is zero.
    ///
    /// Text starting with `[` or containing more than one `:` is rejected.
    pub fn parse_v4(text: &str) -> Result<Self, AddressParseError> {
        Self::parse_v4_with_port(text, 0)
    }

    /// Parses `host` or `host:port` as an IPv4 endpoint, using `default_port` (host byte order)
    /// when the text has no port.
    pub fn parse_v4_with_port(text: &str, default_port: u16) -> Result<Self, AddressParseError> {
        if text.starts_with('[') {
            return Err(AddressParseError::UnexpectedBracket);
        }

        let (host, port) = match text.split_once(':') {
            Some((host, port)) => {
                if port.contains(':') {
                    return Err(AddressParseError::TooManyColons);
                }
                check_host_len(host, IPV4_HOST_CAPACITY)?;
                (host, parse_port(port)?)
            }
            None => (text, default_port),
        };

        let ip = Ipv4Addr::from_str(host)
            .map_err(|_| AddressParseError::InvalidHost(AddressFamily::Inet))?;
        Ok(Self::v4(ip, port))
    }

    /// Parses `[host]:port` or a bare `host` as an IPv6 endpoint. A missing port is zero.
    pub fn parse_v6(text: &str) -> Result<Self, AddressParseError> {
        Self::parse_v6_with_port(text, 0)
    }

    /// Parses `[host]:port` or a bare `host` as an IPv6 endpoint, using `default_port` (host
    /// byte order) when the text has no port.
    ///
    /// A bracketed host must be followed by `]:` and a port.
    pub fn parse_v6_with_port(text: &str, default_port: u16) -> Result<Self, AddressParseError> {
        let (host, port) = match text.strip_prefix('[') {
            Some(rest) => {
                let (host, after) = rest
                    .split_once(']')
                    .ok_or(AddressParseError::MalformedBrackets)?;
                let port = after
                    .strip_prefix(':')
                    .ok_or(AddressParseError::MalformedBrackets)?;
                check_host_len(host, IPV6_HOST_CAPACITY)?;
                (host, parse_port(port)?)
            }
            None => (text, default_port),
        };

        let ip = Ipv6Addr::from_str(host)
            .map_err(|_| AddressParseError::InvalidHost(AddressFamily::Inet6))?;
        Ok(Self::v6(ip, port))
    }

    /// Parses `host`, `host:port` or `[host]:port` as either family.
    ///
    /// IPv4 is tried first and IPv6 only if that fails. `default_port` (host byte order) is used
    /// when the text has no port.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quic_platform::address::{AddressFamily, Endpoint};
    /// let endpoint = Endpoint::parse("192.168.1.1", 53).unwrap();
    /// assert_eq!(endpoint.family(), AddressFamily::Inet);
    /// assert_eq!(endpoint.port(), 53);
    ///
    /// let endpoint = Endpoint::parse("[fe80::1]:4433", 53).unwrap();
    /// assert_eq!(endpoint.family(), AddressFamily::Inet6);
    /// assert_eq!(endpoint.port(), 4433);
    /// ```
    pub fn parse(text: &str, default_port: u16) -> Result<Self, AddressParseError> {
        Self::parse_v4_with_port(text, default_port)
            .or_else(|_| Self::parse_v6_with_port(text, default_port))
            .map_err(|_| AddressParseError::Unrecognized)
    }

    /// Renders the endpoint into a bounded [`AddressString`].
    ///
    /// IPv6 endpoints with a non-zero port are bracketed. A zero port is omitted.
    pub fn to_address_string(&self) -> Result<AddressString, RenderError> {
        let mut string = AddressString {
            buf: [0; ADDRESS_STRING_CAPACITY],
            len: 0,
        };
        string.len = self.write_to(&mut string.buf)?;
        Ok(string)
    }

    /// Renders the endpoint into `buf` and returns the number of bytes written.
    ///
    /// Fails with [`RenderError::BufferTooSmall`] instead of truncating when `buf` cannot hold the
    /// rendering; the contents of `buf` are unspecified in that case.
    pub fn write_to(&self, buf: &mut [u8]) -> Result<usize, RenderError> {
        let mut writer = BoundedWriter { buf, len: 0 };
        match self.render(&mut writer) {
            Ok(true) => Ok(writer.len),
            Ok(false) => Err(RenderError::UnspecifiedFamily),
            Err(fmt::Error) => Err(RenderError::BufferTooSmall {
                capacity: writer.buf.len(),
            }),
        }
    }

    /// Writes the canonical form. Returns `Ok(false)` for an endpoint without textual form.
    fn render<W: Write>(&self, out: &mut W) -> Result<bool, fmt::Error> {
        let port = self.port();
        match self.ip() {
            None => return Ok(false),
            Some(ip) if ip.is_ipv6() && port != 0 => write!(out, "[{ip}]:{port}")?,
            Some(ip) if port != 0 => write!(out, "{ip}:{port}")?,
            Some(ip) => write!(out, "{ip}")?,
        }
        Ok(true)
    }
}

fn check_host_len(host: &str, capacity: usize) -> Result<(), AddressParseError> {
    if host.len() >= capacity {
        return Err(AddressParseError::HostTooLong {
            len: host.len(),
            capacity,
        });
    }
    Ok(())
}

/// Parses a decimal port. Anything but 1 to 5 ASCII digits with a value up to 65535 is rejected.
fn parse_port(text: &str) -> Result<u16, AddressParseError> {
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(AddressParseError::InvalidPort);
    }
    text.parse().map_err(|_| AddressParseError::InvalidPort)
}

/// A [`fmt::Write`] sink over a fixed slice that fails instead of growing.
struct BoundedWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        if end > self.buf.len() {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

/// The rendering of an [`Endpoint`] in a fixed-capacity buffer.
#[derive(Clone, Copy)]
pub struct AddressString {
    buf: [u8; ADDRESS_STRING_CAPACITY],
    len: usize,
}

impl AddressString {
    /// Returns the rendering as a string slice.
    pub fn as_str(&self) -> &str {
        // Only whole `str` fragments are ever written into the buffer.
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }
}

impl Deref for AddressString {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for AddressString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for AddressString {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for AddressString {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Display for AddressString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for AddressString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl Display for Endpoint {
    /// Writes the canonical form, or `<unspecified>` for an endpoint of unspecified family.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if !self.render(f)? {
            f.write_str("<unspecified>")?;
        }
        Ok(())
    }
}

impl FromStr for Endpoint {
    type Err = AddressParseError;

    /// Parses either family with a default port of zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, 0)
    }
}

impl Serialize for Endpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let string = self
            .to_address_string()
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&string)
    }
}

impl<'de> Deserialize<'de> for Endpoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EndpointVisitor;

        impl de::Visitor<'_> for EndpointVisitor {
            type Value = Endpoint;

            fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str("an IPv4 or IPv6 endpoint such as \"10.0.0.1:443\" or \"[::1]:443\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Endpoint, E> {
                Endpoint::from_str(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(EndpointVisitor)
    }
}

#[cfg(test)]
mod tests {
    use std::net::IpAddr;

    use super::*;
    use crate::{
        status::Status,
        test_utils::{param_test, parse},
    };

    param_test! {
        parses_v4: [
            host_and_port: ("10.0.0.1:443", Ipv4Addr::new(10, 0, 0, 1), 443),
            host_only: ("192.168.1.1", Ipv4Addr::new(192, 168, 1, 1), 0),
            max_port: ("1.2.3.4:65535", Ipv4Addr::new(1, 2, 3, 4), 65535),
            any: ("0.0.0.0:0", Ipv4Addr::UNSPECIFIED, 0),
        ]
    }
    fn parses_v4(text: &str, ip: Ipv4Addr, port: u16) {
        let endpoint = Endpoint::parse_v4(text).unwrap();
        assert_eq!(endpoint.family(), AddressFamily::Inet);
        assert_eq!(endpoint.ip(), Some(IpAddr::V4(ip)));
        assert_eq!(endpoint.port(), port);
    }

    param_test! {
        rejects_v4: [
            bracketed: ("[::1]:443", AddressParseError::UnexpectedBracket),
            raw_ipv6: ("2001:db8::1", AddressParseError::TooManyColons),
            long_host: ("255.255.255.2555:1", AddressParseError::HostTooLong { len: 16, capacity: 16 }),
            bad_host: ("10.0.0:1", AddressParseError::InvalidHost(AddressFamily::Inet)),
            hostname: ("localhost", AddressParseError::InvalidHost(AddressFamily::Inet)),
            empty: ("", AddressParseError::InvalidHost(AddressFamily::Inet)),
            empty_port: ("10.0.0.1:", AddressParseError::InvalidPort),
            signed_port: ("10.0.0.1:+80", AddressParseError::InvalidPort),
            port_out_of_range: ("10.0.0.1:65536", AddressParseError::InvalidPort),
        ]
    }
    fn rejects_v4(text: &str, expected: AddressParseError) {
        assert_eq!(Endpoint::parse_v4(text), Err(expected));
    }

    param_test! {
        parses_v6: [
            bracketed: ("[::1]:8080", Ipv6Addr::LOCALHOST, 8080),
            bare: ("2001:db8::1", Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1), 0),
            mapped: ("[::ffff:10.0.0.1]:53", Ipv4Addr::new(10, 0, 0, 1).to_ipv6_mapped(), 53),
        ]
    }
    fn parses_v6(text: &str, ip: Ipv6Addr, port: u16) {
        let endpoint = Endpoint::parse_v6(text).unwrap();
        assert_eq!(endpoint.family(), AddressFamily::Inet6);
        assert_eq!(endpoint.ip(), Some(IpAddr::V6(ip)));
        assert_eq!(endpoint.port(), port);
    }

    param_test! {
        rejects_v6: [
            unclosed: ("[::1", AddressParseError::MalformedBrackets),
            no_port: ("[::1]", AddressParseError::MalformedBrackets),
            junk_after_bracket: ("[::1]x80", AddressParseError::MalformedBrackets),
            ipv4: ("10.0.0.1", AddressParseError::InvalidHost(AddressFamily::Inet6)),
            bad_port: ("[::1]:http", AddressParseError::InvalidPort),
            too_many_groups: (
                "[0:0:0:0:0:0:0:0:0]:1",
                AddressParseError::InvalidHost(AddressFamily::Inet6)
            ),
        ]
    }
    fn rejects_v6(text: &str, expected: AddressParseError) {
        assert_eq!(Endpoint::parse_v6(text), Err(expected));
    }

    #[test]
    fn oversized_bracketed_host() {
        let host = "0".repeat(IPV6_HOST_CAPACITY);
        let text = format!("[{host}]:1");
        assert_eq!(
            Endpoint::parse_v6(&text),
            Err(AddressParseError::HostTooLong {
                len: IPV6_HOST_CAPACITY,
                capacity: IPV6_HOST_CAPACITY
            })
        );
    }

    #[test]
    fn parse_applies_default_port() {
        let endpoint = Endpoint::parse("192.168.1.1", 53).unwrap();
        assert_eq!(endpoint, Endpoint::v4(Ipv4Addr::new(192, 168, 1, 1), 53));

        let endpoint = Endpoint::parse("10.0.0.1:80", 53).unwrap();
        assert_eq!(endpoint.port(), 80);

        let endpoint = Endpoint::parse("::1", 53).unwrap();
        assert_eq!(endpoint, Endpoint::v6(Ipv6Addr::LOCALHOST, 53));
    }

    #[test]
    fn parse_fails_when_both_families_fail() {
        let err = Endpoint::parse("not-an-address", 0).unwrap_err();
        assert_eq!(err, AddressParseError::Unrecognized);
        assert!(Status::from(err).failed());
    }

    param_test! {
        renders: [
            ipv4_with_port: ("10.0.0.1:443", "10.0.0.1:443"),
            ipv4_zero_port: ("10.0.0.1", "10.0.0.1"),
            ipv6_with_port: ("[::1]:8080", "[::1]:8080"),
            ipv6_zero_port: ("2001:db8::1", "2001:db8::1"),
            ipv6_explicit_zero_port: ("[2001:db8::1]:0", "2001:db8::1"),
            mapped: ("[::ffff:1.2.3.4]:1", "[::ffff:1.2.3.4]:1"),
            v4_compatible: ("[::1.2.3.4]:1", "[::102:304]:1"),
        ]
    }
    fn renders(text: &str, expected: &str) {
        let endpoint: Endpoint = text.parse().unwrap();
        assert_eq!(endpoint.to_address_string().unwrap(), expected);
        assert_eq!(endpoint.to_string(), expected);
    }

    #[test]
    fn v4_compatible_round_trips() {
        let endpoint: Endpoint = parse!("[::1.2.3.4]:7");
        let rendered = endpoint.to_address_string().unwrap();
        assert_eq!(Endpoint::parse(&rendered, 0), Ok(endpoint));
    }

    #[test]
    fn longest_rendering_fits() {
        let endpoint = Endpoint::v6(
            parse!("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"),
            u16::MAX,
        );
        let string = endpoint.to_address_string().unwrap();
        assert_eq!(string, "[ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff]:65535");
        assert!(string.len() < ADDRESS_STRING_CAPACITY);
    }

    #[test]
    fn render_unspecified_fails() {
        assert_eq!(
            Endpoint::UNSPECIFIED.to_address_string().unwrap_err(),
            RenderError::UnspecifiedFamily
        );
        assert_eq!(Endpoint::UNSPECIFIED.to_string(), "<unspecified>");
        assert_eq!(
            Status::from(RenderError::UnspecifiedFamily),
            Status::NOT_SUPPORTED
        );
    }

    #[test]
    fn small_buffer_is_reported() {
        let endpoint: Endpoint = parse!("[2001:db8::1]:4433");
        let mut buf = [0u8; 8];
        let err = endpoint.write_to(&mut buf).unwrap_err();
        assert_eq!(err, RenderError::BufferTooSmall { capacity: 8 });
        assert_eq!(Status::from(err), Status::BUFFER_TOO_SMALL);

        let mut buf = [0u8; 18];
        assert_eq!(endpoint.write_to(&mut buf), Ok(18));
        assert_eq!(&buf, b"[2001:db8::1]:4433");
    }

    #[test]
    fn serde_uses_canonical_text() {
        let endpoint: Endpoint = parse!("[::1]:8080");
        let json = serde_json::to_string(&endpoint).unwrap();
        assert_eq!(json, "\"[::1]:8080\"");
        let back: Endpoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, endpoint);

        assert!(serde_json::from_str::<Endpoint>("\"[::1\"").is_err());
        assert!(serde_json::to_string(&Endpoint::UNSPECIFIED).is_err());
    }
}
