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

//! Errors raised while parsing or rendering endpoints.

use super::AddressFamily;
use crate::status::Status;

/// Errors raised when parsing an [`Endpoint`][super::Endpoint] from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AddressParseError {
    /// An IPv4 endpoint was requested but the text uses IPv6 bracket syntax.
    #[error("bracketed host is not an IPv4 endpoint")]
    UnexpectedBracket,
    /// The text contains more than one `:` and cannot be an IPv4 `host:port`.
    #[error("more than one ':' in an IPv4 endpoint")]
    TooManyColons,
    /// A `[` is not closed by `]:`.
    #[error("expected '[host]:port'")]
    MalformedBrackets,
    /// The host part does not fit the bounded host buffer of its family.
    #[error("host of {len} bytes exceeds the {capacity} byte limit")]
    HostTooLong {
        /// Length of the host part.
        len: usize,
        /// Capacity of the host buffer, including the terminator slot.
        capacity: usize,
    },
    /// The host is not a numeric address of the family.
    #[error("invalid {0} address")]
    InvalidHost(AddressFamily),
    /// The port is not a decimal number in `0..=65535`.
    #[error("invalid port")]
    InvalidPort,
    /// The text is neither an IPv4 nor an IPv6 endpoint.
    #[error("not an IPv4 or IPv6 endpoint")]
    Unrecognized,
}

impl From<AddressParseError> for Status {
    fn from(_: AddressParseError) -> Self {
        Status::INVALID_PARAMETER
    }
}

/// Errors raised when rendering an [`Endpoint`][super::Endpoint] as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Only IPv4 and IPv6 endpoints have a textual form.
    #[error("cannot render an endpoint of unspecified family")]
    UnspecifiedFamily,
    /// The output buffer cannot hold the rendering.
    #[error("the provided buffer of {capacity} bytes is too small")]
    BufferTooSmall {
        /// Size of the provided buffer.
        capacity: usize,
    },
}

impl From<RenderError> for Status {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::UnspecifiedFamily => Status::NOT_SUPPORTED,
            RenderError::BufferTooSmall { .. } => Status::BUFFER_TOO_SMALL,
        }
    }
}
