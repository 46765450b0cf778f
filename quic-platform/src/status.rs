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

//! Stack-wide status codes.
//!
//! A [`Status`] is either a host `errno` value, used verbatim when a failure originates in the
//! operating system, or a stack-defined [`ErrorCode`] placed at [`ERROR_BASE`] plus a small
//! offset. The custom range lies far above any `errno` value, so the two never collide.
//!
//! Success is *not* tested against zero: a status succeeded iff its value is `<= 0`. The
//! negative values [`Status::CONTINUE`] and [`Status::PENDING`] are control outcomes rather than
//! errors and therefore succeed.
//!
//! ```
//! # use quic_platform::status::Status;
//! assert!(Status::SUCCESS.succeeded());
//! assert!(Status::PENDING.succeeded());
//! assert!(Status::PROTOCOL_ERROR.failed());
//! assert!(Status::from_errno(libc::EINVAL).failed());
//! ```

use std::{fmt, io};

use crate::utils::offset_code;

/// First value of the custom status range. Stack-defined codes are `ERROR_BASE + offset`.
pub const ERROR_BASE: i32 = 200_000_000;

offset_code! {
    /// Stack-defined failure conditions without a host `errno` equivalent.
    ///
    /// The discriminants are offsets from [`ERROR_BASE`].
    #[allow(missing_docs)]
    pub enum ErrorCode(i32) {
        NotEnoughMemory = 1 => "ERROR_NOT_ENOUGH_MEMORY",
        InvalidState = 2 => "ERROR_INVALID_STATE",
        InvalidParameter = 3 => "ERROR_INVALID_PARAMETER",
        NotSupported = 4 => "ERROR_NOT_SUPPORTED",
        NotFound = 5 => "ERROR_NOT_FOUND",
        BufferOverflow = 6 => "ERROR_BUFFER_OVERFLOW",
        ConnectionRefused = 7 => "ERROR_CONNECTION_REFUSED",
        OperationAborted = 8 => "ERROR_OPERATION_ABORTED",
        HandshakeFailure = 9 => "ERROR_HANDSHAKE_FAILURE",
        NetworkUnreachable = 10 => "ERROR_NETWORK_UNREACHABLE",
        ConnectionIdle = 11 => "ERROR_CONNECTION_IDLE",
        InternalError = 12 => "ERROR_INTERNAL_ERROR",
        ProtocolError = 13 => "ERROR_PROTOCOL_ERROR",
        VersionNegotiationError = 14 => "ERROR_VER_NEG_ERROR",
        /// The event loop of the data path reported an error.
        EventLoopError = 15 => "ERROR_EPOLL_ERROR",
        DnsResolutionError = 16 => "ERROR_DNS_RESOLUTION_ERROR",
        SocketError = 17 => "ERROR_SOCKET_ERROR",
        TlsError = 18 => "ERROR_SSL_ERROR",
        UserCanceled = 19 => "ERROR_USER_CANCELED",
        /// No common application protocol was negotiated.
        AlpnNegotiationFailure = 20 => "ERROR_ALPN_NEG_FAILURE";
        /// An offset without an assigned meaning.
        Unassigned = (i32::MIN..=0 | 21..),
    }
}

/// A stack-level status value.
///
/// The set of values is totally ordered by their raw integer value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Status(i32);

impl Status {
    /// The operation completed.
    pub const SUCCESS: Self = Self(0);
    /// The operation completed and the caller should continue with the next step.
    pub const CONTINUE: Self = Self(-1);
    /// The operation will complete asynchronously.
    pub const PENDING: Self = Self(-2);

    /// Memory could not be allocated.
    pub const OUT_OF_MEMORY: Self = Self(libc::ENOMEM);
    /// A parameter was malformed or out of range.
    pub const INVALID_PARAMETER: Self = Self(libc::EINVAL);
    /// The object is in a state that does not permit the operation.
    pub const INVALID_STATE: Self = Self::custom(2);
    /// The operation is not supported.
    pub const NOT_SUPPORTED: Self = Self(libc::EOPNOTSUPP);
    /// The requested item does not exist.
    pub const NOT_FOUND: Self = Self(libc::ENOENT);
    /// An output buffer cannot hold the result.
    pub const BUFFER_TOO_SMALL: Self = Self(libc::EOVERFLOW);
    /// The cryptographic handshake failed.
    pub const HANDSHAKE_FAILURE: Self = Self::custom(9);
    /// The operation was aborted.
    pub const ABORTED: Self = Self::custom(8);
    /// The local address is already bound.
    pub const ADDRESS_IN_USE: Self = Self(libc::EADDRINUSE);
    /// The peer did not answer in time.
    pub const CONNECTION_TIMEOUT: Self = Self(libc::ETIMEDOUT);
    /// The connection was closed because it was idle.
    pub const CONNECTION_IDLE: Self = Self::custom(11);
    /// An unexpected internal failure.
    pub const INTERNAL_ERROR: Self = Self::custom(12);
    /// The peer refused the connection.
    pub const CONNECTION_REFUSED: Self = Self::custom(7);
    /// The peer violated the protocol.
    pub const PROTOCOL_ERROR: Self = Self::custom(13);
    /// No common protocol version could be negotiated.
    pub const VER_NEG_ERROR: Self = Self::custom(14);
    /// The destination host is unreachable.
    pub const UNREACHABLE: Self = Self(libc::EHOSTUNREACH);
    /// The caller lacks the required permission.
    pub const PERMISSION_DENIED: Self = Self(libc::EPERM);
    /// The event loop of the data path failed.
    pub const EPOLL_ERROR: Self = Self::custom(15);
    /// A host name could not be resolved.
    pub const DNS_RESOLUTION_ERROR: Self = Self::custom(16);
    /// A socket operation failed.
    pub const SOCKET_ERROR: Self = Self::custom(17);
    /// The TLS library reported a failure.
    pub const TLS_ERROR: Self = Self::custom(18);
    /// The user cancelled the operation.
    pub const USER_CANCELED: Self = Self::custom(19);
    /// Application protocol negotiation failed.
    pub const ALPN_NEG_FAILURE: Self = Self::custom(20);

    const fn custom(offset: i32) -> Self {
        Self(ERROR_BASE + offset)
    }

    /// Wraps a raw status value.
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw status value.
    pub const fn to_raw(self) -> i32 {
        self.0
    }

    /// Reuses a host `errno` value verbatim as a status.
    pub const fn from_errno(errno: i32) -> Self {
        Self(errno)
    }

    /// Returns true if the status denotes success, that is if its value is `<= 0`.
    pub const fn succeeded(self) -> bool {
        self.0 <= 0
    }

    /// Returns true if the status denotes failure, that is if its value is `> 0`.
    pub const fn failed(self) -> bool {
        self.0 > 0
    }

    /// Returns true if the status lies in the custom range.
    pub const fn is_custom(self) -> bool {
        self.0 > ERROR_BASE
    }

    /// Returns the stack-defined code of a custom status.
    pub fn custom_code(self) -> Option<ErrorCode> {
        self.is_custom().then(|| ErrorCode::from(self.0 - ERROR_BASE))
    }

    /// Converts a succeeding status into `Ok` and a failing one into a [`StatusError`].
    pub fn ok(self) -> Result<Self, StatusError> {
        if self.failed() {
            Err(StatusError(self))
        } else {
            Ok(self)
        }
    }

    /// Returns the symbolic name of the status, if it is one of the named aliases.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::SUCCESS => "SUCCESS",
            Self::CONTINUE => "CONTINUE",
            Self::PENDING => "PENDING",
            Self::OUT_OF_MEMORY => "OUT_OF_MEMORY",
            Self::INVALID_PARAMETER => "INVALID_PARAMETER",
            Self::NOT_SUPPORTED => "NOT_SUPPORTED",
            Self::NOT_FOUND => "NOT_FOUND",
            Self::BUFFER_TOO_SMALL => "BUFFER_TOO_SMALL",
            Self::ADDRESS_IN_USE => "ADDRESS_IN_USE",
            Self::CONNECTION_TIMEOUT => "CONNECTION_TIMEOUT",
            Self::UNREACHABLE => "UNREACHABLE",
            Self::PERMISSION_DENIED => "PERMISSION_DENIED",
            Self::INVALID_STATE => "INVALID_STATE",
            Self::HANDSHAKE_FAILURE => "HANDSHAKE_FAILURE",
            Self::ABORTED => "ABORTED",
            Self::CONNECTION_IDLE => "CONNECTION_IDLE",
            Self::INTERNAL_ERROR => "INTERNAL_ERROR",
            Self::CONNECTION_REFUSED => "CONNECTION_REFUSED",
            Self::PROTOCOL_ERROR => "PROTOCOL_ERROR",
            Self::VER_NEG_ERROR => "VER_NEG_ERROR",
            Self::EPOLL_ERROR => "EPOLL_ERROR",
            Self::DNS_RESOLUTION_ERROR => "DNS_RESOLUTION_ERROR",
            Self::SOCKET_ERROR => "SOCKET_ERROR",
            Self::TLS_ERROR => "TLS_ERROR",
            Self::USER_CANCELED => "USER_CANCELED",
            Self::ALPN_NEG_FAILURE => "ALPN_NEG_FAILURE",
            _ => return self.custom_code().and_then(|code| code.label()),
        };
        Some(name)
    }
}

impl From<ErrorCode> for Status {
    fn from(code: ErrorCode) -> Self {
        Self(ERROR_BASE + i32::from(code))
    }
}

impl From<io::Error> for Status {
    /// Uses the OS error number when there is one, and otherwise picks the closest alias for
    /// the error kind.
    fn from(err: io::Error) -> Self {
        if let Some(errno) = err.raw_os_error() {
            return Self::from_errno(errno);
        }
        match err.kind() {
            io::ErrorKind::OutOfMemory => Self::OUT_OF_MEMORY,
            io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData => Self::INVALID_PARAMETER,
            io::ErrorKind::Unsupported => Self::NOT_SUPPORTED,
            io::ErrorKind::NotFound => Self::NOT_FOUND,
            io::ErrorKind::AddrInUse => Self::ADDRESS_IN_USE,
            io::ErrorKind::TimedOut => Self::CONNECTION_TIMEOUT,
            io::ErrorKind::ConnectionRefused => Self::CONNECTION_REFUSED,
            io::ErrorKind::ConnectionAborted | io::ErrorKind::Interrupted => Self::ABORTED,
            io::ErrorKind::HostUnreachable | io::ErrorKind::NetworkUnreachable => {
                Self::UNREACHABLE
            }
            io::ErrorKind::PermissionDenied => Self::PERMISSION_DENIED,
            _ => Self::INTERNAL_ERROR,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Status({name}={})", self.0),
            None => write!(f, "Status({})", self.0),
        }
    }
}

/// A failing [`Status`], usable as an error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("operation failed with status {0} ({raw})", raw = .0.to_raw())]
pub struct StatusError(Status);

impl StatusError {
    /// Returns the failing status.
    pub const fn status(&self) -> Status {
        self.0
    }
}

impl From<StatusError> for Status {
    fn from(err: StatusError) -> Self {
        err.0
    }
}
