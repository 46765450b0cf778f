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

//! Flags that relax certificate validation of a peer.

bitflags::bitflags! {
    /// Certificate validation checks the TLS layer may skip.
    ///
    /// Bits without a name are kept when converting from a raw value, so flags defined by a newer
    /// peer survive a round trip through this type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CertificateFlags: u32 {
        /// Do not check whether the certificate was revoked.
        const IGNORE_REVOCATION = 0x0000_0080;
        /// Accept certificates from an unknown certificate authority.
        const IGNORE_UNKNOWN_CA = 0x0000_0100;
        /// Accept certificates whose key usage does not match.
        const IGNORE_WRONG_USAGE = 0x0000_0200;
        /// Accept a common name that does not match the server name.
        const IGNORE_CERTIFICATE_CN_INVALID = 0x0000_1000;
        /// Accept expired or not yet valid certificates.
        const IGNORE_CERTIFICATE_DATE_INVALID = 0x0000_2000;
        /// Accept certificates signed with a weak algorithm.
        const IGNORE_WEAK_SIGNATURE = 0x0001_0000;
    }
}

impl CertificateFlags {
    /// Creates the flag set from its raw value, keeping unknown bits.
    pub const fn from_raw(raw: u32) -> Self {
        Self::from_bits_retain(raw)
    }

    /// Returns true if no validation check is skipped.
    pub const fn is_strict(&self) -> bool {
        self.is_empty()
    }
}
