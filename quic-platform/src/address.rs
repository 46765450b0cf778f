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

//! Address-family agnostic endpoints.
//!
//! # Organisation
//!
//! - An [`AddressFamily`] tags an endpoint as IPv4, IPv6 or unspecified. Raw family values
//!   coming from the host are validated through [`AddressFamily::try_from`].
//! - An [`Endpoint`] combines a family, the address bytes of that family and a port. Equality
//!   and hashing only look at the bytes that belong to the active family.
//! - An [`AddressString`] is the bounded textual rendering of an endpoint, such as `10.0.0.1:443`
//!   or `[::1]:8080`. Parsing and rendering failures are reported as [`AddressParseError`] and
//!   [`RenderError`], both of which convert into a [`Status`][crate::status::Status].

mod family;
pub use family::{AddressFamily, InvalidFamily};

mod endpoint;
pub use endpoint::Endpoint;

mod text;
pub use text::{ADDRESS_STRING_CAPACITY, AddressString};

mod error;
pub use error::{AddressParseError, RenderError};
