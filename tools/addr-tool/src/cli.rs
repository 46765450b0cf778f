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

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Inspect endpoints and status codes.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Opts {
    /// Top-level subcommand
    #[command(subcommand)]
    pub command: Commands,

    /// Logging options
    #[command(flatten)]
    pub logging: LoggingOptions,

    /// Print reports as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,
}

/// Logging options.
#[derive(Debug, Args)]
pub struct LoggingOptions {
    /// Log to stderr.
    #[arg(long, global = true)]
    pub stderr: bool,

    /// Directory for the log file.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
}

/// Which parser to apply to an endpoint string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FamilyArg {
    /// Try IPv4, then IPv6.
    #[default]
    Any,
    /// IPv4 only.
    V4,
    /// IPv6 only.
    V6,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse an endpoint and print its properties.
    Parse {
        /// Endpoint text, e.g. `10.0.0.1:443` or `[::1]:8080`.
        endpoint: String,

        /// Parser to use.
        #[arg(long, value_enum, default_value_t)]
        family: FamilyArg,

        /// Port used when the text has none.
        #[arg(long, default_value_t = 0)]
        default_port: u16,
    },
    /// Print the V4-mapped IPv6 form of an endpoint.
    Map {
        /// Endpoint text.
        endpoint: String,
    },
    /// Print the IPv4 form of a V4-mapped IPv6 endpoint.
    Unmap {
        /// Endpoint text.
        endpoint: String,
    },
    /// Describe a raw status value.
    Status {
        /// The raw status value.
        #[arg(allow_negative_numbers = true)]
        code: i32,
    },
    /// Validate a JSON file holding an array of endpoint strings.
    Check {
        /// Path of the JSON file.
        #[arg(long)]
        file: PathBuf,
    },
}
