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

use std::process::ExitCode;

use addr_tool::{
    cli::{Commands, Opts},
    commands,
};
use anyhow::Context;
use clap::Parser;
use serde::Serialize;

fn main() -> anyhow::Result<ExitCode> {
    let opts = Opts::parse();
    let _guards = observability::setup_tracing(opts.logging.log_dir.as_ref(), opts.logging.stderr)
        .context("error setting up logging")?;

    let exit = match opts.command {
        Commands::Parse {
            endpoint,
            family,
            default_port,
        } => print(&commands::parse(&endpoint, family, default_port)?, opts.json)?,
        Commands::Map { endpoint } => print(&commands::map(&endpoint)?, opts.json)?,
        Commands::Unmap { endpoint } => print(&commands::unmap(&endpoint)?, opts.json)?,
        Commands::Status { code } => print(&commands::status(code), opts.json)?,
        Commands::Check { file } => {
            let report = commands::check(&file)?;
            print(&report, opts.json)?;
            if !report.is_ok() {
                tracing::error!(
                    invalid = report.invalid.len(),
                    "Endpoint list has invalid entries"
                );
                return Ok(ExitCode::FAILURE);
            }
            ExitCode::SUCCESS
        }
    };
    Ok(exit)
}

fn print<T: Serialize + std::fmt::Display>(report: &T, json: bool) -> anyhow::Result<ExitCode> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{report}");
    }
    Ok(ExitCode::SUCCESS)
}
