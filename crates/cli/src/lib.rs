// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod cli;
pub mod config;
pub mod coverage;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod git;
pub mod php;
pub mod ranges;
pub mod report;

pub use cli::{Cli, Command, CoverageArgs, FilterArgs, ReportArgs};
pub use config::{Config, Context};
pub use coverage::CoverageData;
pub use error::{Error, ExitCode, Result};
pub use filter::{Granularity, Selection};
pub use ranges::LineRange;

#[cfg(test)]
pub mod test_utils;
