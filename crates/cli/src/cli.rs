// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::filter::Granularity;

/// Narrows a test run to the tests relevant to a diff, using recorded line
/// coverage
#[derive(Parser)]
#[command(name = "covdiff")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "COVDIFF_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Filter a coverage file to only the files contained in a diff
    Coverage(CoverageArgs),
    /// Print a test-runner filter to run only tests covering a diff
    Filter(FilterArgs),
    /// Render a markdown report of a coverage file
    Report(ReportArgs),
}

#[derive(clap::Args)]
pub struct CoverageArgs {
    /// Coverage files to merge and filter (default: discovered *.cov)
    #[arg(long, value_name = "FILES", value_delimiter = ',')]
    pub input_files: Vec<PathBuf>,

    /// Reference to diff from
    #[arg(long, value_name = "REF")]
    pub diff_from: Option<String>,

    /// Reference to diff to
    #[arg(long, value_name = "REF")]
    pub diff_to: Option<String>,

    /// Output file path (default: diff-coverage/diff-<from>-<to>.cov)
    #[arg(long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Ignore staged, pending, and untracked changes
    #[arg(long)]
    pub committed_only: bool,
}

#[derive(clap::Args)]
pub struct FilterArgs {
    /// Coverage files to read (default: discovered *.cov)
    #[arg(long, value_name = "FILES", value_delimiter = ',')]
    pub input_files: Vec<PathBuf>,

    /// Reference to diff from
    #[arg(long, value_name = "REF")]
    pub diff_from: Option<String>,

    /// Reference to diff to
    #[arg(long, value_name = "REF")]
    pub diff_to: Option<String>,

    /// Select tests covering changed lines, or anywhere in changed files
    #[arg(long, value_enum, value_name = "GRANULARITY")]
    pub granularity: Option<Granularity>,

    /// Ignore staged, pending, and untracked changes
    #[arg(long)]
    pub committed_only: bool,
}

#[derive(clap::Args)]
pub struct ReportArgs {
    /// Coverage file to report on
    #[arg(long, value_name = "PATH")]
    pub input_file: PathBuf,

    /// URL prefix linking each file row, e.g. a blob URL at a commit
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Output file path (default: stdout)
    #[arg(long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Restrict the report to these files
    #[arg(long, value_name = "FILES", value_delimiter = ',')]
    pub covered_files: Vec<String>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
