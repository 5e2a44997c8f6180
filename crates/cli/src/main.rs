// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Covdiff CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use covdiff::cli::{Cli, Command};
use covdiff::config::Context;
use covdiff::error::ExitCode;

mod cmd_coverage;
mod cmd_filter;
mod cmd_report;

fn init_logging() {
    let filter = EnvFilter::try_from_env("COVDIFF_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("covdiff: {}", e);
            match e.downcast_ref::<covdiff::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::Failure,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(command) => {
            let ctx = Context::resolve(cli.config.as_deref())?;
            match command {
                Command::Coverage(args) => cmd_coverage::run(&ctx, args)?,
                Command::Filter(args) => cmd_filter::run(&ctx, args)?,
                Command::Report(args) => cmd_report::run(&ctx, args)?,
            }
            Ok(ExitCode::Success)
        }
    }
}
