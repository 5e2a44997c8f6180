// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report command implementation.
//!
//! Renders a markdown coverage report, optionally restricted to a list of
//! files, to stdout or a file.

use covdiff::cli::ReportArgs;
use covdiff::config::Context;
use covdiff::coverage::CoverageData;
use covdiff::error::{Error, Result};
use covdiff::report;

/// Run the report command.
pub fn run(ctx: &Context, args: &ReportArgs) -> Result<()> {
    let input_file = ctx.absolutize(&args.input_file);
    let coverage = CoverageData::load(&input_file)?;

    // Whether these files exist on disk does not matter; they narrow the
    // report by suffix match only.
    let covered_files: Vec<String> = args
        .covered_files
        .iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();
    let projected = coverage.filter_to_files(&covered_files);

    let root_prefix = format!("{}/", ctx.root.display());
    let rendered = report::render_markdown(&projected, &root_prefix, args.base_url.as_deref());

    match &args.output_file {
        Some(path) => {
            let path = ctx.absolutize(path);
            std::fs::write(&path, rendered).map_err(|e| Error::io(path, e))?;
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
