// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Filter command implementation.
//!
//! Prints a PHPUnit- or Codeception-style filter expression selecting the
//! tests that cover the lines in the diff. An empty expression with loadable
//! coverage data is a legitimate "no tests to run" result, not an error.

use std::collections::BTreeMap;

use covdiff::cli::FilterArgs;
use covdiff::config::Context;
use covdiff::coverage::CoverageData;
use covdiff::error::{Error, Result};
use covdiff::{discovery, filter, git};

/// Run the filter command.
pub fn run(ctx: &Context, args: &FilterArgs) -> Result<()> {
    let input_files = discovery::resolve_coverage_inputs(ctx, &args.input_files)?;
    if input_files.is_empty() {
        return Err(Error::Input("no code coverage files found".to_string()));
    }

    // Datasets keyed by presumed suite name, from the `<name>.cov`
    // convention.
    let mut datasets: BTreeMap<String, CoverageData> = BTreeMap::new();
    for path in &input_files {
        let Some(name) = filter::suite_name(path) else {
            tracing::warn!("ignoring {}: not a .cov file", path.display());
            continue;
        };
        datasets.insert(name, CoverageData::load(path)?);
    }
    if datasets.is_empty() {
        return Err(Error::Input(
            "no coverage data could be loaded from the provided files".to_string(),
        ));
    }

    let diff_from = args.diff_from.clone().unwrap_or_else(|| ctx.config.diff.from.clone());
    let diff_to = args.diff_to.clone().unwrap_or_else(|| ctx.config.diff.to.clone());
    let granularity = args.granularity.unwrap_or(ctx.config.filter.granularity);
    let include_working_tree = !args.committed_only && ctx.config.diff.include_working_tree;

    let changed = git::changed_lines(
        &ctx.root,
        &diff_from,
        &diff_to,
        include_working_tree,
        |path| path.to_string_lossy().ends_with(".php"),
    )?;

    let selection = filter::select(&datasets, &changed, granularity);

    let known_suites = discovery::find_suite_descriptors(&ctx.root);
    let suite_oriented = filter::is_suite_oriented(&datasets, &known_suites);

    print!("{}", filter::render(&selection, suite_oriented));

    Ok(())
}
