// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage command implementation.
//!
//! Merges the input coverage files, narrows the result to the non-test
//! source files changed in the diff, and writes one coverage file. The
//! output should not share a directory with other coverage files, or a later
//! merge step will sweep them all up; hence the `diff-coverage/` default.

use std::path::{Path, PathBuf};

use covdiff::cli::CoverageArgs;
use covdiff::config::Context;
use covdiff::error::{Error, Result};
use covdiff::{coverage, discovery, git};

/// Run the coverage command.
pub fn run(ctx: &Context, args: &CoverageArgs) -> Result<()> {
    let input_files = discovery::resolve_coverage_inputs(ctx, &args.input_files)?;
    if input_files.is_empty() {
        return Err(Error::Input("no code coverage files found".to_string()));
    }

    let merged = coverage::merge_files(&input_files)?.ok_or_else(|| {
        Error::Input("no coverage data found in the provided files".to_string())
    })?;

    let diff_from = args.diff_from.clone().unwrap_or_else(|| ctx.config.diff.from.clone());
    let diff_to = args.diff_to.clone().unwrap_or_else(|| ctx.config.diff.to.clone());
    let include_working_tree = !args.committed_only && ctx.config.diff.include_working_tree;

    let tests_root = ctx.root.join("tests");
    let changed = git::changed_lines(
        &ctx.root,
        &diff_from,
        &diff_to,
        include_working_tree,
        |path| is_non_test_php_file(path, &tests_root),
    )?;

    let changed_files: Vec<String> = changed
        .keys()
        .map(|path| path.to_string_lossy().into_owned())
        .collect();
    let projected = merged.filter_to_files(&changed_files);

    let output_file = args
        .output_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("diff-coverage/diff-{diff_from}-{diff_to}.cov")));
    let output_file = ctx.absolutize(&output_file);

    projected.save(&output_file)?;
    tracing::info!("wrote {}", output_file.display());

    Ok(())
}

/// Source files of interest for coverage projection: `.php`, not a test
/// file, not under the tests root.
fn is_non_test_php_file(path: &Path, tests_root: &Path) -> bool {
    let name = path.to_string_lossy();
    name.ends_with(".php") && !name.ends_with("Test.php") && !path.starts_with(tests_root)
}
