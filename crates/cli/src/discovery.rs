// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Discovery of config files, coverage files, and suite descriptors.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

/// Find covdiff.toml starting from `start_dir` and walking up to the git
/// root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join("covdiff.toml");
        if config_path.exists() {
            return Some(config_path);
        }

        // Stop at git root
        if current.join(".git").exists() {
            return None;
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// Find persisted coverage files by convention: `*.cov` directly under the
/// project root, under `tests/`, and one directory deeper.
pub fn find_coverage_files(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();

    collect_cov_files(root, &mut found);
    let tests_dir = root.join("tests");
    collect_cov_files(&tests_dir, &mut found);
    if let Ok(entries) = std::fs::read_dir(&tests_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                collect_cov_files(&path, &mut found);
            }
        }
    }

    found.sort();
    found
}

fn collect_cov_files(dir: &Path, found: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "cov") {
            found.push(path);
        }
    }
}

fn suite_descriptor_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        #[allow(clippy::unwrap_used)] // pattern is a literal, cannot fail
        let re = Regex::new(r"^(.*)\.suite\.y.?ml$").unwrap();
        re
    })
}

/// Find suite descriptor files (`tests/*.suite.yml` or `.suite.yaml`),
/// keyed by suite name.
///
/// Their presence marks a suite-oriented (Codeception-style) project; the
/// descriptors themselves are never parsed.
pub fn find_suite_descriptors(root: &Path) -> BTreeMap<String, PathBuf> {
    let mut suites = BTreeMap::new();

    let Ok(entries) = std::fs::read_dir(root.join("tests")) else {
        return suites;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name();
        if let Some(captures) = suite_descriptor_regex().captures(&name.to_string_lossy()) {
            if let Some(stem) = captures.get(1) {
                suites.insert(stem.as_str().to_string(), path);
            }
        }
    }

    suites
}

/// Resolve the coverage files for one invocation.
///
/// Priority: explicit `--input-files`, then configured files, then the
/// discovery convention. Relative paths resolve against the project root;
/// every resolved file must be readable.
pub fn resolve_coverage_inputs(
    ctx: &crate::config::Context,
    explicit: &[PathBuf],
) -> crate::error::Result<Vec<PathBuf>> {
    let candidates: Vec<PathBuf> = if !explicit.is_empty() {
        explicit.iter().map(|p| ctx.absolutize(p)).collect()
    } else if !ctx.config.coverage.files.is_empty() {
        ctx.config
            .coverage
            .files
            .iter()
            .map(|p| ctx.absolutize(Path::new(p)))
            .collect()
    } else {
        find_coverage_files(&ctx.root)
    };

    for path in &candidates {
        std::fs::metadata(path).map_err(|e| crate::error::Error::io(path, e))?;
    }

    Ok(candidates)
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
