// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted coverage datasets: loading, merging, and projection.
//!
//! A `*.cov` file is a versioned JSON document recording which tests
//! executed which source lines during a prior run. The struct's public
//! methods are the capability contract the rest of the tool depends on;
//! nothing outside this module touches the serialized shape.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Supported coverage file format version.
pub const FORMAT_VERSION: u32 = 1;

/// Line coverage: file path -> line number -> tests covering that line.
pub type LineCoverage = BTreeMap<String, BTreeMap<u32, BTreeSet<String>>>;

/// One coverage dataset, as persisted in a `*.cov` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageData {
    /// Format version; files from other versions are incompatible.
    pub version: u32,

    /// File -> line -> set of fully-qualified test identifiers.
    #[serde(default)]
    pub line_coverage: LineCoverage,

    /// Whether the producing driver collected branch and path coverage.
    #[serde(default)]
    pub branch_and_path_coverage: bool,

    /// Tests recorded during the covered run.
    #[serde(default)]
    pub tests: Vec<String>,
}

impl Default for CoverageData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            line_coverage: LineCoverage::new(),
            branch_and_path_coverage: false,
            tests: Vec::new(),
        }
    }
}

impl CoverageData {
    /// Load a coverage dataset from a `*.cov` file.
    ///
    /// An unreadable file is an I/O error; a file that does not deserialize
    /// or carries a different format version is incompatible data, reported
    /// with the offending path.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let data: CoverageData =
            serde_json::from_str(&raw).map_err(|e| Error::IncompatibleData {
                path: path.to_path_buf(),
                message: format!("probably created with an incompatible covdiff version: {e}"),
            })?;

        if data.version != FORMAT_VERSION {
            return Err(Error::IncompatibleData {
                path: path.to_path_buf(),
                message: format!(
                    "unsupported format version {} (expected {FORMAT_VERSION})",
                    data.version
                ),
            });
        }

        Ok(data)
    }

    /// Write the dataset to `path`, creating parent directories as needed.
    ///
    /// The file is written in one shot from the fully constructed in-memory
    /// result, so a failure never leaves a partial coverage file behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| Error::IncompatibleData {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, json).map_err(|e| Error::io(path, e))
    }

    /// Union another dataset into this one.
    ///
    /// The result's line coverage is the union over files, lines, and
    /// per-line test sets; commutative and associative on the resulting
    /// (file, line, test) triples.
    pub fn merge(&mut self, other: CoverageData) {
        for (file, lines) in other.line_coverage {
            let entry = self.line_coverage.entry(file).or_default();
            for (line, tests) in lines {
                entry.entry(line).or_default().extend(tests);
            }
        }
        self.branch_and_path_coverage |= other.branch_and_path_coverage;
        for test in other.tests {
            if !self.tests.contains(&test) {
                self.tests.push(test);
            }
        }
    }

    /// Project the dataset down to only the files in `included`.
    ///
    /// An empty list means no filtering was requested and returns the data
    /// unchanged. A file is retained when it exactly matches an entry or
    /// ends with one, so repository-relative paths match a dataset keyed by
    /// absolute paths. The capability flag and recorded test list carry over
    /// to the projection verbatim.
    pub fn filter_to_files(&self, included: &[String]) -> CoverageData {
        if included.is_empty() {
            return self.clone();
        }

        let retained: LineCoverage = self
            .line_coverage
            .iter()
            .filter(|(file, _)| {
                included
                    .iter()
                    .any(|want| *file == want || file.ends_with(want.as_str()))
            })
            .map(|(file, lines)| (file.clone(), lines.clone()))
            .collect();

        CoverageData {
            version: FORMAT_VERSION,
            line_coverage: retained,
            branch_and_path_coverage: self.branch_and_path_coverage,
            tests: self.tests.clone(),
        }
    }
}

/// Merge coverage files with a left fold.
///
/// Returns `Ok(None)` only for an empty input list; callers decide whether
/// that is an error. An incompatible file aborts the merge that depended on
/// it.
pub fn merge_files(paths: &[PathBuf]) -> Result<Option<CoverageData>> {
    let mut merged: Option<CoverageData> = None;
    for path in paths {
        let data = CoverageData::load(path)?;
        match merged.as_mut() {
            Some(acc) => acc.merge(data),
            None => merged = Some(data),
        }
    }
    Ok(merged)
}

#[cfg(test)]
#[path = "coverage_tests.rs"]
mod tests;
